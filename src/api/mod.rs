use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

mod error;

pub use error::ApiError;

use crate::core::{
    BudgetPoint, CAPITAL_GAINS, CapitalGainsElasticity, Column, DEFAULT_SUBSTITUTION_ELASTICITY,
    DecileElasticity, ELASTICITY_PARAMS, ElasticityParam, ElasticityRange, ElasticitySources,
    INCOME_ELASTICITY, Jurisdiction, JurisdictionConfig, LAST_STEP, MicrosimStep,
    SAMPLE_HOUSEHOLDS, SOURCES, SUBSTITUTION_BY_DECILE, Scenario, WalkthroughView,
    average_substitution, budget_constraint, columns, jurisdiction_config, steps,
    walkthrough_view,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliJurisdiction {
    Us,
    Uk,
}

impl From<CliJurisdiction> for Jurisdiction {
    fn from(value: CliJurisdiction) -> Self {
        match value {
            CliJurisdiction::Us => Jurisdiction::Us,
            CliJurisdiction::Uk => Jurisdiction::Uk,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliView {
    Walkthrough,
    Steps,
    BudgetConstraint,
    Elasticities,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiJurisdiction {
    #[serde(alias = "US", alias = "united-states")]
    Us,
    #[serde(alias = "UK", alias = "gb", alias = "united-kingdom")]
    Uk,
}

impl From<ApiJurisdiction> for CliJurisdiction {
    fn from(value: ApiJurisdiction) -> Self {
        match value {
            ApiJurisdiction::Us => CliJurisdiction::Us,
            ApiJurisdiction::Uk => CliJurisdiction::Uk,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct WalkthroughPayload {
    jurisdiction: Option<ApiJurisdiction>,
    step: Option<u32>,
    elasticity: Option<f64>,
    credit_per_child: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct BudgetPayload {
    jurisdiction: Option<ApiJurisdiction>,
    substitution_elasticity: Option<f64>,
    income_elasticity: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StepsQuery {
    jurisdiction: Option<ApiJurisdiction>,
}

#[derive(Parser, Debug)]
#[command(
    name = "microsim",
    about = "Household tax microsimulation walkthrough (baseline, per-child credit reform, behavioral response, weighting)"
)]
struct Cli {
    #[arg(
        long,
        value_enum,
        default_value_t = CliJurisdiction::Us,
        help = "Jurisdiction for currency, credit amount and spelling"
    )]
    jurisdiction: CliJurisdiction,
    #[arg(long, value_enum, default_value_t = CliView::Walkthrough)]
    view: CliView,
    #[arg(
        long,
        default_value_t = 0,
        help = "Walkthrough step, 0 (households) to 4 (weight and aggregate)"
    )]
    step: u32,
    #[arg(
        long,
        default_value_t = DEFAULT_SUBSTITUTION_ELASTICITY,
        help = "Substitution elasticity applied to household earnings from step 3"
    )]
    elasticity: f64,
    #[arg(long, help = "Credit per child; defaults to the jurisdiction's credit")]
    credit_per_child: Option<f64>,
    #[arg(
        long,
        help = "Budget chart substitution elasticity; defaults to the mean decile central value"
    )]
    substitution_elasticity: Option<f64>,
    #[arg(
        long,
        default_value_t = -0.05,
        allow_negative_numbers = true,
        help = "Budget chart income elasticity"
    )]
    income_elasticity: f64,
}

#[derive(Debug, Clone)]
struct RequestParams {
    config: JurisdictionConfig,
    view: CliView,
    step: u32,
    elasticity: f64,
    substitution_elasticity: f64,
    income_elasticity: f64,
}

impl RequestParams {
    fn scenario(&self) -> Scenario {
        Scenario::new(&self.config, self.elasticity)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StepsResponse {
    jurisdiction: Jurisdiction,
    steps: Vec<MicrosimStep>,
    columns: Vec<Column>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BudgetResponse {
    currency_symbol: &'static str,
    substitution_elasticity: f64,
    income_elasticity: f64,
    points: Vec<BudgetPoint>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ElasticitiesResponse {
    params: Vec<ElasticityParam>,
    income_elasticity: ElasticityRange,
    substitution_by_decile: Vec<DecileElasticity>,
    average_substitution: f64,
    capital_gains: CapitalGainsElasticity,
    sources: ElasticitySources,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

fn build_params(cli: Cli) -> Result<RequestParams, ApiError> {
    if cli.step > LAST_STEP {
        return Err(ApiError::Validation(format!(
            "--step must be between 0 and {LAST_STEP}"
        )));
    }

    if !(0.0..=1.0).contains(&cli.elasticity) {
        return Err(ApiError::Validation(
            "--elasticity must be between 0 and 1".to_string(),
        ));
    }

    if let Some(credit) = cli.credit_per_child {
        if !credit.is_finite() || credit < 0.0 {
            return Err(ApiError::Validation(
                "--credit-per-child must be >= 0".to_string(),
            ));
        }
    }

    if let Some(substitution) = cli.substitution_elasticity {
        if !(0.0..=1.0).contains(&substitution) {
            return Err(ApiError::Validation(
                "--substitution-elasticity must be between 0 and 1".to_string(),
            ));
        }
    }

    if !(-1.0..=1.0).contains(&cli.income_elasticity) {
        return Err(ApiError::Validation(
            "--income-elasticity must be between -1 and 1".to_string(),
        ));
    }

    let mut config = jurisdiction_config(cli.jurisdiction.into());
    if let Some(credit) = cli.credit_per_child {
        config.credit_per_child = credit;
    }

    Ok(RequestParams {
        config,
        view: cli.view,
        step: cli.step,
        elasticity: cli.elasticity,
        substitution_elasticity: cli
            .substitution_elasticity
            .unwrap_or_else(average_substitution),
        income_elasticity: cli.income_elasticity,
    })
}

fn default_cli_for_api() -> Cli {
    Cli {
        jurisdiction: CliJurisdiction::Us,
        view: CliView::Walkthrough,
        step: 0,
        elasticity: DEFAULT_SUBSTITUTION_ELASTICITY,
        credit_per_child: None,
        substitution_elasticity: None,
        income_elasticity: INCOME_ELASTICITY.central,
    }
}

fn params_from_walkthrough_payload(payload: WalkthroughPayload) -> Result<RequestParams, ApiError> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.jurisdiction {
        cli.jurisdiction = v.into();
    }
    if let Some(v) = payload.step {
        cli.step = v;
    }
    if let Some(v) = payload.elasticity {
        cli.elasticity = v;
    }
    if let Some(v) = payload.credit_per_child {
        cli.credit_per_child = Some(v);
    }

    build_params(cli)
}

fn params_from_budget_payload(payload: BudgetPayload) -> Result<RequestParams, ApiError> {
    let mut cli = default_cli_for_api();
    cli.view = CliView::BudgetConstraint;

    if let Some(v) = payload.jurisdiction {
        cli.jurisdiction = v.into();
    }
    if let Some(v) = payload.substitution_elasticity {
        cli.substitution_elasticity = Some(v);
    }
    if let Some(v) = payload.income_elasticity {
        cli.income_elasticity = v;
    }

    build_params(cli)
}

fn build_walkthrough(params: &RequestParams) -> WalkthroughView {
    walkthrough_view(
        &SAMPLE_HOUSEHOLDS,
        params.step,
        &params.config,
        &params.scenario(),
    )
}

fn build_steps(config: &JurisdictionConfig) -> StepsResponse {
    StepsResponse {
        jurisdiction: config.jurisdiction,
        steps: steps(config),
        columns: columns(),
    }
}

fn build_budget(params: &RequestParams) -> BudgetResponse {
    BudgetResponse {
        currency_symbol: params.config.currency_symbol,
        substitution_elasticity: params.substitution_elasticity,
        income_elasticity: params.income_elasticity,
        points: budget_constraint(params.substitution_elasticity, params.income_elasticity),
    }
}

fn build_elasticities() -> ElasticitiesResponse {
    ElasticitiesResponse {
        params: ELASTICITY_PARAMS.to_vec(),
        income_elasticity: INCOME_ELASTICITY,
        substitution_by_decile: SUBSTITUTION_BY_DECILE.to_vec(),
        average_substitution: average_substitution(),
        capital_gains: CAPITAL_GAINS,
        sources: SOURCES,
    }
}

fn render_view(params: &RequestParams) -> Result<String, ApiError> {
    let json = match params.view {
        CliView::Walkthrough => serde_json::to_string_pretty(&build_walkthrough(params))?,
        CliView::Steps => serde_json::to_string_pretty(&build_steps(&params.config))?,
        CliView::BudgetConstraint => serde_json::to_string_pretty(&build_budget(params))?,
        CliView::Elasticities => serde_json::to_string_pretty(&build_elasticities())?,
    };
    Ok(json)
}

/// Parses the process arguments and prints the selected view as JSON.
pub fn run_cli() -> Result<(), ApiError> {
    let params = build_params(Cli::parse())?;
    println!("{}", render_view(&params)?);
    Ok(())
}

pub fn router() -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/steps", get(steps_handler))
        .route("/api/elasticities", get(elasticities_handler))
        .route(
            "/api/walkthrough",
            get(walkthrough_get_handler).post(walkthrough_post_handler),
        )
        .route(
            "/api/budget-constraint",
            get(budget_get_handler).post(budget_post_handler),
        )
        .fallback(not_found_handler)
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "microsim HTTP API listening");
    tracing::info!("Local access: http://127.0.0.1:{port}/api/walkthrough");

    axum::serve(listener, router()).await
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "ok" })
}

async fn not_found_handler() -> Response {
    ApiError::NotFound.into_response()
}

async fn steps_handler(query: Result<Query<StepsQuery>, QueryRejection>) -> Response {
    let query = match extract_query(query) {
        Ok(query) => query,
        Err(err) => return reject(err),
    };
    let jurisdiction = query
        .jurisdiction
        .map_or(CliJurisdiction::Us, CliJurisdiction::from);
    let config = jurisdiction_config(jurisdiction.into());
    json_response(StatusCode::OK, build_steps(&config))
}

async fn elasticities_handler() -> Response {
    json_response(StatusCode::OK, build_elasticities())
}

async fn walkthrough_get_handler(
    payload: Result<Query<WalkthroughPayload>, QueryRejection>,
) -> Response {
    walkthrough_handler_impl(extract_query(payload))
}

async fn walkthrough_post_handler(
    payload: Result<Json<WalkthroughPayload>, JsonRejection>,
) -> Response {
    walkthrough_handler_impl(extract_json(payload))
}

fn walkthrough_handler_impl(payload: Result<WalkthroughPayload, ApiError>) -> Response {
    match payload.and_then(params_from_walkthrough_payload) {
        Ok(params) => json_response(StatusCode::OK, build_walkthrough(&params)),
        Err(err) => reject(err),
    }
}

async fn budget_get_handler(payload: Result<Query<BudgetPayload>, QueryRejection>) -> Response {
    budget_handler_impl(extract_query(payload))
}

async fn budget_post_handler(payload: Result<Json<BudgetPayload>, JsonRejection>) -> Response {
    budget_handler_impl(extract_json(payload))
}

fn budget_handler_impl(payload: Result<BudgetPayload, ApiError>) -> Response {
    match payload.and_then(params_from_budget_payload) {
        Ok(params) => json_response(StatusCode::OK, build_budget(&params)),
        Err(err) => reject(err),
    }
}

/// Maps query-string deserialization failures to a 400 with the JSON error body.
fn extract_query<T>(result: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    result
        .map(|Query(v)| v)
        .map_err(|err| ApiError::Validation(err.body_text()))
}

/// Maps malformed bodies and missing `Content-Type: application/json` to a 400.
fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| ApiError::Validation(err.body_text()))
}

fn reject(err: ApiError) -> Response {
    tracing::warn!(error = %err, "rejected request");
    err.into_response()
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}
