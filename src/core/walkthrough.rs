use serde::Serialize;

use super::engine::{AGGREGATE_STEP, LAST_STEP, Scenario, household_result, weighted_impact};
use super::format::{format_count, format_currency, format_signed, group_thousands};
use super::types::{
    Align, Column, Household, HouseholdResult, Ingredient, Jurisdiction, JurisdictionConfig,
    MicrosimStep,
};

const COLUMNS: [Column; 8] = [
    Column {
        key: "household",
        label: "Household",
        visible_from: 0,
        align: Align::Left,
    },
    Column {
        key: "earnings",
        label: "Earnings",
        visible_from: 0,
        align: Align::Right,
    },
    Column {
        key: "children",
        label: "Children",
        visible_from: 0,
        align: Align::Right,
    },
    Column {
        key: "baselineTax",
        label: "Baseline tax",
        visible_from: 1,
        align: Align::Right,
    },
    Column {
        key: "reformTax",
        label: "Reform tax",
        visible_from: 2,
        align: Align::Right,
    },
    Column {
        key: "taxChange",
        label: "Tax change",
        visible_from: 2,
        align: Align::Right,
    },
    Column {
        key: "weight",
        label: "Weight",
        visible_from: 4,
        align: Align::Right,
    },
    Column {
        key: "impact",
        label: "Revenue impact",
        visible_from: 4,
        align: Align::Right,
    },
];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub household_id: Option<u32>,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkthroughView {
    pub jurisdiction: Jurisdiction,
    pub currency_symbol: &'static str,
    pub credit_per_child: f64,
    pub elasticity: f64,
    pub step: MicrosimStep,
    pub columns: Vec<Column>,
    pub rows: Vec<TableRow>,
    pub results: Vec<HouseholdResult>,
    pub total_impact: f64,
    pub total_row: Option<TableRow>,
}

pub fn steps(config: &JurisdictionConfig) -> Vec<MicrosimStep> {
    let credit_label = format!(
        "{}{}/child tax credit",
        config.currency_symbol,
        group_thousands(config.credit_per_child)
    );
    let behavioral_title = format!("Model {} responses", config.behavioral_adjective);

    vec![
        MicrosimStep {
            id: 0,
            title: "Start with households".to_string(),
            description:
                "A representative sample of households, each with their own characteristics."
                    .to_string(),
            ingredient: Some(Ingredient::Households),
        },
        MicrosimStep {
            id: 1,
            title: "Calculate baseline taxes".to_string(),
            description:
                "Apply current tax rules to each household to compute their tax liability."
                    .to_string(),
            ingredient: Some(Ingredient::Policies),
        },
        MicrosimStep {
            id: 2,
            title: "Calculate reform taxes".to_string(),
            description: format!(
                "Apply the proposed reform (e.g., {credit_label}) to compute new tax liability."
            ),
            ingredient: Some(Ingredient::Policies),
        },
        MicrosimStep {
            id: 3,
            title: behavioral_title,
            description: format!(
                "People change their {} in response to tax changes. Using elasticity of taxable income, we estimate how earnings shift.",
                config.behavior_noun
            ),
            ingredient: Some(Ingredient::Dynamics),
        },
        MicrosimStep {
            id: 4,
            title: "Weight and aggregate".to_string(),
            description: "Each household represents many real households. Multiply by survey weights and sum for population-level estimates.".to_string(),
            ingredient: None,
        },
    ]
}

pub fn columns() -> Vec<Column> {
    COLUMNS.to_vec()
}

pub fn visible_columns(step: u32) -> Vec<Column> {
    COLUMNS
        .iter()
        .filter(|column| column.visible_from <= step)
        .cloned()
        .collect()
}

/// Formatted cell for every column key, in column order.
pub fn cell_values(
    household: &Household,
    step: u32,
    config: &JurisdictionConfig,
    scenario: &Scenario,
) -> Vec<(&'static str, String)> {
    let result = household_result(scenario, household, step);
    let currency = config.currency_symbol;

    vec![
        ("household", household.name.to_string()),
        ("earnings", format_currency(result.adjusted_earnings, currency)),
        ("children", household.children.to_string()),
        ("baselineTax", format_currency(result.baseline_tax, currency)),
        ("reformTax", format_currency(result.reform_tax, currency)),
        ("taxChange", format_signed(result.tax_change, currency)),
        ("weight", format_count(household.weight)),
        ("impact", format_signed(result.weighted_impact, currency)),
    ]
}

/// Total row: only the impact cell is filled.
pub fn total_row(
    households: &[Household],
    step: u32,
    config: &JurisdictionConfig,
    scenario: &Scenario,
) -> Vec<(&'static str, String)> {
    total_cells(weighted_impact(scenario, households, step), config)
}

fn total_cells(total: f64, config: &JurisdictionConfig) -> Vec<(&'static str, String)> {
    COLUMNS
        .iter()
        .map(|column| {
            let value = match column.key {
                "household" => "Total".to_string(),
                "impact" => format_signed(total, config.currency_symbol),
                _ => String::new(),
            };
            (column.key, value)
        })
        .collect()
}

pub fn walkthrough_view(
    households: &[Household],
    step: u32,
    config: &JurisdictionConfig,
    scenario: &Scenario,
) -> WalkthroughView {
    let step = step.min(LAST_STEP);
    let columns = visible_columns(step);
    let project = |cells: Vec<(&'static str, String)>| -> Vec<String> {
        cells
            .into_iter()
            .filter(|(key, _)| columns.iter().any(|column| column.key == *key))
            .map(|(_, value)| value)
            .collect()
    };

    let rows = households
        .iter()
        .map(|household| TableRow {
            household_id: Some(household.id),
            cells: project(cell_values(household, step, config, scenario)),
        })
        .collect();
    let results: Vec<HouseholdResult> = households
        .iter()
        .map(|household| household_result(scenario, household, step))
        .collect();
    let total_impact: f64 = results.iter().map(|result| result.weighted_impact).sum();
    let total = (step >= AGGREGATE_STEP).then(|| TableRow {
        household_id: None,
        cells: project(total_cells(total_impact, config)),
    });

    let mut descriptors = steps(config);
    let descriptor = descriptors.swap_remove(step as usize);

    WalkthroughView {
        jurisdiction: config.jurisdiction,
        currency_symbol: config.currency_symbol,
        credit_per_child: scenario.policy.credit_per_child,
        elasticity: scenario.elasticity,
        step: descriptor,
        columns,
        rows,
        results,
        total_impact,
        total_row: total,
    }
}
