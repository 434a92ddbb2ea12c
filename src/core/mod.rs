mod budget;
mod elasticities;
mod engine;
mod format;
mod types;
mod walkthrough;

pub use budget::budget_constraint;
pub use elasticities::{
    CAPITAL_GAINS, INCOME_ELASTICITY, PARAMS as ELASTICITY_PARAMS, SOURCES,
    SUBSTITUTION_BY_DECILE, average_substitution,
};
pub use engine::{
    AGGREGATE_STEP, BEHAVIORAL_STEP, DEFAULT_SUBSTITUTION_ELASTICITY, LAST_STEP,
    SAMPLE_HOUSEHOLDS, Scenario, baseline_tax, behavioral_earnings, default_schedule,
    household_result, household_results, jurisdiction_config, marginal_rate, reform_tax,
    weighted_impact,
};
pub use format::{format_count, format_currency, format_signed};
pub use types::{
    Align, BudgetPoint, CapitalGainsElasticity, Column, DecileElasticity, ElasticityParam,
    ElasticityRange, ElasticitySources, Household, HouseholdResult, Ingredient, Jurisdiction, JurisdictionConfig,
    MicrosimStep, ReformPolicy, TaxSchedule,
};
pub use walkthrough::{
    TableRow, WalkthroughView, cell_values, columns, steps, total_row, visible_columns,
    walkthrough_view,
};
