use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Jurisdiction {
    Us,
    Uk,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Ingredient {
    Policies,
    Households,
    Dynamics,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Household {
    pub id: u32,
    pub name: &'static str,
    pub earnings: f64,
    pub children: u32,
    pub weight: f64,
}

/// One slice of a progressive schedule. `upper_bound: None` marks the top bracket.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bracket {
    pub upper_bound: Option<f64>,
    pub rate: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxSchedule {
    pub brackets: Vec<Bracket>,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReformPolicy {
    pub credit_per_child: f64,
}

/// Locale-specific settings for one jurisdiction. The calculator never looks
/// at the jurisdiction itself, only at these resolved values.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JurisdictionConfig {
    pub jurisdiction: Jurisdiction,
    pub currency_symbol: &'static str,
    pub credit_per_child: f64,
    pub behavior_noun: &'static str,
    pub behavioral_adjective: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdResult {
    pub household_id: u32,
    pub earnings: f64,
    pub adjusted_earnings: f64,
    pub baseline_tax: f64,
    pub reform_tax: f64,
    pub tax_change: f64,
    pub weight: f64,
    pub weighted_impact: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MicrosimStep {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub ingredient: Option<Ingredient>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub key: &'static str,
    pub label: &'static str,
    pub visible_from: u32,
    pub align: Align,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPoint {
    pub hours: u32,
    pub baseline: f64,
    pub reform: f64,
    pub behavioral: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElasticityParam {
    pub parameter: &'static str,
    pub value: f64,
    pub description: &'static str,
    pub source: &'static str,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElasticityRange {
    pub lower: f64,
    pub central: f64,
    pub upper: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecileElasticity {
    pub decile: u32,
    #[serde(flatten)]
    pub range: ElasticityRange,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalGainsElasticity {
    pub persistent: f64,
    pub transitory: f64,
    pub source: &'static str,
}

/// Citations shown under the elasticity tables.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElasticitySources {
    pub labor_supply: &'static str,
    pub elasticity_review: &'static str,
}
