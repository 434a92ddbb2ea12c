use super::types::{
    Bracket, Household, HouseholdResult, Jurisdiction, JurisdictionConfig, ReformPolicy,
    TaxSchedule,
};

/// First step whose reform leg runs on behaviorally adjusted earnings.
pub const BEHAVIORAL_STEP: u32 = 3;
/// First step that shows weights and the aggregate total.
pub const AGGREGATE_STEP: u32 = 4;
pub const LAST_STEP: u32 = 4;

pub const DEFAULT_SUBSTITUTION_ELASTICITY: f64 = 0.25;

pub static SAMPLE_HOUSEHOLDS: [Household; 5] = [
    Household {
        id: 1,
        name: "Household A",
        earnings: 30_000.0,
        children: 2,
        weight: 25_000.0,
    },
    Household {
        id: 2,
        name: "Household B",
        earnings: 75_000.0,
        children: 1,
        weight: 35_000.0,
    },
    Household {
        id: 3,
        name: "Household C",
        earnings: 120_000.0,
        children: 0,
        weight: 28_000.0,
    },
    Household {
        id: 4,
        name: "Household D",
        earnings: 50_000.0,
        children: 3,
        weight: 42_000.0,
    },
    Household {
        id: 5,
        name: "Household E",
        earnings: 200_000.0,
        children: 1,
        weight: 20_000.0,
    },
];

/// Everything the calculator needs for one evaluation pass.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub schedule: TaxSchedule,
    pub policy: ReformPolicy,
    pub elasticity: f64,
}

impl Scenario {
    pub fn new(config: &JurisdictionConfig, elasticity: f64) -> Self {
        Self {
            schedule: default_schedule(),
            policy: ReformPolicy {
                credit_per_child: config.credit_per_child,
            },
            elasticity,
        }
    }
}

pub fn default_schedule() -> TaxSchedule {
    TaxSchedule {
        brackets: vec![
            Bracket {
                upper_bound: Some(40_000.0),
                rate: 0.10,
            },
            Bracket {
                upper_bound: Some(85_000.0),
                rate: 0.22,
            },
            Bracket {
                upper_bound: None,
                rate: 0.32,
            },
        ],
    }
}

pub fn jurisdiction_config(jurisdiction: Jurisdiction) -> JurisdictionConfig {
    match jurisdiction {
        Jurisdiction::Us => JurisdictionConfig {
            jurisdiction,
            currency_symbol: "$",
            credit_per_child: 3_000.0,
            behavior_noun: "behavior",
            behavioral_adjective: "behavioral",
        },
        Jurisdiction::Uk => JurisdictionConfig {
            jurisdiction,
            currency_symbol: "£",
            credit_per_child: 2_000.0,
            behavior_noun: "behaviour",
            behavioral_adjective: "behavioural",
        },
    }
}

/// Progressive tax under `schedule`. Each bracket's slice is rounded on its own.
pub fn baseline_tax(schedule: &TaxSchedule, earnings: f64) -> f64 {
    let earnings = earnings.max(0.0);
    let mut tax = 0.0;
    let mut lower = 0.0;

    for bracket in &schedule.brackets {
        match bracket.upper_bound {
            Some(upper) if earnings > upper => {
                tax += ((upper - lower) * bracket.rate).round();
                lower = upper;
            }
            _ => {
                tax += ((earnings - lower) * bracket.rate).round();
                return tax;
            }
        }
    }

    tax
}

/// Rate of the bracket containing `earnings`; a boundary belongs to the lower bracket.
pub fn marginal_rate(schedule: &TaxSchedule, earnings: f64) -> f64 {
    schedule
        .brackets
        .iter()
        .find(|bracket| bracket.upper_bound.is_none_or(|upper| earnings <= upper))
        .or_else(|| schedule.brackets.last())
        .map_or(0.0, |bracket| bracket.rate)
}

pub fn reform_tax(
    schedule: &TaxSchedule,
    earnings: f64,
    children: u32,
    policy: &ReformPolicy,
) -> f64 {
    let credit = children as f64 * policy.credit_per_child;
    (baseline_tax(schedule, earnings) - credit).max(0.0)
}

/// Earnings after a substitution response to the credit-driven drop in the
/// marginal rate. Zero earnings and a 100% marginal rate leave earnings as-is.
pub fn behavioral_earnings(
    schedule: &TaxSchedule,
    earnings: f64,
    children: u32,
    policy: &ReformPolicy,
    elasticity: f64,
) -> f64 {
    if earnings <= 0.0 {
        return earnings;
    }

    let mtr_before = marginal_rate(schedule, earnings);
    if mtr_before >= 1.0 {
        return earnings;
    }

    let credit_rate = if children > 0 {
        children as f64 * policy.credit_per_child / earnings
    } else {
        0.0
    };
    let mtr_after = (mtr_before - credit_rate).max(0.0);
    let pct_change = -elasticity * (mtr_after - mtr_before) / (1.0 - mtr_before);

    (earnings * (1.0 + pct_change)).round()
}

pub fn household_result(scenario: &Scenario, household: &Household, step: u32) -> HouseholdResult {
    let adjusted_earnings = if step >= BEHAVIORAL_STEP {
        behavioral_earnings(
            &scenario.schedule,
            household.earnings,
            household.children,
            &scenario.policy,
            scenario.elasticity,
        )
    } else {
        household.earnings
    };

    let baseline = baseline_tax(&scenario.schedule, household.earnings);
    let reform = reform_tax(
        &scenario.schedule,
        adjusted_earnings,
        household.children,
        &scenario.policy,
    );
    let tax_change = reform - baseline;

    HouseholdResult {
        household_id: household.id,
        earnings: household.earnings,
        adjusted_earnings,
        baseline_tax: baseline,
        reform_tax: reform,
        tax_change,
        weight: household.weight,
        weighted_impact: tax_change * household.weight,
    }
}

pub fn household_results(
    scenario: &Scenario,
    households: &[Household],
    step: u32,
) -> Vec<HouseholdResult> {
    households
        .iter()
        .map(|household| household_result(scenario, household, step))
        .collect()
}

/// Population-level revenue change: sum of per-household tax change times weight.
pub fn weighted_impact(scenario: &Scenario, households: &[Household], step: u32) -> f64 {
    households
        .iter()
        .map(|household| household_result(scenario, household, step).weighted_impact)
        .sum()
}
