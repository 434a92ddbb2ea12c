//! Budget constraint for the behavioral responses chart: weekly after-tax
//! income by hours worked under the baseline, a static reform, and the
//! reform after an elasticity response.

use super::types::BudgetPoint;

pub const HOURLY_WAGE: f64 = 25.0;
pub const FULL_TIME_HOURS: f64 = 40.0;
pub const MAX_HOURS: u32 = 60;
pub const HOURS_STEP: usize = 2;

pub const BASELINE_RATE: f64 = 0.10;
pub const UPPER_RATE: f64 = 0.22;
/// Full-time earnings above which the upper rate applies, pro-rated by hours.
pub const UPPER_RATE_THRESHOLD: f64 = 50_000.0;
/// Percentage-point cut applied to the baseline rate by the illustrative reform.
pub const REFORM_RATE_CUT: f64 = 0.05;

pub fn budget_constraint(substitution_elasticity: f64, income_elasticity: f64) -> Vec<BudgetPoint> {
    (0..=MAX_HOURS)
        .step_by(HOURS_STEP)
        .map(|hours| budget_point(hours, substitution_elasticity, income_elasticity))
        .collect()
}

fn baseline_rate(gross: f64, hours: f64) -> f64 {
    if gross > UPPER_RATE_THRESHOLD * (hours / FULL_TIME_HOURS) {
        UPPER_RATE
    } else {
        BASELINE_RATE
    }
}

fn budget_point(hours: u32, substitution_elasticity: f64, income_elasticity: f64) -> BudgetPoint {
    let gross = hours as f64 * HOURLY_WAGE;
    let baseline_rate = baseline_rate(gross, hours as f64);
    let reform_rate = (baseline_rate - REFORM_RATE_CUT).max(0.0);

    let baseline_net = (gross * (1.0 - baseline_rate)).round();
    let reform_net = (gross * (1.0 - reform_rate)).round();

    let ntr_change = (1.0 - reform_rate) / (1.0 - baseline_rate) - 1.0;
    let income_change = (reform_net - baseline_net) / baseline_net.max(1.0);
    let earnings_change = substitution_elasticity * ntr_change + income_elasticity * income_change;

    BudgetPoint {
        hours,
        baseline: baseline_net,
        reform: reform_net,
        behavioral: (reform_net * (1.0 + earnings_change)).round(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, proptest};

    #[test]
    fn budget_constraint_covers_zero_to_sixty_hours() {
        let points = budget_constraint(0.25, -0.05);
        assert_eq!(points.len(), 31);
        assert_eq!(points[0].hours, 0);
        assert_eq!(points[30].hours, 60);
        assert_eq!(points[0].baseline, 0.0);
        assert_eq!(points[0].behavioral, 0.0);
    }

    #[test]
    fn budget_point_matches_hand_calculation_at_part_time_hours() {
        // 20h: 500/week at 10% baseline, 5% reform.
        let points = budget_constraint(0.25, -0.05);
        let point = &points[10];
        assert_eq!(point.hours, 20);
        assert_eq!(point.baseline, 450.0);
        assert_eq!(point.reform, 475.0);
        // ntr +5.5556%, income +5.5556%: net effect 0.2 * 5.5556% = 1.1111%.
        assert_eq!(point.behavioral, 480.0);
    }

    #[test]
    fn budget_point_stays_in_baseline_rate_at_full_time_hours() {
        // 40h: 1,000/week is below the pro-rated 50,000 threshold.
        let points = budget_constraint(0.0, 0.0);
        let point = &points[20];
        assert_eq!(point.hours, 40);
        assert_eq!(point.baseline, 900.0);
        assert_eq!(point.reform, 950.0);
        assert_eq!(point.behavioral, 950.0);
    }

    #[test]
    fn baseline_rate_switches_above_pro_rated_threshold() {
        assert_eq!(baseline_rate(1_000.0, 40.0), BASELINE_RATE);
        assert_eq!(baseline_rate(50_001.0, 40.0), UPPER_RATE);
        assert_eq!(baseline_rate(0.0, 0.0), BASELINE_RATE);
    }

    #[test]
    fn every_chart_point_uses_baseline_rate_at_default_wage() {
        for point in budget_constraint(0.0, 0.0) {
            let gross = point.hours as f64 * HOURLY_WAGE;
            assert_eq!(point.baseline, (gross * (1.0 - BASELINE_RATE)).round());
        }
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_reform_never_below_baseline(
            substitution_bp in 0u32..5_000,
            income_bp in 0u32..1_000,
        ) {
            let points = budget_constraint(
                substitution_bp as f64 / 10_000.0,
                -(income_bp as f64) / 10_000.0,
            );
            for point in points {
                prop_assert!(point.reform >= point.baseline);
                prop_assert!(point.behavioral.is_finite());
            }
        }
    }
}
