use super::types::{
    CapitalGainsElasticity, DecileElasticity, ElasticityParam, ElasticityRange, ElasticitySources,
};

pub const PARAMS: [ElasticityParam; 4] = [
    ElasticityParam {
        parameter: "Substitution elasticity of labor income",
        value: 0.25,
        description: "How much labor income changes in response to a 1% change in the net-of-tax rate, holding utility constant.",
        source: "Saez, Slemrod, and Giertz (2012)",
    },
    ElasticityParam {
        parameter: "Income elasticity of labor income",
        value: -0.05,
        description: "How much labor income changes in response to a 1% increase in after-tax income, holding the net-of-tax rate constant.",
        source: "CBO (2021)",
    },
    ElasticityParam {
        parameter: "Substitution elasticity of capital gains",
        value: 0.5,
        description: "How much realized capital gains change in response to tax rate changes. Captures both real and timing responses.",
        source: "CBO (2021)",
    },
    ElasticityParam {
        parameter: "Income elasticity of capital gains",
        value: 0.0,
        description: "Income effect on capital gains realization. Typically assumed to be zero as gains are discretionary.",
        source: "CBO (2021)",
    },
];

pub const INCOME_ELASTICITY: ElasticityRange = ElasticityRange {
    lower: -0.10,
    central: -0.05,
    upper: 0.0,
};

/// Realization responses to a permanent and a one-off change in the capital gains rate.
pub const CAPITAL_GAINS: CapitalGainsElasticity = CapitalGainsElasticity {
    persistent: -0.79,
    transitory: -1.2,
    source: "CBO (2012)",
};

pub const SOURCES: ElasticitySources = ElasticitySources {
    labor_supply: "CBO (2012), How the Supply of Labor Responds to Changes in Fiscal Policy",
    elasticity_review: "Saez, Slemrod, and Giertz (2012), The Elasticity of Taxable Income with Respect to Marginal Tax Rates: A Critical Review",
};

const fn decile(decile: u32, lower: f64, central: f64, upper: f64) -> DecileElasticity {
    DecileElasticity {
        decile,
        range: ElasticityRange {
            lower,
            central,
            upper,
        },
    }
}

/// Substitution elasticity of labor income by earnings decile, lowest first.
pub const SUBSTITUTION_BY_DECILE: [DecileElasticity; 10] = [
    decile(1, 0.16, 0.31, 0.46),
    decile(2, 0.14, 0.28, 0.42),
    decile(3, 0.13, 0.27, 0.40),
    decile(4, 0.13, 0.27, 0.40),
    decile(5, 0.12, 0.25, 0.38),
    decile(6, 0.12, 0.25, 0.38),
    decile(7, 0.12, 0.25, 0.38),
    decile(8, 0.12, 0.25, 0.38),
    decile(9, 0.10, 0.22, 0.34),
    decile(10, 0.10, 0.22, 0.34),
];

pub fn average_substitution() -> f64 {
    let total: f64 = SUBSTITUTION_BY_DECILE
        .iter()
        .map(|row| row.range.central)
        .sum();
    total / SUBSTITUTION_BY_DECILE.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decile_ranges_are_ordered_and_bounded() {
        for row in &SUBSTITUTION_BY_DECILE {
            assert!(row.range.lower <= row.range.central);
            assert!(row.range.central <= row.range.upper);
            assert!(row.range.lower >= 0.0 && row.range.upper <= 0.5);
        }
        let deciles: Vec<u32> = SUBSTITUTION_BY_DECILE.iter().map(|row| row.decile).collect();
        assert_eq!(deciles, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn average_substitution_is_mean_of_central_values() {
        assert!((average_substitution() - 0.257).abs() < 1e-9);
    }

    #[test]
    fn income_elasticity_range_is_non_positive() {
        assert!(INCOME_ELASTICITY.lower <= INCOME_ELASTICITY.central);
        assert!(INCOME_ELASTICITY.upper <= 0.0);
    }

    #[test]
    fn decile_serializes_flat() {
        let json = serde_json::to_string(&SUBSTITUTION_BY_DECILE[0]).expect("decile should serialize");
        assert_eq!(json, r#"{"decile":1,"lower":0.16,"central":0.31,"upper":0.46}"#);
    }

    #[test]
    fn capital_gains_transitory_response_exceeds_persistent() {
        assert!(CAPITAL_GAINS.transitory < CAPITAL_GAINS.persistent);
        assert!(CAPITAL_GAINS.persistent < 0.0);

        let json = serde_json::to_string(&CAPITAL_GAINS).expect("capital gains should serialize");
        assert_eq!(
            json,
            r#"{"persistent":-0.79,"transitory":-1.2,"source":"CBO (2012)"}"#
        );
    }

    #[test]
    fn sources_serialize_with_camel_case_keys() {
        let value = serde_json::to_value(SOURCES).expect("sources should serialize");
        assert!(value["laborSupply"].as_str().is_some_and(|s| s.starts_with("CBO")));
        assert!(
            value["elasticityReview"]
                .as_str()
                .is_some_and(|s| s.contains("Saez, Slemrod, and Giertz"))
        );
    }
}
