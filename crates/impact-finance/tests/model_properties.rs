//! Property tests for the financial model and the IRR search.

use approx::assert_relative_eq;
use impact_finance::prelude::*;
use proptest::prelude::*;

// =============================================================================
// FIXTURES
// =============================================================================

/// Investment, level cash flow and horizon with an IRR inside (0%, 100%).
fn arb_bracketed_flows() -> impl Strategy<Value = (f64, f64, u32)> {
    (1_000.0f64..5_000_000.0, 0.05f64..0.9, 1u32..15).prop_filter_map(
        "IRR outside [0, 1]",
        |(investment, ratio, years)| {
            let cash_flow = investment * ratio;
            let at_zero = npv(0.0, investment, cash_flow, years);
            let at_one = npv(1.0, investment, cash_flow, years);
            (at_zero > 0.0 && at_one < 0.0).then_some((investment, cash_flow, years))
        },
    )
}

fn arb_params() -> impl Strategy<Value = ImpactParameters> {
    (
        1u32..50,
        30_000.0f64..250_000.0,
        1.0f64..60.0,
        0.0f64..30.0,
        1u32..10,
        0.0f64..3_000_000.0,
        0.0f64..100.0,
    )
        .prop_map(
            |(team_size, avg_salary, efficiency_gain, discount_rate, years, license, errors)| {
                ImpactParameters {
                    team_size,
                    avg_salary,
                    efficiency_gain,
                    discount_rate,
                    project_duration: years,
                    license_cost: license,
                    error_reduction: errors,
                    ..Default::default()
                }
            },
        )
}

/// Writes an out-of-range value into the named field.
fn break_field(params: &ImpactParameters, index: usize) -> (&'static str, ImpactParameters) {
    let (field, _, range) = params.fields()[index];
    let bad = match range {
        FieldRange::AtLeast(min) => min - 1.0,
        FieldRange::Between(_, max) => max + 1.0,
    };

    let mut value = serde_json::to_value(params).unwrap();
    value[field] = if value[field].is_u64() {
        serde_json::json!(bad as u64)
    } else {
        serde_json::json!(bad)
    };
    (field, serde_json::from_value(value).unwrap())
}

// =============================================================================
// IRR
// =============================================================================

proptest! {
    #[test]
    fn irr_lies_within_half_a_bracket_of_the_root((investment, cash_flow, years) in arb_bracketed_flows()) {
        let config = IrrConfig::default();
        let rate = irr(investment, cash_flow, years, &config).unwrap() / 100.0;

        prop_assert!(npv(rate - config.tolerance / 2.0, investment, cash_flow, years) >= 0.0);
        prop_assert!(npv(rate + config.tolerance / 2.0, investment, cash_flow, years) <= 0.0);
    }

    #[test]
    fn irr_zeroes_npv_relative_to_investment((investment, cash_flow, years) in arb_bracketed_flows()) {
        let config = IrrConfig::default();
        let rate = irr(investment, cash_flow, years, &config).unwrap() / 100.0;

        prop_assert!(npv(rate, investment, cash_flow, years).abs() <= 1e-4 * investment);
    }

    #[test]
    fn npv_decreases_with_discount_rate(
        investment in 0.0f64..1e6,
        cash_flow in 1.0f64..1e6,
        years in 1u32..30,
        low in 0.0f64..0.5,
        step in 0.001f64..0.5,
    ) {
        prop_assert!(npv(low + step, investment, cash_flow, years) < npv(low, investment, cash_flow, years));
    }
}

// =============================================================================
// MODEL
// =============================================================================

proptest! {
    #[test]
    fn evaluate_either_brackets_irr_or_reports_no_root(params in arb_params()) {
        match evaluate(&params) {
            Ok(results) => {
                let i = results.investment;
                prop_assert!((0.0..=100.0).contains(&i.irr));
                let rate = i.irr / 100.0;
                let slack = IrrConfig::default().tolerance;
                let years = params.project_duration;
                prop_assert!(npv((rate - slack).max(0.0), i.initial_investment, i.annual_cash_flow, years) >= 0.0);
                prop_assert!(npv((rate + slack).min(1.0), i.initial_investment, i.annual_cash_flow, years) <= 0.0);
            }
            Err(FinanceError::NoRootInDomain { npv_at_lower, npv_at_upper, .. }) => {
                prop_assert_eq!(npv_at_lower.signum(), npv_at_upper.signum());
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    #[test]
    fn npv_output_decreases_with_discount_rate(params in arb_params(), bump in 0.5f64..20.0) {
        let model = ImpactModel::new(
            ModelConfig::default().with_irr(IrrConfig::default().with_bounds(-0.99, 1_000.0)),
        );
        let higher = ImpactParameters {
            discount_rate: (params.discount_rate + bump).min(100.0),
            ..params.clone()
        };
        prop_assume!(higher.discount_rate > params.discount_rate);

        if let (Ok(base), Ok(raised)) = (model.evaluate(&params), model.evaluate(&higher)) {
            if base.investment.annual_cash_flow > 0.0 {
                prop_assert!(raised.investment.npv < base.investment.npv);
            }
        }
    }

    #[test]
    fn out_of_range_field_is_named(index in 0usize..32) {
        let (field, params) = break_field(&ImpactParameters::default(), index);

        let err = evaluate(&params).unwrap_err();

        prop_assert_eq!(err.field(), Some(field));
    }
}

// =============================================================================
// SCENARIOS
// =============================================================================

#[test]
fn ten_person_team_savings() {
    let model = ImpactModel::new(
        ModelConfig::default().with_irr(IrrConfig::default().with_bounds(0.0, 10.0)),
    );
    let results = model
        .evaluate(&ImpactParameters {
            team_size: 10,
            avg_salary: 120_000.0,
            efficiency_gain: 25.0,
            error_reduction: 30.0,
            time_savings: 20.0,
            maintenance_reduction: 15.0,
            ..Default::default()
        })
        .unwrap();

    assert_relative_eq!(results.savings.annual_team_cost, 1_200_000.0);
    assert_relative_eq!(results.savings.efficiency, 300_000.0);
    assert_relative_eq!(results.savings.error_reduction, 108_000.0);
    assert_relative_eq!(results.savings.time, 240_000.0);
    assert_relative_eq!(results.savings.maintenance, 36_000.0);
    assert_relative_eq!(results.savings.total, 684_000.0);
}

#[test]
fn expensive_rollout_has_irr_inside_default_range() {
    let results = evaluate(&ImpactParameters {
        license_cost: 1_500_000.0,
        ..Default::default()
    })
    .unwrap();

    let i = results.investment;
    assert!(i.irr > 0.0 && i.irr < 100.0);
    assert!(
        npv(i.irr / 100.0, i.initial_investment, i.annual_cash_flow, 5).abs()
            <= 1e-4 * i.annual_cash_flow * 15.0
    );
    assert!(i.discounted_payback_period > 1);
}

#[test]
fn parameters_round_trip_through_toml() {
    let params = ImpactParameters {
        team_size: 25,
        monthly_cloud_cost: 4_200.0,
        ..Default::default()
    };
    let text = params.to_toml_string().unwrap();
    assert_eq!(ImpactParameters::from_toml_str(&text).unwrap(), params);
}
