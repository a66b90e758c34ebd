//! Level annuity cash flow helpers.
//!
//! The model treats an AI investment as a single outlay at `t = 0` followed
//! by the same net cash flow at the end of every year of the horizon.

/// `(1 + rate)^year`, saturating the exponent for horizons past `i32::MAX`.
fn compound(growth: f64, year: u32) -> f64 {
    growth.powi(i32::try_from(year).unwrap_or(i32::MAX))
}

/// Net present value of `-initial_investment` now plus `cash_flow` at the
/// end of years `1..=years`, discounted at `rate` (a fraction, 0.08 = 8%).
pub fn npv(rate: f64, initial_investment: f64, cash_flow: f64, years: u32) -> f64 {
    let growth = 1.0 + rate;
    (1..=years).fold(-initial_investment, |acc, year| {
        acc + cash_flow / compound(growth, year)
    })
}

/// First year in which cumulative discounted cash flow covers the outlay.
///
/// Falls back to `years` when the investment is never recovered.
pub fn discounted_payback_period(
    rate: f64,
    initial_investment: f64,
    cash_flow: f64,
    years: u32,
) -> u32 {
    let growth = 1.0 + rate;
    let mut cumulative = 0.0;
    for year in 1..=years {
        cumulative += cash_flow / compound(growth, year);
        if cumulative >= initial_investment {
            return year;
        }
    }
    years
}

/// ROI for each year of the horizon, in percent.
///
/// The denominator starts at the initial investment and grows by the
/// recurring annual cost after each year.
pub fn roi_trend(
    initial_investment: f64,
    cash_flow: f64,
    annual_cost: f64,
    years: u32,
) -> Vec<f64> {
    let mut cumulative_investment = initial_investment;
    (1..=years)
        .map(|year| {
            let roi = (cash_flow * f64::from(year) - cumulative_investment)
                / cumulative_investment
                * 100.0;
            cumulative_investment += annual_cost;
            roi
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_npv_zero_rate_is_undiscounted_sum() {
        assert_relative_eq!(npv(0.0, 100.0, 30.0, 5), 50.0);
    }

    #[test]
    fn test_npv_matches_annuity_formula() {
        let rate: f64 = 0.08;
        let annuity = (1.0 - (1.0 + rate).powi(-5)) / rate;
        assert_relative_eq!(
            npv(rate, 216_000.0, 558_000.0, 5),
            558_000.0 * annuity - 216_000.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_compound_saturates_large_years() {
        assert_eq!(compound(1.1, 0), 1.0);
        assert_relative_eq!(compound(1.1, 3), 1.331, max_relative = 1e-12);
        assert_eq!(compound(1.1, u32::MAX), f64::INFINITY);
        assert_eq!(compound(0.5, u32::MAX), 0.0);
    }

    #[test]
    fn test_discounted_payback() {
        // 40 per year at 10%: 36.4, 69.4, 99.5, 126.8
        assert_eq!(discounted_payback_period(0.10, 100.0, 40.0, 10), 4);
        assert_eq!(discounted_payback_period(0.10, 10.0, 40.0, 10), 1);
    }

    #[test]
    fn test_discounted_payback_defaults_to_horizon() {
        assert_eq!(discounted_payback_period(0.10, 1_000.0, 40.0, 5), 5);
        assert_eq!(discounted_payback_period(0.10, 1_000.0, -40.0, 3), 3);
    }

    #[test]
    fn test_roi_trend_grows_denominator() {
        let trend = roi_trend(100.0, 60.0, 10.0, 3);
        assert_eq!(trend.len(), 3);
        assert_relative_eq!(trend[0], -40.0);
        assert_relative_eq!(trend[1], (120.0 - 110.0) / 110.0 * 100.0);
        assert_relative_eq!(trend[2], (180.0 - 120.0) / 120.0 * 100.0);
    }
}
