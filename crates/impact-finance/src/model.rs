//! The financial impact model.
//!
//! [`evaluate`] turns an [`ImpactParameters`] record into an
//! [`ImpactResults`] record. It is a pure function: parameters are validated
//! once up front, then every output is computed in one pass.
//!
//! # Formulas
//!
//! | Quantity | Definition |
//! |----------|------------|
//! | initial cost | license + infrastructure + integration + data migration + security audit + data privacy + certification |
//! | training cost | training + training hours × rate × team size + documentation |
//! | annual cost | maintenance + 12 × (cloud + API) + support + retraining |
//! | indirect cost | loss days × team size × salary / 260 + transition support + risk mitigation |
//! | net savings | efficiency + 0.3 × error + time + 0.2 × maintenance savings − annual cost |
//! | annual cash flow | net savings − annual cost |
//! | NPV | −initial investment + Σ cash flow / (1 + r)^y |
//!
//! # Example
//!
//! ```rust
//! use impact_finance::{evaluate, ImpactParameters};
//!
//! let params = ImpactParameters {
//!     license_cost: 1_500_000.0,
//!     ..Default::default()
//! };
//! let results = evaluate(&params).unwrap();
//! assert!(results.investment.irr > 0.0 && results.investment.irr < 100.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::cashflow::{discounted_payback_period, npv, roi_trend};
use crate::error::{FinanceError, FinanceResult};
use crate::irr::{irr, IrrConfig};
use crate::params::ImpactParameters;
use crate::results::{
    breakdown, CostTotals, EfficiencyRatios, ImpactResults, InvestmentMetrics,
    ProductivityMetrics, RoiPoint, Savings,
};

/// Working days per year used to turn a salary into a daily cost.
pub const WORKING_DAYS_PER_YEAR: f64 = 260.0;

/// Share of team time spent on fixing defects.
pub const ERROR_WORK_SHARE: f64 = 0.30;

/// Share of team time spent on maintenance.
pub const MAINTENANCE_WORK_SHARE: f64 = 0.20;

/// Weeks per month used for sprint arithmetic.
pub const WEEKS_PER_MONTH: f64 = 4.0;

/// Model configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelConfig {
    /// IRR search range and precision.
    #[serde(default)]
    pub irr: IrrConfig,
}

impl ModelConfig {
    /// Sets the IRR search configuration.
    #[must_use]
    pub fn with_irr(mut self, irr: IrrConfig) -> Self {
        self.irr = irr;
        self
    }
}

/// Financial impact model.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImpactModel {
    config: ModelConfig,
}

impl ImpactModel {
    /// Creates a model with the given configuration.
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Evaluates the model.
    ///
    /// # Errors
    ///
    /// - [`FinanceError::InvalidParameter`] for a field outside its range, or
    ///   when a derived denominator (`total_ai_cost`, `net_savings`,
    ///   `initial_investment`) is not usable
    /// - [`FinanceError::NoRootInDomain`] when the IRR is outside the
    ///   configured search range
    pub fn evaluate(&self, params: &ImpactParameters) -> FinanceResult<ImpactResults> {
        params.validate()?;

        let team_size = f64::from(params.team_size);
        let pct = |value: f64| value / 100.0;

        // Costs
        let compliance =
            params.security_audit + params.data_privacy + params.compliance_certification;
        let initial = params.license_cost
            + params.infrastructure_cost
            + params.integration_cost
            + params.data_migration_cost
            + compliance;
        let training = params.training_cost
            + params.developer_training_hours * params.training_rate * team_size
            + params.documentation_cost;
        let annual = params.annual_maintenance
            + 12.0 * params.monthly_cloud_cost
            + 12.0 * params.monthly_api_cost
            + params.annual_support_contract
            + params.annual_model_retraining;
        let indirect = params.productivity_loss_days
            * team_size
            * (params.avg_salary / WORKING_DAYS_PER_YEAR)
            + params.transition_support
            + params.risk_mitigation;
        let total_ai = initial + training + annual + indirect;

        if total_ai <= 0.0 {
            return Err(FinanceError::invalid_parameter(
                "total_ai_cost",
                "must be greater than 0; every cost input is zero",
            ));
        }

        // Savings
        let annual_team_cost = team_size * params.avg_salary;
        let efficiency = annual_team_cost * pct(params.efficiency_gain);
        let error_reduction =
            annual_team_cost * pct(params.error_reduction) * ERROR_WORK_SHARE;
        let time = annual_team_cost * pct(params.time_savings);
        let maintenance =
            annual_team_cost * pct(params.maintenance_reduction) * MAINTENANCE_WORK_SHARE;
        let total_savings = efficiency + error_reduction + time + maintenance;
        let net = total_savings - annual;

        if net == 0.0 {
            return Err(FinanceError::invalid_parameter(
                "net_savings",
                "must not be zero; total savings exactly equal the annual cost",
            ));
        }

        let initial_investment = initial + training + indirect;
        if initial_investment <= 0.0 {
            return Err(FinanceError::invalid_parameter(
                "initial_investment",
                "must be greater than 0; setup, training and indirect costs are all zero",
            ));
        }

        // Productivity
        let features_per_month =
            params.features_per_sprint * (WEEKS_PER_MONTH / params.sprint_duration_weeks);
        let new_cycle_time = params.current_cycle_time * (1.0 - pct(params.efficiency_gain));
        let cycle_time_reduction = params.current_cycle_time - new_cycle_time;
        let new_velocity = params.current_velocity * (1.0 + pct(params.efficiency_gain));
        let productivity_gain =
            (new_velocity - params.current_velocity) / params.current_velocity * 100.0;
        let additional_features_per_month = features_per_month * pct(params.efficiency_gain);
        let total_features_per_month = features_per_month + additional_features_per_month;

        // Investment
        let rate = pct(params.discount_rate);
        let years = params.project_duration;
        let annual_cash_flow = net - annual;
        let npv_value = npv(rate, initial_investment, annual_cash_flow, years);
        let irr_value = irr(initial_investment, annual_cash_flow, years, &self.config.irr)?;

        // Ratios
        let current_feature_cost = annual_team_cost / (features_per_month * 12.0);
        let new_feature_cost = annual_team_cost / (total_features_per_month * 12.0);
        let ai_cost_per_feature = total_ai / (additional_features_per_month * 12.0);

        let results = ImpactResults {
            costs: CostTotals {
                initial,
                training,
                annual,
                indirect,
                compliance,
                total_ai,
            },
            savings: Savings {
                annual_team_cost,
                efficiency,
                error_reduction,
                time,
                maintenance,
                total: total_savings,
                net,
                monthly: net / 12.0,
                daily: net / 365.0,
            },
            investment: InvestmentMetrics {
                roi: (net - total_ai) / total_ai * 100.0,
                payback_period: total_ai / net,
                initial_investment,
                annual_cash_flow,
                npv: npv_value,
                irr: irr_value,
                profitability_index: (npv_value + initial_investment) / initial_investment,
                discounted_payback_period: discounted_payback_period(
                    rate,
                    initial_investment,
                    annual_cash_flow,
                    years,
                ),
            },
            productivity: ProductivityMetrics {
                current_cycle_time: params.current_cycle_time,
                new_cycle_time,
                cycle_time_reduction,
                cycle_time_improvement: cycle_time_reduction / params.current_cycle_time * 100.0,
                current_velocity: params.current_velocity,
                new_velocity,
                velocity_improvement: productivity_gain,
                current_features_per_month: features_per_month,
                additional_features_per_month,
                total_features_per_month,
            },
            ratios: EfficiencyRatios {
                roi_per_employee: (net - total_ai) / team_size,
                cost_savings_ratio: total_savings / total_ai,
                ai_investment_efficiency: net / total_ai,
                annual_savings_per_employee: net / team_size,
                current_feature_cost,
                new_feature_cost,
                feature_cost_reduction: (current_feature_cost - new_feature_cost)
                    / current_feature_cost
                    * 100.0,
                ai_cost_per_feature,
                break_even_features: total_ai / (current_feature_cost - new_feature_cost),
                ai_impact_score: 0.3 * params.efficiency_gain
                    + 0.2 * params.error_reduction
                    + 0.2 * params.time_savings
                    + 0.1 * params.maintenance_reduction
                    + 0.2 * productivity_gain,
            },
            cost_breakdown: breakdown(&[
                ("Initial Setup", initial),
                ("Training", training),
                ("Annual Operational", annual),
                ("Indirect", indirect),
                ("Compliance & Security", compliance),
            ]),
            savings_breakdown: breakdown(&[
                ("Efficiency Savings", efficiency),
                ("Error Reduction Savings", error_reduction),
                ("Time Savings", time),
                ("Maintenance Savings", maintenance),
            ]),
            roi_trend: roi_trend(initial_investment, annual_cash_flow, annual, years)
                .into_iter()
                .zip(1..)
                .map(|(roi, year)| RoiPoint { year, roi })
                .collect(),
        };

        tracing::debug!(
            total_ai_cost = results.costs.total_ai,
            net_savings = results.savings.net,
            npv = results.investment.npv,
            irr = results.investment.irr,
            "Impact model evaluated"
        );

        Ok(results)
    }
}

/// Evaluates the model with the default configuration.
pub fn evaluate(params: &ImpactParameters) -> FinanceResult<ImpactResults> {
    ImpactModel::default().evaluate(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn wide() -> ImpactModel {
        ImpactModel::new(ModelConfig::default().with_irr(IrrConfig::default().with_bounds(0.0, 10.0)))
    }

    #[test]
    fn test_default_savings_scenario() {
        let results = wide().evaluate(&ImpactParameters::default()).unwrap();
        let s = &results.savings;

        assert_relative_eq!(s.annual_team_cost, 1_200_000.0);
        assert_relative_eq!(s.efficiency, 300_000.0);
        assert_relative_eq!(s.error_reduction, 108_000.0);
        assert_relative_eq!(s.time, 240_000.0);
        assert_relative_eq!(s.maintenance, 36_000.0);
        assert_relative_eq!(s.total, 684_000.0);
        assert_relative_eq!(s.net, 621_000.0);
        assert_relative_eq!(s.monthly, 51_750.0);
    }

    #[test]
    fn test_default_cost_totals() {
        let results = wide().evaluate(&ImpactParameters::default()).unwrap();
        let c = &results.costs;

        assert_relative_eq!(c.initial, 125_000.0);
        assert_relative_eq!(c.training, 55_000.0);
        assert_relative_eq!(c.annual, 63_000.0);
        assert_relative_eq!(c.indirect, 36_076.923_076_923, max_relative = 1e-12);
        assert_relative_eq!(c.compliance, 30_000.0);
        assert_relative_eq!(c.total_ai, 279_076.923_076_923, max_relative = 1e-12);
    }

    #[test]
    fn test_default_investment_metrics() {
        let results = wide().evaluate(&ImpactParameters::default()).unwrap();
        let i = &results.investment;

        assert_relative_eq!(i.roi, 122.519_294_377, max_relative = 1e-9);
        assert_relative_eq!(i.payback_period, 0.449_399_232, max_relative = 1e-8);
        assert_relative_eq!(i.initial_investment, 216_076.923_076_923, max_relative = 1e-12);
        assert_relative_eq!(i.annual_cash_flow, 558_000.0);
        assert_relative_eq!(i.npv, 2_011_855.277_612_648, max_relative = 1e-10);
        assert_relative_eq!(i.profitability_index, 10.310_828_981, max_relative = 1e-9);
        assert_eq!(i.discounted_payback_period, 1);
        assert!((i.irr - 257.80).abs() < 0.01);
    }

    #[test]
    fn test_default_productivity_and_ratios() {
        let results = wide().evaluate(&ImpactParameters::default()).unwrap();
        let p = &results.productivity;
        let r = &results.ratios;

        assert_relative_eq!(p.new_cycle_time, 10.5);
        assert_relative_eq!(p.cycle_time_improvement, 25.0);
        assert_relative_eq!(p.new_velocity, 25.0);
        assert_relative_eq!(p.velocity_improvement, 25.0);
        assert_relative_eq!(p.current_features_per_month, 6.0);
        assert_relative_eq!(p.additional_features_per_month, 1.5);
        assert_relative_eq!(r.current_feature_cost, 16_666.666_666_667, max_relative = 1e-12);
        assert_relative_eq!(r.new_feature_cost, 13_333.333_333_333, max_relative = 1e-12);
        assert_relative_eq!(r.feature_cost_reduction, 20.0, max_relative = 1e-12);
        assert_relative_eq!(r.ai_cost_per_feature, 15_504.273_504_274, max_relative = 1e-12);
        assert_relative_eq!(r.break_even_features, 83.723_076_923, max_relative = 1e-9);
        assert_relative_eq!(r.ai_impact_score, 24.0, max_relative = 1e-12);
    }

    #[test]
    fn test_breakdowns_and_trend() {
        let results = wide().evaluate(&ImpactParameters::default()).unwrap();

        let categories: Vec<_> = results
            .cost_breakdown
            .iter()
            .map(|e| e.category.as_str())
            .collect();
        assert_eq!(
            categories,
            vec![
                "Initial Setup",
                "Training",
                "Annual Operational",
                "Indirect",
                "Compliance & Security"
            ]
        );
        assert_relative_eq!(results.cost_breakdown[0].share, 40.443_006_47, max_relative = 1e-8);
        assert_relative_eq!(results.savings_breakdown[0].share, 300_000.0 / 684_000.0 * 100.0);

        assert_eq!(results.roi_trend.len(), 5);
        assert_eq!(results.roi_trend[0].year, 1);
        assert_relative_eq!(results.roi_trend[0].roi, 158.241_367_035, max_relative = 1e-9);
        assert_relative_eq!(results.roi_trend[4].roi, 496.055_875_103, max_relative = 1e-9);
    }

    #[test]
    fn test_model_keeps_its_config() {
        let model = wide();
        assert_eq!(model.config().irr.upper_bound, 10.0);
        assert_eq!(ImpactModel::default().config(), &ModelConfig::default());
    }

    #[test]
    fn test_overlong_horizon_rejected_up_front() {
        let params = ImpactParameters {
            project_duration: 20_000_000,
            ..Default::default()
        };
        assert_eq!(
            wide().evaluate(&params).unwrap_err().field(),
            Some("project_duration")
        );
    }

    #[test]
    fn test_default_bracket_has_no_root_for_defaults() {
        let err = evaluate(&ImpactParameters::default()).unwrap_err();
        assert!(matches!(err, FinanceError::NoRootInDomain { .. }));
    }

    #[test]
    fn test_invalid_field_fails_before_computing() {
        let params = ImpactParameters {
            time_savings: 150.0,
            ..Default::default()
        };
        assert_eq!(evaluate(&params).unwrap_err().field(), Some("time_savings"));
    }

    #[test]
    fn test_zero_costs_rejected() {
        let params = ImpactParameters {
            license_cost: 0.0,
            infrastructure_cost: 0.0,
            integration_cost: 0.0,
            data_migration_cost: 0.0,
            training_cost: 0.0,
            developer_training_hours: 0.0,
            documentation_cost: 0.0,
            annual_maintenance: 0.0,
            monthly_cloud_cost: 0.0,
            monthly_api_cost: 0.0,
            annual_support_contract: 0.0,
            annual_model_retraining: 0.0,
            productivity_loss_days: 0.0,
            transition_support: 0.0,
            risk_mitigation: 0.0,
            security_audit: 0.0,
            data_privacy: 0.0,
            compliance_certification: 0.0,
            ..Default::default()
        };
        assert_eq!(evaluate(&params).unwrap_err().field(), Some("total_ai_cost"));
    }

    #[test]
    fn test_recurring_only_costs_rejected() {
        let params = ImpactParameters {
            license_cost: 0.0,
            infrastructure_cost: 0.0,
            integration_cost: 0.0,
            data_migration_cost: 0.0,
            training_cost: 0.0,
            developer_training_hours: 0.0,
            documentation_cost: 0.0,
            productivity_loss_days: 0.0,
            transition_support: 0.0,
            risk_mitigation: 0.0,
            security_audit: 0.0,
            data_privacy: 0.0,
            compliance_certification: 0.0,
            ..Default::default()
        };
        assert_eq!(
            evaluate(&params).unwrap_err().field(),
            Some("initial_investment")
        );
    }

    #[test]
    fn test_zero_net_savings_rejected() {
        // Savings of 684,000 against an annual cost pushed to the same amount
        let params = ImpactParameters {
            annual_maintenance: 684_000.0 - 43_000.0,
            ..Default::default()
        };
        assert_eq!(evaluate(&params).unwrap_err().field(), Some("net_savings"));
    }

    #[test]
    fn test_export_row_matches_results() {
        let results = wide().evaluate(&ImpactParameters::default()).unwrap();
        let row = results.export_row(Some("pilot team"));

        assert_eq!(row.len(), 41);
        assert_eq!(row[0].column, "Annual Team Cost");
        assert_eq!(row[0].value, crate::ExportValue::Number(1_200_000.0));
        assert_eq!(row[21].column, "IRR");
        assert_eq!(row[21].value, crate::ExportValue::Number(results.investment.irr));
        assert_eq!(row[40].column, "Notes");
        assert_eq!(row[40].value, crate::ExportValue::Text("pilot team".into()));
    }
}
