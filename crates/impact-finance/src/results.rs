//! Output of one model evaluation.

use serde::{Deserialize, Serialize};

// =============================================================================
// RESULT GROUPS
// =============================================================================

/// Cost totals (USD).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostTotals {
    /// Setup, migration, and compliance outlays.
    pub initial: f64,
    /// Vendor training, developer hours and documentation.
    pub training: f64,
    /// Recurring cost per year.
    pub annual: f64,
    /// Transition productivity loss plus support and risk mitigation.
    pub indirect: f64,
    /// Security audit, data privacy and certification. Also part of `initial`.
    pub compliance: f64,
    /// `initial + training + annual + indirect`.
    pub total_ai: f64,
}

/// Annual savings (USD).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Savings {
    /// `team_size × avg_salary`.
    pub annual_team_cost: f64,
    /// From the efficiency gain.
    pub efficiency: f64,
    /// From fewer defects; defect work is taken as 30% of team time.
    pub error_reduction: f64,
    /// From time saved on routine work.
    pub time: f64,
    /// From lighter maintenance; maintenance is taken as 20% of team time.
    pub maintenance: f64,
    /// Sum of the four components.
    pub total: f64,
    /// `total - annual AI cost`.
    pub net: f64,
    /// Net savings per month.
    pub monthly: f64,
    /// Net savings per day.
    pub daily: f64,
}

/// Investment metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvestmentMetrics {
    /// `(net savings - total AI cost) / total AI cost`, percent.
    pub roi: f64,
    /// `total AI cost / net savings`, years.
    pub payback_period: f64,
    /// Initial, training and indirect costs (USD).
    pub initial_investment: f64,
    /// Net savings less annual cost, per year (USD). Reported as free cash flow.
    pub annual_cash_flow: f64,
    /// Net present value at the discount rate (USD).
    pub npv: f64,
    /// Internal rate of return, percent.
    pub irr: f64,
    /// `(npv + initial investment) / initial investment`.
    pub profitability_index: f64,
    /// First year the discounted cash flow covers the initial investment.
    pub discounted_payback_period: u32,
}

/// Delivery metrics before and after adoption.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductivityMetrics {
    /// Days.
    pub current_cycle_time: f64,
    /// Days.
    pub new_cycle_time: f64,
    /// Days.
    pub cycle_time_reduction: f64,
    /// Percent.
    pub cycle_time_improvement: f64,
    /// Points per sprint.
    pub current_velocity: f64,
    /// Points per sprint.
    pub new_velocity: f64,
    /// Percent. Also used as the productivity gain.
    pub velocity_improvement: f64,
    /// Features per month.
    pub current_features_per_month: f64,
    /// Features per month.
    pub additional_features_per_month: f64,
    /// Features per month.
    pub total_features_per_month: f64,
}

/// Per-employee and per-feature ratios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyRatios {
    /// USD per employee.
    pub roi_per_employee: f64,
    /// Total savings over total AI cost.
    pub cost_savings_ratio: f64,
    /// Net savings over total AI cost.
    pub ai_investment_efficiency: f64,
    /// USD per employee per year.
    pub annual_savings_per_employee: f64,
    /// Team cost per feature today (USD).
    pub current_feature_cost: f64,
    /// Team cost per feature with AI (USD).
    pub new_feature_cost: f64,
    /// Percent.
    pub feature_cost_reduction: f64,
    /// Total AI cost over a year of additional features (USD).
    pub ai_cost_per_feature: f64,
    /// Features needed for per-feature savings to repay the AI cost.
    pub break_even_features: f64,
    /// Weighted composite of the impact percentages.
    pub ai_impact_score: f64,
}

/// One category of a breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    /// Category label.
    pub category: String,
    /// Amount (USD).
    pub amount: f64,
    /// Share of the breakdown total, percent.
    pub share: f64,
}

/// ROI at the end of a year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiPoint {
    /// Year, starting at 1.
    pub year: u32,
    /// Percent.
    pub roi: f64,
}

/// Complete output of [`crate::evaluate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactResults {
    /// Cost totals.
    pub costs: CostTotals,
    /// Savings.
    pub savings: Savings,
    /// Investment metrics.
    pub investment: InvestmentMetrics,
    /// Delivery metrics.
    pub productivity: ProductivityMetrics,
    /// Ratios.
    pub ratios: EfficiencyRatios,
    /// Costs by category.
    pub cost_breakdown: Vec<BreakdownEntry>,
    /// Savings by category.
    pub savings_breakdown: Vec<BreakdownEntry>,
    /// Yearly ROI over the horizon.
    pub roi_trend: Vec<RoiPoint>,
}

/// Builds a breakdown with each category's share of the total.
pub(crate) fn breakdown(items: &[(&str, f64)]) -> Vec<BreakdownEntry> {
    let total: f64 = items.iter().map(|(_, amount)| amount).sum();
    items
        .iter()
        .map(|(category, amount)| BreakdownEntry {
            category: (*category).to_string(),
            amount: *amount,
            share: if total == 0.0 { 0.0 } else { amount / total * 100.0 },
        })
        .collect()
}

// =============================================================================
// EXPORT ROW
// =============================================================================

/// Column names of the export row, in order.
pub const EXPORT_COLUMNS: [&str; 41] = [
    "Annual Team Cost",
    "Total Initial Cost",
    "Total Training Cost",
    "Total Annual Cost",
    "Total Indirect Cost",
    "Total AI Cost",
    "Current Cycle Time",
    "New Cycle Time",
    "Cycle Time Reduction",
    "Cycle Time Improvement",
    "Efficiency Savings",
    "Error Reduction Savings",
    "Time Savings",
    "Maintenance Savings",
    "Total Savings",
    "Net Savings",
    "Monthly Savings",
    "Daily Savings",
    "ROI",
    "Payback Period",
    "NPV",
    "IRR",
    "Profitability Index",
    "Discounted Payback Period",
    "Free Cash Flow",
    "ROI per Employee",
    "Cost Savings Ratio",
    "AI Investment Efficiency",
    "Annual Savings per Employee",
    "Feature Cost Reduction",
    "AI Cost per Feature",
    "Break-even Features",
    "AI Impact Score",
    "Current Velocity",
    "New Velocity",
    "Velocity Improvement",
    "Current Features per Month",
    "Additional Features per Month",
    "Total Features per Month",
    "Cost per Feature",
    "Notes",
];

/// Value of an export cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExportValue {
    /// Numeric metric.
    Number(f64),
    /// Free text.
    Text(String),
}

impl std::fmt::Display for ExportValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// One `(column, value)` cell of the export row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportField {
    /// Column name.
    pub column: &'static str,
    /// Cell value.
    pub value: ExportValue,
}

impl ImpactResults {
    /// Flat export row with the literal column names of [`EXPORT_COLUMNS`].
    ///
    /// The note, if any, fills the final "Notes" column; otherwise it is empty.
    pub fn export_row(&self, note: Option<&str>) -> Vec<ExportField> {
        let c = &self.costs;
        let s = &self.savings;
        let i = &self.investment;
        let p = &self.productivity;
        let r = &self.ratios;

        let numbers = [
            s.annual_team_cost,
            c.initial,
            c.training,
            c.annual,
            c.indirect,
            c.total_ai,
            p.current_cycle_time,
            p.new_cycle_time,
            p.cycle_time_reduction,
            p.cycle_time_improvement,
            s.efficiency,
            s.error_reduction,
            s.time,
            s.maintenance,
            s.total,
            s.net,
            s.monthly,
            s.daily,
            i.roi,
            i.payback_period,
            i.npv,
            i.irr,
            i.profitability_index,
            f64::from(i.discounted_payback_period),
            i.annual_cash_flow,
            r.roi_per_employee,
            r.cost_savings_ratio,
            r.ai_investment_efficiency,
            r.annual_savings_per_employee,
            r.feature_cost_reduction,
            r.ai_cost_per_feature,
            r.break_even_features,
            r.ai_impact_score,
            p.current_velocity,
            p.new_velocity,
            p.velocity_improvement,
            p.current_features_per_month,
            p.additional_features_per_month,
            p.total_features_per_month,
            r.ai_cost_per_feature,
        ];

        EXPORT_COLUMNS
            .iter()
            .zip(
                numbers
                    .into_iter()
                    .map(ExportValue::Number)
                    .chain(std::iter::once(ExportValue::Text(
                        note.unwrap_or_default().to_string(),
                    ))),
            )
            .map(|(column, value)| ExportField { column, value })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_breakdown_shares() {
        let entries = breakdown(&[("a", 30.0), ("b", 10.0)]);
        assert_eq!(entries[0].category, "a");
        assert_relative_eq!(entries[0].share, 75.0);
        assert_relative_eq!(entries[1].share, 25.0);
    }

    #[test]
    fn test_breakdown_of_nothing() {
        let entries = breakdown(&[("a", 0.0), ("b", 0.0)]);
        assert!(entries.iter().all(|e| e.share == 0.0));
    }

    #[test]
    fn test_export_columns_are_unique() {
        let mut columns = EXPORT_COLUMNS.to_vec();
        columns.sort_unstable();
        columns.dedup();
        assert_eq!(columns.len(), EXPORT_COLUMNS.len());
    }

    #[test]
    fn test_export_value_display() {
        assert_eq!(ExportValue::Number(1.5).to_string(), "1.5");
        assert_eq!(ExportValue::Text("hi".into()).to_string(), "hi");
    }
}
