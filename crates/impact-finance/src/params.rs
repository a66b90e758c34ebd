//! Input parameters of the financial impact model.
//!
//! [`ImpactParameters`] is a flat record of team, delivery and cost inputs.
//! Every field has a unit, a valid range and a default; a TOML document may
//! set any subset of fields and the rest fall back to [`Default`].
//!
//! Percent-valued fields are in percent (`25.0` means 25%), money is in USD.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FinanceError, FinanceResult};

// =============================================================================
// VALIDATION RULES
// =============================================================================

/// Valid range of a numeric parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldRange {
    /// `value >= min`.
    AtLeast(f64),
    /// `min <= value <= max`.
    Between(f64, f64),
}

impl FieldRange {
    /// Returns true if `value` is finite and inside the range.
    pub fn contains(self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        match self {
            Self::AtLeast(min) => value >= min,
            Self::Between(min, max) => (min..=max).contains(&value),
        }
    }

    fn describe(self) -> String {
        match self {
            Self::AtLeast(min) => format!("must be a finite number >= {min}"),
            Self::Between(min, max) => format!("must be a finite number in [{min}, {max}]"),
        }
    }
}

const PERCENT: FieldRange = FieldRange::Between(0.0, 100.0);
const NON_NEGATIVE: FieldRange = FieldRange::AtLeast(0.0);
const AT_LEAST_ONE: FieldRange = FieldRange::AtLeast(1.0);

/// Longest evaluation horizon accepted, in years.
pub const MAX_PROJECT_DURATION: u32 = 100;

const HORIZON: FieldRange = FieldRange::Between(1.0, 100.0);

/// A single rule violation.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterViolation {
    /// Field that failed validation.
    pub field: &'static str,
    /// Validation error message.
    pub reason: String,
}

impl From<ParameterViolation> for FinanceError {
    fn from(v: ParameterViolation) -> Self {
        FinanceError::invalid_parameter(v.field, v.reason)
    }
}

// =============================================================================
// PARAMETERS
// =============================================================================

/// Inputs to [`crate::evaluate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImpactParameters {
    // Team and delivery
    /// Developers on the team (people).
    pub team_size: u32,
    /// Average fully loaded salary (USD/year).
    pub avg_salary: f64,
    /// Current cycle time (days).
    pub current_cycle_time: f64,
    /// Current velocity (story points/sprint).
    pub current_velocity: f64,
    /// Sprint length (weeks).
    pub sprint_duration_weeks: f64,
    /// Features delivered per sprint.
    pub features_per_sprint: f64,
    /// Annual discount rate (%).
    pub discount_rate: f64,
    /// Evaluation horizon (years).
    pub project_duration: u32,

    // Expected impact
    /// Share of work augmented by AI (%). Informational.
    pub ai_percentage: f64,
    /// Efficiency gain (%).
    pub efficiency_gain: f64,
    /// Reduction in defects (%).
    pub error_reduction: f64,
    /// Time saved on routine work (%).
    pub time_savings: f64,
    /// Reduction in maintenance effort (%).
    pub maintenance_reduction: f64,

    // One-time setup
    /// AI tool licenses (USD).
    pub license_cost: f64,
    /// Infrastructure setup (USD).
    pub infrastructure_cost: f64,
    /// Integration with existing tooling (USD).
    pub integration_cost: f64,
    /// Data migration (USD).
    pub data_migration_cost: f64,

    // Training
    /// Vendor training (USD).
    pub training_cost: f64,
    /// Training hours per developer (hours).
    pub developer_training_hours: f64,
    /// Cost of a training hour (USD/hour).
    pub training_rate: f64,
    /// Documentation (USD).
    pub documentation_cost: f64,

    // Recurring
    /// AI tooling maintenance (USD/year).
    pub annual_maintenance: f64,
    /// Cloud services (USD/month).
    pub monthly_cloud_cost: f64,
    /// API usage (USD/month).
    pub monthly_api_cost: f64,
    /// Support contract (USD/year).
    pub annual_support_contract: f64,
    /// Model retraining (USD/year).
    pub annual_model_retraining: f64,

    // Indirect
    /// Productivity lost during the transition (days).
    pub productivity_loss_days: f64,
    /// Transition support (USD).
    pub transition_support: f64,
    /// Risk mitigation (USD).
    pub risk_mitigation: f64,

    // Compliance and security
    /// Security audit (USD).
    pub security_audit: f64,
    /// Data privacy measures (USD).
    pub data_privacy: f64,
    /// Compliance certification (USD).
    pub compliance_certification: f64,
}

impl Default for ImpactParameters {
    fn default() -> Self {
        Self {
            team_size: 10,
            avg_salary: 120_000.0,
            current_cycle_time: 14.0,
            current_velocity: 20.0,
            sprint_duration_weeks: 2.0,
            features_per_sprint: 3.0,
            discount_rate: 8.0,
            project_duration: 5,

            ai_percentage: 30.0,
            efficiency_gain: 25.0,
            error_reduction: 30.0,
            time_savings: 20.0,
            maintenance_reduction: 15.0,

            license_cost: 50_000.0,
            infrastructure_cost: 20_000.0,
            integration_cost: 15_000.0,
            data_migration_cost: 10_000.0,

            training_cost: 10_000.0,
            developer_training_hours: 40.0,
            training_rate: 100.0,
            documentation_cost: 5_000.0,

            annual_maintenance: 20_000.0,
            monthly_cloud_cost: 1_000.0,
            monthly_api_cost: 500.0,
            annual_support_contract: 15_000.0,
            annual_model_retraining: 10_000.0,

            productivity_loss_days: 5.0,
            transition_support: 8_000.0,
            risk_mitigation: 5_000.0,

            security_audit: 12_000.0,
            data_privacy: 8_000.0,
            compliance_certification: 10_000.0,
        }
    }
}

impl ImpactParameters {
    /// Every field with its value and valid range, in declaration order.
    pub fn fields(&self) -> Vec<(&'static str, f64, FieldRange)> {
        vec![
            ("team_size", f64::from(self.team_size), AT_LEAST_ONE),
            ("avg_salary", self.avg_salary, NON_NEGATIVE),
            ("current_cycle_time", self.current_cycle_time, AT_LEAST_ONE),
            ("current_velocity", self.current_velocity, AT_LEAST_ONE),
            ("sprint_duration_weeks", self.sprint_duration_weeks, AT_LEAST_ONE),
            ("features_per_sprint", self.features_per_sprint, AT_LEAST_ONE),
            ("discount_rate", self.discount_rate, PERCENT),
            ("project_duration", f64::from(self.project_duration), HORIZON),
            ("ai_percentage", self.ai_percentage, PERCENT),
            ("efficiency_gain", self.efficiency_gain, PERCENT),
            ("error_reduction", self.error_reduction, PERCENT),
            ("time_savings", self.time_savings, PERCENT),
            ("maintenance_reduction", self.maintenance_reduction, PERCENT),
            ("license_cost", self.license_cost, NON_NEGATIVE),
            ("infrastructure_cost", self.infrastructure_cost, NON_NEGATIVE),
            ("integration_cost", self.integration_cost, NON_NEGATIVE),
            ("data_migration_cost", self.data_migration_cost, NON_NEGATIVE),
            ("training_cost", self.training_cost, NON_NEGATIVE),
            ("developer_training_hours", self.developer_training_hours, NON_NEGATIVE),
            ("training_rate", self.training_rate, NON_NEGATIVE),
            ("documentation_cost", self.documentation_cost, NON_NEGATIVE),
            ("annual_maintenance", self.annual_maintenance, NON_NEGATIVE),
            ("monthly_cloud_cost", self.monthly_cloud_cost, NON_NEGATIVE),
            ("monthly_api_cost", self.monthly_api_cost, NON_NEGATIVE),
            ("annual_support_contract", self.annual_support_contract, NON_NEGATIVE),
            ("annual_model_retraining", self.annual_model_retraining, NON_NEGATIVE),
            ("productivity_loss_days", self.productivity_loss_days, NON_NEGATIVE),
            ("transition_support", self.transition_support, NON_NEGATIVE),
            ("risk_mitigation", self.risk_mitigation, NON_NEGATIVE),
            ("security_audit", self.security_audit, NON_NEGATIVE),
            ("data_privacy", self.data_privacy, NON_NEGATIVE),
            ("compliance_certification", self.compliance_certification, NON_NEGATIVE),
        ]
    }

    /// Collects every range violation.
    ///
    /// Besides the per-field ranges, `efficiency_gain` must be strictly
    /// positive: the per-feature ratios divide by the extra feature rate it
    /// produces.
    pub fn violations(&self) -> Vec<ParameterViolation> {
        let mut violations: Vec<ParameterViolation> = self
            .fields()
            .into_iter()
            .filter(|(_, value, range)| !range.contains(*value))
            .map(|(field, _, range)| ParameterViolation {
                field,
                reason: range.describe(),
            })
            .collect();

        if self.efficiency_gain == 0.0 {
            violations.push(ParameterViolation {
                field: "efficiency_gain",
                reason: "must be greater than 0 for per-feature cost ratios".to_string(),
            });
        }
        violations
    }

    /// Fails with the first violation, naming its field.
    pub fn validate(&self) -> FinanceResult<()> {
        match self.violations().into_iter().next() {
            Some(violation) => Err(violation.into()),
            None => Ok(()),
        }
    }

    /// Parses a TOML document. Missing fields take their defaults.
    pub fn from_toml_str(content: &str) -> FinanceResult<Self> {
        toml::from_str(content).map_err(|e| FinanceError::Load(e.to_string()))
    }

    /// Loads parameters from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> FinanceResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| FinanceError::Load(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Renders the record as a TOML document.
    pub fn to_toml_string(&self) -> FinanceResult<String> {
        toml::to_string_pretty(self).map_err(|e| FinanceError::Load(e.to_string()))
    }
}
