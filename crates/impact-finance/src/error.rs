//! Error types for the financial model.

use impact_math::MathError;
use thiserror::Error;

/// A specialized Result type for financial model operations.
pub type FinanceResult<T> = Result<T, FinanceError>;

/// Errors that can occur while validating or evaluating the model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FinanceError {
    /// A parameter, or a quantity derived from parameters, violates a precondition.
    #[error("Invalid parameter '{field}': {reason}")]
    InvalidParameter {
        /// Parameter or derived output name.
        field: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Net present value does not change sign across the IRR search range.
    #[error(
        "No IRR in [{:.2}%, {:.2}%]: NPV is {npv_at_lower:.2} at the lower bound and {npv_at_upper:.2} at the upper bound",
        .lower * 100.0,
        .upper * 100.0
    )]
    NoRootInDomain {
        /// Lower rate bound (fraction).
        lower: f64,
        /// Upper rate bound (fraction).
        upper: f64,
        /// NPV at the lower bound.
        npv_at_lower: f64,
        /// NPV at the upper bound.
        npv_at_upper: f64,
    },

    /// Root finder failed for another reason.
    #[error("Solver error: {0}")]
    Solver(#[from] MathError),

    /// Parameter document could not be read or parsed.
    #[error("Failed to load parameters: {0}")]
    Load(String),
}

impl FinanceError {
    /// Creates an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns the offending field for [`FinanceError::InvalidParameter`].
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidParameter { field, .. } => Some(field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FinanceError::invalid_parameter("team_size", "must be at least 1");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'team_size': must be at least 1"
        );
        assert_eq!(err.field(), Some("team_size"));
    }

    #[test]
    fn test_no_root_display() {
        let err = FinanceError::NoRootInDomain {
            lower: 0.0,
            upper: 1.0,
            npv_at_lower: 500.0,
            npv_at_upper: 20.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("100.00%"));
        assert!(msg.contains("500.00"));
        assert_eq!(err.field(), None);
    }
}
