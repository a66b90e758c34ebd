//! Internal rate of return by bisection.
//!
//! The IRR is the rate at which [`npv`] is zero. For a positive level cash
//! flow, NPV is strictly decreasing in the rate, so a bracket whose ends
//! give NPVs of opposite sign contains exactly one root.

use impact_math::solvers::{bisection, SolverConfig};
use impact_math::MathError;
use serde::{Deserialize, Serialize};

use crate::cashflow::npv;
use crate::error::{FinanceError, FinanceResult};

fn default_lower_bound() -> f64 {
    0.0
}

fn default_upper_bound() -> f64 {
    1.0
}

fn default_tolerance() -> f64 {
    1e-4
}

fn default_residual_tolerance() -> f64 {
    1e-4
}

fn default_max_iterations() -> u32 {
    100
}

/// Search range and precision for the IRR.
///
/// Rates are fractions: the default range `[0, 1]` is 0%..100% and the
/// default tolerance of `1e-4` is the final bracket width (about 14
/// halvings). The search also continues until the NPV at the returned rate
/// is within `residual_tolerance × initial_investment` of zero (0.01% by
/// default).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IrrConfig {
    /// Lowest rate searched.
    #[serde(default = "default_lower_bound")]
    pub lower_bound: f64,
    /// Highest rate searched.
    #[serde(default = "default_upper_bound")]
    pub upper_bound: f64,
    /// Bracket width at which the search stops.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Largest accepted `|NPV|` at the result, as a fraction of the
    /// initial investment.
    #[serde(default = "default_residual_tolerance")]
    pub residual_tolerance: f64,
    /// Halving budget.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
}

impl Default for IrrConfig {
    fn default() -> Self {
        Self {
            lower_bound: default_lower_bound(),
            upper_bound: default_upper_bound(),
            tolerance: default_tolerance(),
            residual_tolerance: default_residual_tolerance(),
            max_iterations: default_max_iterations(),
        }
    }
}

impl IrrConfig {
    /// Sets the search range.
    #[must_use]
    pub fn with_bounds(mut self, lower_bound: f64, upper_bound: f64) -> Self {
        self.lower_bound = lower_bound;
        self.upper_bound = upper_bound;
        self
    }

    /// Sets the bracket width tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the NPV residual bound, relative to the initial investment.
    #[must_use]
    pub fn with_residual_tolerance(mut self, residual_tolerance: f64) -> Self {
        self.residual_tolerance = residual_tolerance;
        self
    }

    fn solver_config(&self, initial_investment: f64) -> SolverConfig {
        SolverConfig::new(self.tolerance, self.max_iterations)
            .with_residual_tolerance(self.residual_tolerance * initial_investment.abs())
    }
}

/// IRR of `-initial_investment` followed by `cash_flow` for `years` years,
/// in percent.
///
/// # Errors
///
/// [`FinanceError::NoRootInDomain`] if NPV has the same sign at both ends of
/// the search range. Other solver failures surface as
/// [`FinanceError::Solver`].
pub fn irr(
    initial_investment: f64,
    cash_flow: f64,
    years: u32,
    config: &IrrConfig,
) -> FinanceResult<f64> {
    let f = |rate: f64| npv(rate, initial_investment, cash_flow, years);

    let solver = config.solver_config(initial_investment);
    match bisection(f, config.lower_bound, config.upper_bound, &solver) {
        Ok(result) => {
            tracing::trace!(
                rate = result.root,
                iterations = result.iterations,
                residual = result.residual,
                "IRR converged"
            );
            Ok(result.root * 100.0)
        }
        Err(MathError::InvalidBracket { a, b, fa, fb }) => Err(FinanceError::NoRootInDomain {
            lower: a,
            upper: b,
            npv_at_lower: fa,
            npv_at_upper: fb,
        }),
        Err(e) => Err(e.into()),
    }
}
