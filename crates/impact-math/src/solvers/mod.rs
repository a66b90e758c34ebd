//! Root-finding algorithms.
//!
//! - [`bisection`]: Simple and reliable bracketing method
//!
//! Bisection is slow (linear convergence, one bit of the bracket per
//! iteration) but cannot diverge: once a sign change is established the
//! root stays inside the bracket. For a bracket of width `w` and tolerance
//! `t` the number of iterations is `ceil(log2(w / t))`.
//!
//! # Example: Internal Rate of Return
//!
//! ```rust
//! use impact_math::solvers::{bisection, SolverConfig};
//!
//! // Invest 100, receive 60 at the end of each of two years
//! let npv = |r: f64| -100.0 + 60.0 / (1.0 + r) + 60.0 / (1.0 + r).powi(2);
//!
//! let result = bisection(npv, 0.0, 1.0, &SolverConfig::default()).unwrap();
//! assert!((result.root - 0.130_662).abs() < 1e-6);
//! ```

mod bisection;

pub use bisection::bisection;

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Tolerance for convergence (bracket width for bracketing methods).
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
    /// Optional bound on `|f(root)|`, checked in addition to `tolerance`.
    pub residual_tolerance: Option<f64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            residual_tolerance: None,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
            residual_tolerance: None,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Also requires `|f(root)| <= residual_tolerance` before stopping.
    #[must_use]
    pub fn with_residual_tolerance(mut self, residual_tolerance: f64) -> Self {
        self.residual_tolerance = Some(residual_tolerance);
        self
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solver_config() {
        let config = SolverConfig::default()
            .with_tolerance(1e-4)
            .with_max_iterations(50);

        assert!((config.tolerance - 1e-4).abs() < f64::EPSILON);
        assert_eq!(config.max_iterations, 50);
    }

    #[test]
    fn test_solver_config_defaults() {
        let config = SolverConfig::default();
        assert_eq!(config, SolverConfig::new(DEFAULT_TOLERANCE, DEFAULT_MAX_ITERATIONS));
        assert_eq!(config.residual_tolerance, None);
    }
}
