//! Bisection root-finding algorithm.

use log::trace;

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Bisection root-finding algorithm.
///
/// Repeatedly halves the bracket, keeping the half across which `f`
/// changes sign, until the bracket is no wider than `config.tolerance`
/// and, if `config.residual_tolerance` is set, `|f(midpoint)|` is within
/// it. The midpoint of the final bracket is returned. An exact zero at an
/// endpoint or at a midpoint is returned immediately.
///
/// Requires: `f(a)` and `f(b)` of opposite sign (or one of them zero).
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `a` - One end of the bracket
/// * `b` - The other end of the bracket
/// * `config` - Solver configuration; `tolerance` is a bracket width
///
/// # Errors
///
/// - [`MathError::InvalidBracket`] if there is no sign change across `[a, b]`
/// - [`MathError::InvalidInput`] for non-finite bounds, a non-positive
///   tolerance, or a NaN function value at an endpoint
/// - [`MathError::ConvergenceFailed`] if `max_iterations` halvings do not
///   meet the stopping conditions
///
/// # Example
///
/// ```rust
/// use impact_math::solvers::{bisection, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
///
/// let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn bisection<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    if !a.is_finite() || !b.is_finite() {
        return Err(MathError::invalid_input(format!(
            "bracket bounds must be finite, got [{a}, {b}]"
        )));
    }
    if !(config.tolerance > 0.0) {
        return Err(MathError::invalid_input(format!(
            "tolerance must be positive, got {}",
            config.tolerance
        )));
    }
    if let Some(residual) = config.residual_tolerance {
        if !(residual >= 0.0) {
            return Err(MathError::invalid_input(format!(
                "residual tolerance must be non-negative, got {residual}"
            )));
        }
    }

    let mut lo = a.min(b);
    let mut hi = a.max(b);

    let mut f_lo = f(lo);
    let f_hi = f(hi);

    if f_lo.is_nan() || f_hi.is_nan() {
        return Err(MathError::invalid_input(
            "function is undefined at a bracket endpoint",
        ));
    }

    // Handle case where endpoint is the root
    if f_lo == 0.0 {
        return Ok(SolverResult {
            root: lo,
            iterations: 0,
            residual: f_lo,
        });
    }
    if f_hi == 0.0 {
        return Ok(SolverResult {
            root: hi,
            iterations: 0,
            residual: f_hi,
        });
    }

    // Check that root is bracketed
    if f_lo.signum() == f_hi.signum() {
        return Err(MathError::InvalidBracket {
            a: lo,
            b: hi,
            fa: f_lo,
            fb: f_hi,
        });
    }

    let mut iterations = 0;
    loop {
        let mid = (lo + hi) / 2.0;
        let f_mid = f(mid);

        let converged = hi - lo <= config.tolerance
            && config.residual_tolerance.map_or(true, |r| f_mid.abs() <= r);
        if converged {
            return Ok(SolverResult {
                root: mid,
                iterations,
                residual: f_mid,
            });
        }

        if iterations >= config.max_iterations {
            return Err(MathError::convergence_failed(iterations, hi - lo));
        }
        iterations += 1;
        trace!("bisection iteration {iterations}: f({mid}) = {f_mid:e}");

        if f_mid == 0.0 {
            return Ok(SolverResult {
                root: mid,
                iterations,
                residual: f_mid,
            });
        }

        // Keep the half that still straddles the sign change
        if f_mid.signum() == f_lo.signum() {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }
}
