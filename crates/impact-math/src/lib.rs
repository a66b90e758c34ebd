//! # Impact Math
//!
//! Numerical utilities for the Impact financial model.
//!
//! This crate provides:
//!
//! - **Solvers**: Bracketing root finding (bisection) with explicit
//!   sign-change validation
//!
//! The solvers work on plain `f64` closures so that callers can express
//! any scalar equation, such as net present value as a function of rate.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]

pub mod error;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{
        bisection, SolverConfig, SolverResult, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE,
    };
}

pub use error::{MathError, MathResult};
