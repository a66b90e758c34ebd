//! # Impact Finance
//!
//! Financial impact model for adopting AI tooling in a software team.
//!
//! This crate provides:
//!
//! - **Parameters**: [`ImpactParameters`], a typed record of team, delivery
//!   and cost inputs with units, ranges and defaults
//! - **Model**: [`evaluate`], which derives costs, savings, ROI, NPV, IRR,
//!   payback and per-feature ratios
//! - **Cash flows**: NPV, discounted payback and ROI trend helpers
//! - **IRR**: bisection over a configurable rate range with an explicit
//!   no-root failure
//! - **Export**: an ordered `(column, value)` row for tabular output
//!
//! ## Example
//!
//! ```rust
//! use impact_finance::prelude::*;
//!
//! let params = ImpactParameters::default();
//! let model = ImpactModel::new(
//!     ModelConfig::default().with_irr(IrrConfig::default().with_bounds(0.0, 10.0)),
//! );
//!
//! let results = model.evaluate(&params).unwrap();
//! assert_eq!(results.savings.total, 684_000.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::float_cmp)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::too_many_lines)]

pub mod cashflow;
pub mod error;
pub mod irr;
pub mod model;
pub mod params;
pub mod results;

pub use error::{FinanceError, FinanceResult};
pub use irr::IrrConfig;
pub use model::{evaluate, ImpactModel, ModelConfig};
pub use params::ImpactParameters;
pub use results::{ExportField, ExportValue, ImpactResults, EXPORT_COLUMNS};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cashflow::{discounted_payback_period, npv, roi_trend};
    pub use crate::error::{FinanceError, FinanceResult};
    pub use crate::irr::{irr, IrrConfig};
    pub use crate::model::{evaluate, ImpactModel, ModelConfig};
    pub use crate::params::{FieldRange, ImpactParameters, MAX_PROJECT_DURATION};
    pub use crate::results::{
        BreakdownEntry, ExportField, ExportValue, ImpactResults, RoiPoint, EXPORT_COLUMNS,
    };
}
