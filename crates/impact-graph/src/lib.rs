//! # Impact Graph
//!
//! SDLC process taxonomy with bottom-up rollup of AI augmentation.
//!
//! This crate provides:
//!
//! - **Store**: [`ProcessGraph`], a string-keyed directed graph with
//!   fail-fast structural mutations
//! - **Aggregation**: [`Aggregator`], which sets every non-leaf node to the
//!   mean of its children
//! - **Seed**: the built-in 44-node SDLC taxonomy
//! - **Snapshots**: versioned JSON export and validated import
//!
//! ## Example
//!
//! ```rust
//! use impact_graph::prelude::*;
//!
//! let mut graph = ProcessGraph::sdlc_seed().unwrap();
//! graph.set_leaf_value("Unit Testing", 60.0).unwrap();
//! graph.set_leaf_value("Code Review", 40.0).unwrap();
//! recompute_all(&mut graph).unwrap();
//!
//! assert_eq!(graph.node("Code Implementation").unwrap().ai_percentage, 50.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::doc_markdown)]

pub mod aggregation;
pub mod error;
pub mod node;
pub mod seed;
pub mod snapshot;
pub mod store;

pub use aggregation::{recompute_all, AggregationOrder, AggregationReport, Aggregator};
pub use error::{GraphError, GraphResult};
pub use node::{ProcessNode, LEAF_LEVEL};
pub use snapshot::{GraphSnapshot, LinkRecord, NodeRecord, SCHEMA_VERSION};
pub use store::ProcessGraph;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::aggregation::{recompute_all, AggregationOrder, AggregationReport, Aggregator};
    pub use crate::error::{GraphError, GraphResult};
    pub use crate::node::{ProcessNode, LEAF_LEVEL};
    pub use crate::seed::SEED_ROOT;
    pub use crate::snapshot::GraphSnapshot;
    pub use crate::store::ProcessGraph;
}
