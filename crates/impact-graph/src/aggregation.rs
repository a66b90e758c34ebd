//! Bottom-up rollup of AI augmentation percentages.
//!
//! Every non-leaf node with at least one child is assigned the unweighted
//! mean of its direct children's percentages. Childless non-leaves keep
//! whatever value they last held, and leaves are never touched.
//!
//! Two visiting orders are available:
//!
//! | Order | Correct for | On a cycle |
//! |-------|-------------|------------|
//! | [`AggregationOrder::Topological`] | any DAG | fails with `CycleDetected` |
//! | [`AggregationOrder::LevelDescending`] | edges that go strictly down a level | single pass, may read stale values |
//!
//! On the seeded taxonomy, and any tree built with
//! [`ProcessGraph::add_node`], the two orders give identical results.

use std::cmp::Reverse;

use petgraph::algo::toposort;
use petgraph::stable_graph::NodeIndex;
use petgraph::Direction;
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};
use crate::node::LEAF_LEVEL;
use crate::store::ProcessGraph;

/// Node visiting order for [`Aggregator::recompute_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AggregationOrder {
    /// Reverse topological order; children are final before their parents.
    #[default]
    Topological,
    /// Deepest level first, ties broken by id.
    LevelDescending,
}

impl std::fmt::Display for AggregationOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Topological => write!(f, "topological"),
            Self::LevelDescending => write!(f, "level-descending"),
        }
    }
}

/// Summary of one rollup pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AggregationReport {
    /// Non-leaf nodes examined.
    pub visited: usize,
    /// Nodes that received a mean of their children.
    pub recomputed: usize,
    /// Recomputed nodes whose value actually changed.
    pub changed: usize,
}

/// Rollup engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aggregator {
    order: AggregationOrder,
    leaf_level: u32,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(AggregationOrder::default())
    }
}

impl Aggregator {
    /// Creates an aggregator using the given visiting order.
    pub fn new(order: AggregationOrder) -> Self {
        Self {
            order,
            leaf_level: LEAF_LEVEL,
        }
    }

    /// Overrides the level at which nodes count as leaves.
    #[must_use]
    pub fn with_leaf_level(mut self, leaf_level: u32) -> Self {
        self.leaf_level = leaf_level;
        self
    }

    /// Visiting order in use.
    pub fn order(&self) -> AggregationOrder {
        self.order
    }

    /// Recomputes every non-leaf node in a single pass.
    ///
    /// # Errors
    ///
    /// With [`AggregationOrder::Topological`], returns
    /// [`GraphError::CycleDetected`] before writing anything if the graph
    /// has a cycle. [`AggregationOrder::LevelDescending`] never fails.
    pub fn recompute_all(&self, graph: &mut ProcessGraph) -> GraphResult<AggregationReport> {
        let order = match self.order {
            AggregationOrder::Topological => reverse_topological(graph)?,
            AggregationOrder::LevelDescending => level_descending(graph),
        };

        let inner = graph.inner_mut();
        let mut report = AggregationReport::default();

        for idx in order {
            if inner[idx].level >= self.leaf_level {
                continue;
            }
            report.visited += 1;

            let (sum, count) = inner
                .neighbors_directed(idx, Direction::Outgoing)
                .fold((0.0, 0usize), |(s, c), child| {
                    (s + inner[child].ai_percentage, c + 1)
                });
            if count == 0 {
                continue;
            }

            let mean = sum / count as f64;
            let node = &mut inner[idx];
            if node.ai_percentage != mean {
                report.changed += 1;
            }
            node.ai_percentage = mean;
            report.recomputed += 1;
        }

        tracing::debug!(
            order = %self.order,
            visited = report.visited,
            recomputed = report.recomputed,
            changed = report.changed,
            "Rollup complete"
        );

        Ok(report)
    }
}

/// Recomputes with the default [`Aggregator`].
pub fn recompute_all(graph: &mut ProcessGraph) -> GraphResult<AggregationReport> {
    Aggregator::default().recompute_all(graph)
}

fn reverse_topological(graph: &ProcessGraph) -> GraphResult<Vec<NodeIndex>> {
    let inner = graph.inner();
    let mut sorted = toposort(inner, None).map_err(|cycle| GraphError::CycleDetected {
        id: inner[cycle.node_id()].id.clone(),
    })?;
    sorted.reverse();
    Ok(sorted)
}

fn level_descending(graph: &ProcessGraph) -> Vec<NodeIndex> {
    let inner = graph.inner();
    let mut indices: Vec<NodeIndex> = inner.node_indices().collect();
    indices.sort_by(|a, b| {
        let (na, nb) = (&inner[*a], &inner[*b]);
        (Reverse(na.level), &na.id).cmp(&(Reverse(nb.level), &nb.id))
    });
    indices
}
