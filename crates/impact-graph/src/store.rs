//! Process graph storage and structural mutation.
//!
//! [`ProcessGraph`] owns the taxonomy: a directed graph of [`ProcessNode`]s
//! keyed by their string identifier. Edges point from parent to child.
//!
//! All mutations validate their arguments before touching the graph, so a
//! failed call leaves nodes, edges and values unchanged. Mutations never
//! recompute aggregated values; call [`crate::aggregation::recompute_all`]
//! afterwards.
//!
//! # Example
//!
//! ```rust
//! use impact_graph::{recompute_all, ProcessGraph};
//!
//! let mut graph = ProcessGraph::new();
//! graph.add_root("Delivery").unwrap();
//! graph.add_node("Build", "Delivery").unwrap();
//! graph.add_node("Ship", "Delivery").unwrap();
//!
//! graph.set_leaf_value("Build", 40.0).unwrap();
//! graph.set_leaf_value("Ship", 60.0).unwrap();
//! recompute_all(&mut graph).unwrap();
//!
//! assert_eq!(graph.node("Delivery").unwrap().ai_percentage, 50.0);
//! ```

use std::collections::HashMap;

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::Direction;

use crate::error::{GraphError, GraphResult};
use crate::node::{validate_percentage, ProcessNode, LEAF_LEVEL};

// =============================================================================
// PROCESS GRAPH
// =============================================================================

/// Directed process taxonomy with string-keyed nodes.
///
/// Backed by a [`StableDiGraph`] so that node indices held in the lookup
/// table survive removals.
#[derive(Debug, Clone, Default)]
pub struct ProcessGraph {
    /// Directed graph; edges run parent -> child.
    graph: StableDiGraph<ProcessNode, ()>,

    /// Mapping from node identifier to graph index.
    node_indices: HashMap<String, NodeIndex>,
}

impl ProcessGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    fn index_of(&self, id: &str) -> GraphResult<NodeIndex> {
        self.node_indices
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::node_not_found(id))
    }

    /// Inserts a fully specified node. Fails if the id is taken.
    pub(crate) fn insert(&mut self, node: ProcessNode) -> GraphResult<NodeIndex> {
        if self.node_indices.contains_key(&node.id) {
            return Err(GraphError::duplicate_node(node.id));
        }
        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.node_indices.insert(id, idx);
        Ok(idx)
    }

    /// Adds a node under `parent_id`.
    ///
    /// The new node gets `level(parent) + 1`, an AI percentage of 0 and the
    /// edge `parent_id -> id`.
    ///
    /// # Errors
    ///
    /// - [`GraphError::DuplicateNode`] if `id` already exists
    /// - [`GraphError::NodeNotFound`] if `parent_id` does not exist
    pub fn add_node(&mut self, id: impl Into<String>, parent_id: &str) -> GraphResult<()> {
        let id = id.into();
        if self.node_indices.contains_key(&id) {
            return Err(GraphError::duplicate_node(id));
        }
        let parent = self.index_of(parent_id)?;
        let level = self.graph[parent].level + 1;

        let idx = self.insert(ProcessNode::new(id.clone(), level))?;
        self.graph.add_edge(parent, idx, ());

        tracing::debug!(node = %id, parent = %parent_id, level, "Node added");
        Ok(())
    }

    /// Adds a parentless node at level 0.
    pub fn add_root(&mut self, id: impl Into<String>) -> GraphResult<()> {
        let id = id.into();
        self.insert(ProcessNode::new(id.clone(), 0))?;
        tracing::debug!(node = %id, "Root node added");
        Ok(())
    }

    /// Removes a node and every edge touching it.
    ///
    /// Descendants are kept; a child that loses its only parent becomes
    /// disconnected. Returns the removed node.
    pub fn delete_node(&mut self, id: &str) -> GraphResult<ProcessNode> {
        let idx = self.index_of(id)?;
        let node = self
            .graph
            .remove_node(idx)
            .ok_or_else(|| GraphError::node_not_found(id))?;
        self.node_indices.remove(id);

        tracing::debug!(node = %id, "Node deleted");
        Ok(node)
    }

    /// Renames a node, keeping its level, value and edges.
    ///
    /// # Errors
    ///
    /// - [`GraphError::NodeNotFound`] if `old_id` does not exist
    /// - [`GraphError::DuplicateNode`] if `new_id` exists, including when it
    ///   equals `old_id`
    pub fn rename_node(&mut self, old_id: &str, new_id: impl Into<String>) -> GraphResult<()> {
        let new_id = new_id.into();
        let idx = self.index_of(old_id)?;
        if self.node_indices.contains_key(&new_id) {
            return Err(GraphError::duplicate_node(new_id));
        }

        self.node_indices.remove(old_id);
        self.node_indices.insert(new_id.clone(), idx);
        self.graph[idx].id = new_id.clone();

        tracing::debug!(from = %old_id, to = %new_id, "Node renamed");
        Ok(())
    }

    /// Adds the edge `source -> target`.
    ///
    /// Neither cycles nor level order are checked. Adding an existing edge is
    /// a no-op; the return value tells whether a new edge was created.
    pub fn add_edge(&mut self, source: &str, target: &str) -> GraphResult<bool> {
        let from = self.index_of(source)?;
        let to = self.index_of(target)?;
        if self.graph.find_edge(from, to).is_some() {
            return Ok(false);
        }
        self.graph.add_edge(from, to, ());

        tracing::debug!(source = %source, target = %target, "Edge added");
        Ok(true)
    }

    /// Removes the edge `source -> target`.
    ///
    /// # Errors
    ///
    /// - [`GraphError::NodeNotFound`] for a missing endpoint
    /// - [`GraphError::EdgeNotFound`] if both endpoints exist but are not
    ///   connected in that direction
    pub fn delete_edge(&mut self, source: &str, target: &str) -> GraphResult<()> {
        let from = self.index_of(source)?;
        let to = self.index_of(target)?;
        let edge = self
            .graph
            .find_edge(from, to)
            .ok_or_else(|| GraphError::edge_not_found(source, target))?;
        self.graph.remove_edge(edge);

        tracing::debug!(source = %source, target = %target, "Edge deleted");
        Ok(())
    }

    /// Assigns an AI percentage to a node.
    ///
    /// Intended for leaves, but any node is accepted; a value on a non-leaf
    /// is overwritten by the next rollup if the node has children. Does not
    /// recompute ancestors.
    pub fn set_leaf_value(&mut self, id: &str, value: f64) -> GraphResult<()> {
        let idx = self.index_of(id)?;
        validate_percentage(id, value)?;
        self.graph[idx].ai_percentage = value;

        tracing::debug!(node = %id, value, "AI percentage set");
        Ok(())
    }

    // =========================================================================
    // READ ACCESS
    // =========================================================================

    /// Returns the node with this id.
    pub fn node(&self, id: &str) -> Option<&ProcessNode> {
        self.node_indices.get(id).map(|idx| &self.graph[*idx])
    }

    /// Returns true if a node with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.node_indices.contains_key(id)
    }

    /// Direct children of a node.
    pub fn successors(&self, id: &str) -> GraphResult<Vec<&ProcessNode>> {
        self.neighbors(id, Direction::Outgoing)
    }

    /// Direct parents of a node.
    pub fn predecessors(&self, id: &str) -> GraphResult<Vec<&ProcessNode>> {
        self.neighbors(id, Direction::Incoming)
    }

    fn neighbors(&self, id: &str, direction: Direction) -> GraphResult<Vec<&ProcessNode>> {
        let idx = self.index_of(id)?;
        Ok(self
            .graph
            .neighbors_directed(idx, direction)
            .map(|n| &self.graph[n])
            .collect())
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns true if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Iterates over all nodes.
    pub fn nodes(&self) -> impl Iterator<Item = &ProcessNode> + '_ {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    /// Iterates over all edges as `(source, target)` id pairs.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.graph.edge_indices().filter_map(move |e| {
            self.graph
                .edge_endpoints(e)
                .map(|(a, b)| (self.graph[a].id.as_str(), self.graph[b].id.as_str()))
        })
    }

    /// Nodes at [`LEAF_LEVEL`] or deeper.
    pub fn leaves(&self) -> impl Iterator<Item = &ProcessNode> + '_ {
        self.nodes().filter(|n| n.level >= LEAF_LEVEL)
    }

    /// Nodes without a parent.
    pub fn roots(&self) -> impl Iterator<Item = &ProcessNode> + '_ {
        self.graph
            .node_indices()
            .filter(move |idx| {
                self.graph
                    .neighbors_directed(*idx, Direction::Incoming)
                    .next()
                    .is_none()
            })
            .map(move |idx| &self.graph[idx])
    }

    pub(crate) fn inner(&self) -> &StableDiGraph<ProcessNode, ()> {
        &self.graph
    }

    pub(crate) fn inner_mut(&mut self) -> &mut StableDiGraph<ProcessNode, ()> {
        &mut self.graph
    }
}
