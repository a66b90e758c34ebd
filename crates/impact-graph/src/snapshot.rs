//! Versioned JSON snapshots of the process graph.
//!
//! The canonical document is
//!
//! ```json
//! {
//!   "schema_version": 1,
//!   "nodes": [{ "id": "SDLC Process", "level": 0, "ai_percentage": 0.0 }],
//!   "links": [{ "source": "SDLC Process", "target": "Planning" }]
//! }
//! ```
//!
//! Import also reads two legacy layouts:
//!
//! - adjacency maps: `{ "nodes": { id: { "level", "ai_percentage" } }, "edges": { source: [target, ...] } }`
//! - a flat record list mixing `{ "id", "level", "ai_percentage" }` and
//!   `{ "source", "target" }` items
//!
//! Unknown keys are rejected, so a document mixing two layouts fails to parse
//! instead of silently dropping half of its content. Every document is
//! validated completely before any graph is built.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};
use crate::node::{validate_percentage, ProcessNode};
use crate::store::ProcessGraph;

/// Schema version written by [`GraphSnapshot`].
pub const SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

// =============================================================================
// SNAPSHOT RECORDS
// =============================================================================

/// Serialized node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeRecord {
    /// Node identifier.
    pub id: String,
    /// Hierarchy depth.
    pub level: u32,
    /// AI percentage.
    #[serde(default)]
    pub ai_percentage: f64,
}

/// Serialized edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkRecord {
    /// Parent node id.
    pub source: String,
    /// Child node id.
    pub target: String,
}

/// Versioned node/link snapshot of a [`ProcessGraph`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphSnapshot {
    /// Document schema version.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    /// All nodes.
    pub nodes: Vec<NodeRecord>,
    /// All edges.
    #[serde(default)]
    pub links: Vec<LinkRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NodeAttributes {
    level: u32,
    #[serde(default)]
    ai_percentage: f64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AdjacencyDocument {
    nodes: BTreeMap<String, NodeAttributes>,
    #[serde(default)]
    edges: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecordItem {
    Link(LinkRecord),
    Node(NodeRecord),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SnapshotDocument {
    Versioned(GraphSnapshot),
    Adjacency(AdjacencyDocument),
    Records(Vec<RecordItem>),
}

impl From<AdjacencyDocument> for GraphSnapshot {
    fn from(doc: AdjacencyDocument) -> Self {
        let nodes = doc
            .nodes
            .into_iter()
            .map(|(id, attrs)| NodeRecord {
                id,
                level: attrs.level,
                ai_percentage: attrs.ai_percentage,
            })
            .collect();
        let links = doc
            .edges
            .into_iter()
            .flat_map(|(source, targets)| {
                targets.into_iter().map(move |target| LinkRecord {
                    source: source.clone(),
                    target,
                })
            })
            .collect();
        Self {
            schema_version: SCHEMA_VERSION,
            nodes,
            links,
        }
    }
}

impl From<Vec<RecordItem>> for GraphSnapshot {
    fn from(items: Vec<RecordItem>) -> Self {
        let mut nodes = Vec::new();
        let mut links = Vec::new();
        for item in items {
            match item {
                RecordItem::Node(node) => nodes.push(node),
                RecordItem::Link(link) => links.push(link),
            }
        }
        Self {
            schema_version: SCHEMA_VERSION,
            nodes,
            links,
        }
    }
}

// =============================================================================
// EXPORT / IMPORT
// =============================================================================

impl GraphSnapshot {
    /// Captures the current state of a graph.
    pub fn capture(graph: &ProcessGraph) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            nodes: graph
                .nodes()
                .map(|n| NodeRecord {
                    id: n.id.clone(),
                    level: n.level,
                    ai_percentage: n.ai_percentage,
                })
                .collect(),
            links: graph
                .edges()
                .map(|(source, target)| LinkRecord {
                    source: source.to_string(),
                    target: target.to_string(),
                })
                .collect(),
        }
    }

    /// Parses any supported layout into a snapshot. Does not validate.
    pub fn from_json(json: &str) -> GraphResult<Self> {
        let document: SnapshotDocument = serde_json::from_str(json)?;
        Ok(match document {
            SnapshotDocument::Versioned(snapshot) => snapshot,
            SnapshotDocument::Adjacency(doc) => doc.into(),
            SnapshotDocument::Records(items) => items.into(),
        })
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json(&self) -> GraphResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks version, uniqueness, values and link endpoints.
    pub fn validate(&self) -> GraphResult<()> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(GraphError::UnsupportedSchemaVersion {
                found: self.schema_version,
                supported: SCHEMA_VERSION,
            });
        }

        let mut ids = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !ids.insert(node.id.as_str()) {
                return Err(GraphError::duplicate_node(&node.id));
            }
            validate_percentage(&node.id, node.ai_percentage)?;
        }

        for link in &self.links {
            for end in [&link.source, &link.target] {
                if !ids.contains(end.as_str()) {
                    return Err(GraphError::node_not_found(end));
                }
            }
        }
        Ok(())
    }

    /// Validates and builds a graph. Repeated links collapse into one edge.
    pub fn into_graph(self) -> GraphResult<ProcessGraph> {
        self.validate()?;

        let mut graph = ProcessGraph::new();
        for node in self.nodes {
            graph.insert(
                ProcessNode::new(node.id, node.level).with_ai_percentage(node.ai_percentage),
            )?;
        }
        for link in &self.links {
            graph.add_edge(&link.source, &link.target)?;
        }

        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Graph snapshot imported"
        );
        Ok(graph)
    }
}

impl ProcessGraph {
    /// Captures a versioned snapshot.
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot::capture(self)
    }

    /// Exports the graph as pretty-printed snapshot JSON.
    pub fn to_json(&self) -> GraphResult<String> {
        self.snapshot().to_json()
    }

    /// Rebuilds a graph from snapshot JSON in any supported layout.
    pub fn from_json(json: &str) -> GraphResult<Self> {
        GraphSnapshot::from_json(json)?.into_graph()
    }
}
