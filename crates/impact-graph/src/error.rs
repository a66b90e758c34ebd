//! Graph error types.

use thiserror::Error;

/// A specialized Result type for taxonomy graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors raised by the process graph, the rollup engine and snapshot import.
///
/// Every failing operation leaves the graph exactly as it was.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// Referenced node does not exist.
    #[error("node not found: {id}")]
    NodeNotFound {
        /// The missing node identifier.
        id: String,
    },

    /// A node with this identifier already exists.
    #[error("node already exists: {id}")]
    DuplicateNode {
        /// The conflicting node identifier.
        id: String,
    },

    /// Both endpoints exist but there is no edge between them.
    #[error("edge not found: {from} -> {to}")]
    EdgeNotFound {
        /// Edge source.
        from: String,
        /// Edge target.
        to: String,
    },

    /// AI percentage outside [0, 100] or not finite.
    #[error("invalid AI percentage {value} for node {id}: expected a value in [0, 100]")]
    InvalidValue {
        /// Node the value was meant for.
        id: String,
        /// The rejected value.
        value: f64,
    },

    /// The graph contains a cycle, so no bottom-up order exists.
    #[error("cycle detected through node {id}")]
    CycleDetected {
        /// A node on the cycle.
        id: String,
    },

    /// Snapshot text could not be parsed.
    #[error("malformed graph snapshot: {reason}")]
    MalformedSnapshot {
        /// Parser message.
        reason: String,
    },

    /// Snapshot was written by an incompatible schema.
    #[error("unsupported snapshot schema version {found} (supported: {supported})")]
    UnsupportedSchemaVersion {
        /// Version found in the document.
        found: u32,
        /// Version this build reads and writes.
        supported: u32,
    },
}

impl GraphError {
    /// Creates a node not found error.
    #[must_use]
    pub fn node_not_found(id: impl Into<String>) -> Self {
        Self::NodeNotFound { id: id.into() }
    }

    /// Creates a duplicate node error.
    #[must_use]
    pub fn duplicate_node(id: impl Into<String>) -> Self {
        Self::DuplicateNode { id: id.into() }
    }

    /// Creates an edge not found error.
    #[must_use]
    pub fn edge_not_found(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::EdgeNotFound {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid_value(id: impl Into<String>, value: f64) -> Self {
        Self::InvalidValue {
            id: id.into(),
            value,
        }
    }

    /// Creates a malformed snapshot error.
    #[must_use]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedSnapshot {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for GraphError {
    fn from(e: serde_json::Error) -> Self {
        Self::malformed(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GraphError::node_not_found("Planning");
        assert_eq!(err.to_string(), "node not found: Planning");

        let err = GraphError::edge_not_found("Design", "Coding");
        assert_eq!(err.to_string(), "edge not found: Design -> Coding");
    }

    #[test]
    fn test_invalid_value_display() {
        let err = GraphError::invalid_value("Code Review", 120.0);
        assert!(err.to_string().contains("120"));
        assert!(err.to_string().contains("Code Review"));
    }
}
