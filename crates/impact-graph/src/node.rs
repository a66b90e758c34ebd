//! Process taxonomy nodes.

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};

/// Depth of the deepest level in the SDLC taxonomy.
///
/// Nodes at this level are leaves: their AI percentage is assigned directly
/// and never overwritten by the rollup.
pub const LEAF_LEVEL: u32 = 5;

/// Lower bound of an AI augmentation percentage.
pub const MIN_AI_PERCENTAGE: f64 = 0.0;

/// Upper bound of an AI augmentation percentage.
pub const MAX_AI_PERCENTAGE: f64 = 100.0;

/// A single step of the process taxonomy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessNode {
    /// Unique identifier (display name).
    pub id: String,
    /// Depth in the hierarchy; the root is level 0.
    pub level: u32,
    /// Share of the work augmented by AI, in percent.
    pub ai_percentage: f64,
}

impl ProcessNode {
    /// Creates a node with no AI augmentation.
    pub fn new(id: impl Into<String>, level: u32) -> Self {
        Self {
            id: id.into(),
            level,
            ai_percentage: 0.0,
        }
    }

    /// Sets the AI percentage.
    #[must_use]
    pub fn with_ai_percentage(mut self, ai_percentage: f64) -> Self {
        self.ai_percentage = ai_percentage;
        self
    }

    /// Returns true if the node sits at or below [`LEAF_LEVEL`].
    pub fn is_leaf(&self) -> bool {
        self.level >= LEAF_LEVEL
    }
}

/// Checks that `value` is a finite percentage in [0, 100].
pub fn validate_percentage(id: &str, value: f64) -> GraphResult<()> {
    if value.is_finite() && (MIN_AI_PERCENTAGE..=MAX_AI_PERCENTAGE).contains(&value) {
        Ok(())
    } else {
        Err(GraphError::invalid_value(id, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_starts_at_zero() {
        let node = ProcessNode::new("Coding", 2);
        assert_eq!(node.ai_percentage, 0.0);
        assert!(!node.is_leaf());
    }

    #[test]
    fn test_leaf_level() {
        assert!(ProcessNode::new("Code Review", LEAF_LEVEL).is_leaf());
    }

    #[test]
    fn test_validate_percentage() {
        assert!(validate_percentage("x", 0.0).is_ok());
        assert!(validate_percentage("x", 100.0).is_ok());
        assert!(validate_percentage("x", 42.5).is_ok());
        assert!(validate_percentage("x", -0.1).is_err());
        assert!(validate_percentage("x", 100.1).is_err());
        assert!(validate_percentage("x", f64::NAN).is_err());
        assert!(validate_percentage("x", f64::INFINITY).is_err());
    }
}
