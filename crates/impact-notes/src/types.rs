//! Annotation record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{NotesError, NotesResult};

/// Identifier assigned by a store on append.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A free-text note attached to an evaluation session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Store-assigned identifier.
    pub id: RecordId,
    /// Who submitted the note, typically an email address.
    pub submitter_id: String,
    /// Note body.
    pub text: String,
    /// Submission time.
    pub timestamp: DateTime<Utc>,
}

/// Rejects blank submitter ids and texts.
pub(crate) fn validate(submitter_id: &str, text: &str) -> NotesResult<()> {
    if submitter_id.trim().is_empty() {
        return Err(NotesError::EmptyField {
            field: "submitter_id",
        });
    }
    if text.trim().is_empty() {
        return Err(NotesError::EmptyField { field: "text" });
    }
    Ok(())
}

/// Newest first; ties broken by the later id.
pub(crate) fn sort_newest_first(annotations: &mut [Annotation]) {
    annotations.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
}
