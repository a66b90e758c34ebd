//! Annotation store trait definition.

use chrono::{DateTime, Utc};

use crate::error::NotesResult;
use crate::types::{Annotation, RecordId};

/// Append-only store of free-text annotations.
///
/// Backends validate input, assign increasing [`RecordId`]s and return
/// records newest first.
///
/// # Example
///
/// ```rust
/// use impact_notes::{AnnotationStore, InMemoryAnnotationStore};
///
/// let store = InMemoryAnnotationStore::new();
/// store.append("lead@example.com", "Pilot with the platform team first").unwrap();
///
/// let notes = store.list_all().unwrap();
/// assert_eq!(notes[0].submitter_id, "lead@example.com");
/// ```
pub trait AnnotationStore: Send + Sync {
    /// Returns the backend name for logging.
    fn backend_name(&self) -> &'static str;

    /// Appends a note stamped with an explicit time.
    ///
    /// Fails with [`crate::NotesError::EmptyField`] if either text is blank.
    fn append_at(
        &self,
        submitter_id: &str,
        text: &str,
        timestamp: DateTime<Utc>,
    ) -> NotesResult<RecordId>;

    /// Appends a note stamped with the current time.
    fn append(&self, submitter_id: &str, text: &str) -> NotesResult<RecordId> {
        self.append_at(submitter_id, text, Utc::now())
    }

    /// All notes, newest first.
    fn list_all(&self) -> NotesResult<Vec<Annotation>>;

    /// Number of stored notes.
    fn count(&self) -> NotesResult<usize> {
        Ok(self.list_all()?.len())
    }
}
