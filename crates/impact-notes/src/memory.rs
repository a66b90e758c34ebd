//! In-memory annotation store.
//!
//! Useful for tests and single-session use. Data is not persisted.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::error::NotesResult;
use crate::store::AnnotationStore;
use crate::types::{sort_newest_first, validate, Annotation, RecordId};

/// In-memory annotation store.
#[derive(Debug, Default)]
pub struct InMemoryAnnotationStore {
    records: RwLock<Vec<Annotation>>,
}

impl InMemoryAnnotationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnnotationStore for InMemoryAnnotationStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn append_at(
        &self,
        submitter_id: &str,
        text: &str,
        timestamp: DateTime<Utc>,
    ) -> NotesResult<RecordId> {
        validate(submitter_id, text)?;

        let mut records = self.records.write();
        let id = RecordId(records.len() as u64 + 1);
        records.push(Annotation {
            id,
            submitter_id: submitter_id.to_string(),
            text: text.to_string(),
            timestamp,
        });

        tracing::debug!(backend = "memory", id = id.0, "Annotation appended");
        Ok(id)
    }

    fn list_all(&self) -> NotesResult<Vec<Annotation>> {
        let mut all = self.records.read().clone();
        sort_newest_first(&mut all);
        Ok(all)
    }

    fn count(&self) -> NotesResult<usize> {
        Ok(self.records.read().len())
    }
}
