//! JSON-file annotation store.
//!
//! The whole store lives in one JSON document. Every append re-reads the
//! file, adds the record and writes a temporary sibling that is then
//! renamed over the original, so a crash never leaves a half-written file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::NotesResult;
use crate::store::AnnotationStore;
use crate::types::{sort_newest_first, validate, Annotation, RecordId};

#[derive(Debug, Default, Serialize, Deserialize)]
struct NotesDocument {
    next_id: u64,
    annotations: Vec<Annotation>,
}

/// Annotation store persisted to a JSON file.
#[derive(Debug)]
pub struct JsonFileAnnotationStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileAnnotationStore {
    /// Opens a store at `path`. The file is created on first append.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> NotesResult<NotesDocument> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(NotesDocument::default()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(NotesDocument::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, document: &NotesDocument) -> NotesResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, serde_json::to_string_pretty(document)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl AnnotationStore for JsonFileAnnotationStore {
    fn backend_name(&self) -> &'static str {
        "json-file"
    }

    fn append_at(
        &self,
        submitter_id: &str,
        text: &str,
        timestamp: DateTime<Utc>,
    ) -> NotesResult<RecordId> {
        validate(submitter_id, text)?;

        let _guard = self.lock.lock();
        let mut document = self.load()?;
        document.next_id += 1;
        let id = RecordId(document.next_id);
        document.annotations.push(Annotation {
            id,
            submitter_id: submitter_id.to_string(),
            text: text.to_string(),
            timestamp,
        });
        self.save(&document)?;

        tracing::debug!(
            backend = "json-file",
            path = %self.path.display(),
            id = id.0,
            "Annotation appended"
        );
        Ok(id)
    }

    fn list_all(&self) -> NotesResult<Vec<Annotation>> {
        let _guard = self.lock.lock();
        let mut all = self.load()?.annotations;
        sort_newest_first(&mut all);
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NotesError;
    use chrono::Duration;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileAnnotationStore::open(dir.path().join("notes.json"));
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("notes.json");
        let now = Utc::now();

        let store = JsonFileAnnotationStore::open(&path);
        store.append_at("a@example.com", "first", now - Duration::minutes(5)).unwrap();
        store.append_at("b@example.com", "second", now).unwrap();
        drop(store);

        let reopened = JsonFileAnnotationStore::open(&path);
        let notes = reopened.list_all().unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].text, "second");
        assert_eq!(notes[0].id, RecordId(2));

        let third = reopened.append("c@example.com", "third").unwrap();
        assert_eq!(third, RecordId(3));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.json");
        fs::write(&path, "{ not json").unwrap();

        let store = JsonFileAnnotationStore::open(&path);
        assert!(matches!(
            store.list_all(),
            Err(NotesError::Serialization(_))
        ));
    }

    #[test]
    fn test_blank_text_does_not_touch_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.json");
        let store = JsonFileAnnotationStore::open(&path);

        assert!(store.append("a@example.com", "").is_err());
        assert!(!path.exists());
    }
}
