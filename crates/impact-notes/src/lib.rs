//! # Impact Notes
//!
//! Append-only free-text annotations for Impact evaluation sessions.
//!
//! - [`AnnotationStore`]: the store contract (`append`, `list_all`)
//! - [`InMemoryAnnotationStore`]: volatile backend
//! - [`JsonFileAnnotationStore`]: single JSON file backend
//!
//! Notes are listed newest first.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod file;
pub mod memory;
pub mod store;
pub mod types;

pub use error::{NotesError, NotesResult};
pub use file::JsonFileAnnotationStore;
pub use memory::InMemoryAnnotationStore;
pub use store::AnnotationStore;
pub use types::{Annotation, RecordId};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{NotesError, NotesResult};
    pub use crate::file::JsonFileAnnotationStore;
    pub use crate::memory::InMemoryAnnotationStore;
    pub use crate::store::AnnotationStore;
    pub use crate::types::{Annotation, RecordId};
}
