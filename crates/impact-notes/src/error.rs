//! Annotation store error types.

use thiserror::Error;

/// Annotation store result type.
pub type NotesResult<T> = Result<T, NotesError>;

/// Annotation store errors.
#[derive(Debug, Error)]
pub enum NotesError {
    /// A required text field is empty or whitespace.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Name of the empty field.
        field: &'static str,
    },

    /// Backing file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backing file holds invalid data.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for NotesError {
    fn from(err: serde_json::Error) -> Self {
        NotesError::Serialization(err.to_string())
    }
}
