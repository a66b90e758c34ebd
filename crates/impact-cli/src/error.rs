//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// No session graph at the configured path.
    #[error("No graph at {0}. Run `impact graph init` first.")]
    GraphMissing(PathBuf),

    /// Session graph already exists.
    #[error("Graph already exists at {0}. Pass --force to overwrite.")]
    GraphExists(PathBuf),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
