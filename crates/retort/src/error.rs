//! Error types for the Retort library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Retort operations.
///
/// Only I/O-boundary conditions surface here; lookup failures and malformed
/// identifiers degrade to per-row rejections instead.
#[derive(Debug, Error)]
pub enum RetortError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid delimiter detected or specified.
    #[error("Invalid delimiter: {0}")]
    InvalidDelimiter(String),

    /// Empty file or no data rows to validate.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A mandatory identifier column could not be found.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Retort operations.
pub type Result<T> = std::result::Result<T, RetortError>;
