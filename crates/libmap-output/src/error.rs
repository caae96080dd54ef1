//! Error types for projection and output writing.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while projecting or writing the output document.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Failed to create the output file or its directory.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize the output document.
    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The column map names the same output column twice.
    #[error("output column '{0}' is mapped more than once")]
    DuplicateOutputColumn(String),

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for OutputError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
