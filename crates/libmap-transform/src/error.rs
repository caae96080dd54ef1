//! Error types for the join and metric stages.

use thiserror::Error;

/// Errors raised by transformation stages.
///
/// Missing data is never an error here; only a frame that lacks a column a
/// stage was asked to read is.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A stage was asked to read a column the frame does not have.
    #[error("{stage}: column '{column}' not found")]
    MissingColumn {
        stage: &'static str,
        column: String,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl TransformError {
    pub(crate) fn missing(stage: &'static str, column: &str) -> Self {
        Self::MissingColumn {
            stage,
            column: column.to_string(),
        }
    }
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for transformation operations.
pub type Result<T> = std::result::Result<T, TransformError>;

/// Fails with [`TransformError::MissingColumn`] for the first absent column.
pub(crate) fn require(
    df: &polars::prelude::DataFrame,
    stage: &'static str,
    columns: &[&str],
) -> Result<()> {
    match columns
        .iter()
        .find(|column| !libmap_common::has_column(df, column))
    {
        Some(column) => Err(TransformError::missing(stage, column)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TransformError::missing("percentages", "B02001_002E");
        assert_eq!(
            err.to_string(),
            "percentages: column 'B02001_002E' not found"
        );
    }
}
