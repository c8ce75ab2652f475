//! Dataset error types
//!
//! Every variant is fatal at startup; there is no partial-dataset mode.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the launch table
#[derive(Error, Debug)]
pub enum DatasetError {
    /// Dataset file could not be opened or read
    #[error("Failed to read dataset {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV structure error (ragged row, bad encoding)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A cell could not be interpreted
    #[error("Line {line}: invalid value {value:?} in column {column:?}")]
    InvalidValue {
        line: usize,
        column: String,
        value: String,
    },

    /// The table has a header but no rows
    #[error("Dataset contains no records")]
    Empty,
}

/// Result type alias for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DatasetError::MissingColumn("class".to_string());
        assert_eq!(err.to_string(), "Missing required column: class");

        let err = DatasetError::InvalidValue {
            line: 4,
            column: "class".to_string(),
            value: "maybe".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Line 4: invalid value \"maybe\" in column \"class\""
        );
    }
}
