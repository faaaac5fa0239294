//! Error types for the salescope library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for salescope operations.
#[derive(Debug, Error)]
pub enum SalescopeError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error opening or reading a spreadsheet.
    #[error("Workbook error for '{path}': {message}")]
    Workbook { path: PathBuf, message: String },

    /// Empty file or no data to clean.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A column the pipeline cannot run without is absent.
    #[error("Invalid input: required column '{column}' not found")]
    MissingColumn { column: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error writing a snapshot or report.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl SalescopeError {
    /// Shorthand for a missing required column.
    pub fn missing_column(column: impl Into<String>) -> Self {
        SalescopeError::MissingColumn {
            column: column.into(),
        }
    }
}

/// Result type alias for salescope operations.
pub type Result<T> = std::result::Result<T, SalescopeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_names_the_column() {
        let err = SalescopeError::missing_column("Country");
        assert!(matches!(err, SalescopeError::MissingColumn { ref column } if column == "Country"));
        assert_eq!(
            err.to_string(),
            "Invalid input: required column 'Country' not found"
        );
    }
}
