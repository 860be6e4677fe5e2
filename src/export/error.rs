//! Export error types

use thiserror::Error;

/// Errors that can occur while producing export artifacts
#[derive(Error, Debug)]
pub enum ExportError {
    /// Format selector names no registered format
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// Writing the artifact failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Tabular serialization failed
    #[error("CSV error: {0}")]
    Csv(String),

    /// Workbook generation failed
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    /// Chart or graph serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::Csv(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ExportError::Spreadsheet(err.to_string())
    }
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;
