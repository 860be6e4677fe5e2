//! Storage error types
//!
//! Defines all errors that can occur while reading, writing or locating
//! persisted timelines.

use thiserror::Error;

/// Errors that can occur in the storage layer
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted form could not be read or written as CSV
    #[error("CSV error: {0}")]
    Csv(String),

    /// No persisted timeline exists under the requested name
    #[error("Timeline not found: {0}")]
    TimelineNotFound(String),

    /// Timeline name is empty or would escape the data directory
    #[error("Invalid timeline name: {0:?}")]
    InvalidName(String),
}

impl From<csv::Error> for StorageError {
    fn from(err: csv::Error) -> Self {
        StorageError::Csv(err.to_string())
    }
}

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StorageError::TimelineNotFound("case-42".to_string());
        assert_eq!(err.to_string(), "Timeline not found: case-42");

        let err = StorageError::InvalidName("../etc".to_string());
        assert_eq!(err.to_string(), "Invalid timeline name: \"../etc\"");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let storage_err: StorageError = io_err.into();
        assert!(matches!(storage_err, StorageError::Io(_)));
    }
}
