//! Chronology error types

use thiserror::Error;

/// Errors that can occur while ordering records in time
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChronologyError {
    /// A record's Date/Time does not match `YYYY-MM-DD HH:MM`
    #[error("Record {position} has unparseable date/time {date:?} {time:?} (expected YYYY-MM-DD HH:MM)")]
    DateTimeParse {
        /// Store position of the offending record
        position: usize,
        date: String,
        time: String,
    },
}

/// Result type for chronology operations
pub type ChronologyResult<T> = Result<T, ChronologyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ChronologyError::DateTimeParse {
            position: 3,
            date: "not-a-date".to_string(),
            time: "10:00".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Record 3 has unparseable date/time \"not-a-date\" \"10:00\" (expected YYYY-MM-DD HH:MM)"
        );
    }
}
