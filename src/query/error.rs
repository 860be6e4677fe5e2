//! Query error types

use thiserror::Error;

/// Errors that can occur while building a query
#[derive(Error, Debug, PartialEq, Eq)]
pub enum QueryError {
    /// Predicate names a field no schema knows
    #[error("Unknown field: {0}")]
    UnknownField(String),
}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;
