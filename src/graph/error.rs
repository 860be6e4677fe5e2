//! Graph error types

use crate::storage::{Field, Schema};
use thiserror::Error;

/// Errors that can occur while deriving the relational graph
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The record set's schema lacks a field the graph needs
    #[error("Schema error: field {field} is absent from the {schema} schema")]
    MissingField { field: Field, schema: Schema },
}

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;
