//! Sleuthline Query Engine
//!
//! Keyword filtering over timeline records: one case-insensitive substring
//! predicate per field, all predicates AND-combined, store order preserved.
//!
//! # Example
//!
//! ```rust,ignore
//! use sleuthline::query::RecordQuery;
//! use sleuthline::storage::Field;
//!
//! let query = RecordQuery::new()
//!     .contains(Field::Location, "berlin")
//!     .contains(Field::PersonEntity, "alice");
//!
//! let hits = store.query(&query);
//! ```

mod error;
mod filter;

pub use error::{QueryError, QueryResult};
pub use filter::RecordQuery;
