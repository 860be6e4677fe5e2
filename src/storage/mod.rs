//! Sleuthline Storage
//!
//! This module provides the timeline record store and its flat-file
//! persistence:
//!
//! - **schema**: The ordered field sets (base and extended)
//! - **types**: Core data structures (Record, RecordSet, Row)
//! - **store**: In-memory record store and its CSV codec
//! - **directory**: Name → file mapping inside the data directory
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust,no_run
//! use sleuthline::storage::{Field, Record, Schema, TimelineDirectory};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let timelines = TimelineDirectory::new("./timelines", Schema::Extended);
//!
//!     let mut store = timelines.create("harbour-case")?;
//!     store.append(
//!         Record::new()
//!             .with(Field::Date, "2024-05-01")
//!             .with(Field::Time, "21:40")
//!             .with(Field::PersonEntity, "Alice")
//!             .with(Field::RelatedEntities, "Bob"),
//!     );
//!     timelines.save(&store)?;
//!
//!     let reloaded = timelines.load("harbour-case")?;
//!     assert_eq!(reloaded.len(), 1);
//!     Ok(())
//! }
//! ```

pub mod directory;
pub mod error;
pub mod schema;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use directory::{normalize_name, TimelineDirectory};
pub use error::{StorageError, StorageResult};
pub use schema::{Field, Schema};
pub use store::RecordStore;
pub use types::{Record, RecordSet, Row};
