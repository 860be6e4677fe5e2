//! # Sleuthline
//!
//! Investigation timelines - record, query, order and relate OSINT events
//! kept in flat CSV files.
//!
//! ## Features
//!
//! - **Flat-file storage**: one CSV file per timeline, readable by any spreadsheet
//! - **Keyword queries**: case-insensitive substring filters, AND-combined
//! - **Strict chronology**: all-or-nothing ordering by `Date` + `Time`
//! - **Relational graph**: timed entity edges derived from `Related_Entities`
//! - **Exports**: tabular, spreadsheet and paginated text artifacts
//!
//! ## Modules
//!
//! - [`storage`]: Records, schemas and the timeline directory
//! - [`query`]: Substring filtering
//! - [`chronology`]: Date/time ordering and chart data
//! - [`graph`]: Entity relationship derivation
//! - [`export`]: Artifact rendering
//! - [`api`]: REST API server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sleuthline::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let directory = TimelineDirectory::new("./timelines", Schema::Extended);
//!
//!     let mut store = directory.create("case-042")?;
//!     store.append(
//!         Record::new()
//!             .with(Field::Date, "2024-03-01")
//!             .with(Field::Time, "18:00")
//!             .with(Field::PersonEntity, "Bob")
//!             .with(Field::Description, "Posted photo"),
//!     );
//!     directory.save(&store)?;
//!
//!     // Keyword query, then chronological order
//!     let hits = store.query(&RecordQuery::new().contains(Field::Description, "photo"));
//!     let chronology = Chronology::build(&hits)?;
//!     let graph = build_graph(&chronology, &GraphOptions::default())?;
//!
//!     println!("{} events, {} edges", chronology.len(), graph.edges.len());
//!
//!     Exporter::new("./out").export(&hits, ExportFormat::Tabular)?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod chronology;
pub mod config;
pub mod export;
pub mod graph;
pub mod logging;
pub mod query;
pub mod storage;

// Re-export top-level types for convenience
pub use storage::{
    Field, Record, RecordSet, RecordStore, Row, Schema, StorageError, StorageResult,
    TimelineDirectory,
};

pub use query::{QueryError, RecordQuery};

pub use chronology::{build_chronology, Chronology, ChronologyError, TimelineChart};

pub use graph::{build_graph, EntityEdge, GraphError, GraphOptions, RelationalGraph};

pub use export::{ExportArtifact, ExportError, ExportFormat, Exporter};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::Config;

/// Prelude for common imports
pub mod prelude {
    pub use crate::chronology::{Chronology, ChronologyError};
    pub use crate::export::{ExportFormat, Exporter};
    pub use crate::graph::{build_graph, GraphOptions, RelationalGraph};
    pub use crate::query::RecordQuery;
    pub use crate::storage::{
        Field, Record, RecordSet, RecordStore, Schema, StorageError, TimelineDirectory,
    };
}
