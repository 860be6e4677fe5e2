//! Sleuthline Relational Graph
//!
//! Builds the entity relationship diagram data from a chronology: nodes are
//! `Person_Entity` values positioned at their record's instant, edges are the
//! timed relations asserted through `Related_Entities`.
//!
//! # Example
//!
//! ```rust,ignore
//! use sleuthline::chronology::Chronology;
//! use sleuthline::graph::{build_graph, GraphOptions};
//!
//! let chronology = Chronology::build(&store.as_set())?;
//! let graph = build_graph(&chronology, &GraphOptions::default())?;
//! println!("{} edges", graph.edges.len());
//! ```

mod builder;
mod error;

pub use builder::{build_graph, EntityEdge, EntityNode, GraphOptions, RelationalGraph};
pub use error::{GraphError, GraphResult};
