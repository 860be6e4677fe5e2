//! Sleuthline Chronology
//!
//! Orders timeline records in time and derives the time-axis chart series.
//!
//! - **builder**: strict Date/Time parsing and the stable chronological sort
//! - **chart**: chart points (instant, row, description) for a renderer
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust,ignore
//! use sleuthline::chronology::Chronology;
//!
//! let chronology = Chronology::build(&store.as_set())?;
//! for entry in chronology.entries() {
//!     println!("{} #{}", entry.instant, entry.position);
//! }
//! let chart = chronology.chart();
//! ```

mod builder;
mod chart;
mod error;

pub use builder::{build_chronology, parse_instant, Chronology, ChronologyEntry, DATE_TIME_FORMAT};
pub use chart::{ChartPoint, TimelineChart, CHART_TITLE};
pub use error::{ChronologyError, ChronologyResult};
