//! Chronology Builder
//!
//! Turns a record set into a time-ordered sequence:
//!
//! ```text
//! Record → Date + " " + Time → strict parse → Instant → stable sort
//! ```
//!
//! The build is all-or-nothing: one unparseable record fails the whole
//! chronology. The source record set is only borrowed and never modified.

use crate::chronology::chart::TimelineChart;
use crate::chronology::error::{ChronologyError, ChronologyResult};
use crate::storage::{Field, Record, RecordSet, Schema};
use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::OnceLock;

/// chrono format of a combined `Date Time` value
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

fn date_time_shape() -> &'static Regex {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    SHAPE.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}$").expect("date/time pattern is valid")
    })
}

/// Parse a record's Date and Time into an instant.
///
/// Only exact `YYYY-MM-DD` and `HH:MM` values with real calendar and clock
/// values are accepted.
pub fn parse_instant(date: &str, time: &str) -> Option<NaiveDateTime> {
    let combined = format!("{} {}", date, time);
    if !date_time_shape().is_match(&combined) {
        return None;
    }
    NaiveDateTime::parse_from_str(&combined, DATE_TIME_FORMAT).ok()
}

/// A record paired with its parsed instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChronologyEntry<'a> {
    /// Store position of the record
    pub position: usize,
    pub record: &'a Record,
    pub instant: NaiveDateTime,
}

/// Records sorted ascending by instant, ties in store order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chronology<'a> {
    schema: Schema,
    entries: Vec<ChronologyEntry<'a>>,
}

impl<'a> Chronology<'a> {
    /// Parse and sort every record of the set
    pub fn build(set: &RecordSet<'a>) -> ChronologyResult<Self> {
        let mut entries = Vec::with_capacity(set.len());

        for row in set.rows() {
            let date = row.record.get(Field::Date);
            let time = row.record.get(Field::Time);

            let instant = parse_instant(date, time).ok_or_else(|| {
                tracing::warn!(
                    position = row.position,
                    date = %date,
                    time = %time,
                    "Unparseable date/time, chronology aborted"
                );
                ChronologyError::DateTimeParse {
                    position: row.position,
                    date: date.to_string(),
                    time: time.to_string(),
                }
            })?;

            entries.push(ChronologyEntry {
                position: row.position,
                record: row.record,
                instant,
            });
        }

        // Stable: equal instants keep their incoming order
        entries.sort_by_key(|entry| entry.instant);

        tracing::debug!(entries = entries.len(), "Chronology built");

        Ok(Self {
            schema: set.schema(),
            entries,
        })
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn entries(&self) -> &[ChronologyEntry<'a>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Store positions in chronological order
    pub fn positions(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.position).collect()
    }

    /// Earliest and latest instant, if any
    pub fn span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        Some((self.entries.first()?.instant, self.entries.last()?.instant))
    }

    /// Time-axis chart data for this chronology
    pub fn chart(&self) -> TimelineChart {
        TimelineChart::from_chronology(self)
    }
}

/// Build a chronology from a record set
pub fn build_chronology<'a>(set: &RecordSet<'a>) -> ChronologyResult<Chronology<'a>> {
    Chronology::build(set)
}
