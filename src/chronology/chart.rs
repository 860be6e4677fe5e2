//! Time-axis chart data
//!
//! One point per chronology entry: x = instant, y = the record's store
//! position, tick label = its Description. Drawing is left to whoever
//! consumes the serialized chart.

use crate::chronology::builder::Chronology;
use crate::storage::Field;
use chrono::NaiveDateTime;
use serde::Serialize;

pub const CHART_TITLE: &str = "OSINT Investigation Timeline";
pub const X_LABEL: &str = "Date and Time";
pub const Y_LABEL: &str = "Events";

/// A single plotted event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub instant: NaiveDateTime,
    /// Store position of the record, used as the y ordinal
    pub row: usize,
    /// Description shown as the y tick label
    pub label: String,
}

/// Chart series in chronological order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ChartPoint>,
}

impl TimelineChart {
    pub fn from_chronology(chronology: &Chronology<'_>) -> Self {
        let points = chronology
            .entries()
            .iter()
            .map(|entry| ChartPoint {
                instant: entry.instant,
                row: entry.position,
                label: entry.record.get(Field::Description).to_string(),
            })
            .collect();

        Self {
            title: CHART_TITLE.to_string(),
            x_label: X_LABEL.to_string(),
            y_label: Y_LABEL.to_string(),
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Record, RecordStore, Schema};

    #[test]
    fn test_chart_points_follow_chronology() {
        let mut store = RecordStore::new("case", Schema::Extended);
        store.append(
            Record::new()
                .with(Field::Date, "2024-01-02")
                .with(Field::Time, "09:00")
                .with(Field::Description, "Ferry departs"),
        );
        store.append(
            Record::new()
                .with(Field::Date, "2024-01-01")
                .with(Field::Time, "10:00")
                .with(Field::Description, "Ticket bought"),
        );

        let chart = Chronology::build(&store.as_set()).unwrap().chart();

        assert_eq!(chart.title, CHART_TITLE);
        assert_eq!(chart.len(), 2);
        assert_eq!(chart.points[0].row, 1);
        assert_eq!(chart.points[0].label, "Ticket bought");
        assert_eq!(chart.points[1].label, "Ferry departs");
        assert!(chart.points[0].instant < chart.points[1].instant);
    }

    #[test]
    fn test_chart_serializes() {
        let mut store = RecordStore::new("case", Schema::Extended);
        store.append(
            Record::new()
                .with(Field::Date, "2024-01-01")
                .with(Field::Time, "10:00")
                .with(Field::Description, "Ticket bought"),
        );
        let chart = Chronology::build(&store.as_set()).unwrap().chart();

        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["points"][0]["instant"], "2024-01-01T10:00:00");
        assert_eq!(json["y_label"], "Events");
    }
}
