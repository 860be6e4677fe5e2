//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::api::error::{ApiError, ApiResult};
use crate::storage::{Field, Record, RecordSet};

// ============================================
// TIMELINE DTOs
// ============================================

/// Available timelines
#[derive(Debug, Serialize)]
pub struct TimelineListResponse {
    pub timelines: Vec<String>,
}

/// Create timeline request
#[derive(Debug, Deserialize)]
pub struct CreateTimelineRequest {
    /// Timeline name; a trailing `.csv` is accepted
    pub name: String,
}

/// Short description of a timeline
#[derive(Debug, Serialize)]
pub struct TimelineSummary {
    pub name: String,
    pub schema: String,
    pub record_count: usize,
}

// ============================================
// RECORD DTOs
// ============================================

/// New record request: column name → value
#[derive(Debug, Deserialize)]
pub struct AppendRecordRequest {
    #[serde(default)]
    pub fields: HashMap<String, String>,
}

impl AppendRecordRequest {
    /// Resolve column names; unknown names are rejected
    pub fn to_record(&self) -> ApiResult<Record> {
        let mut record = Record::new();
        for (name, value) in &self.fields {
            let field = Field::parse_loose(name)
                .ok_or_else(|| ApiError::Validation(format!("Unknown field: {}", name)))?;
            record.set(field, value.clone());
        }
        Ok(record)
    }
}

/// New record response
#[derive(Debug, Serialize)]
pub struct AppendRecordResponse {
    /// Status: "ok"
    pub status: String,
    /// Store position of the new record
    pub position: usize,
    pub record_count: usize,
}

/// One record with its store position
#[derive(Debug, Serialize)]
pub struct RecordRow {
    pub position: usize,
    #[serde(flatten)]
    pub record: Record,
}

/// Records of a timeline or query result
#[derive(Debug, Serialize)]
pub struct RecordsResponse {
    pub timeline: String,
    pub count: usize,
    pub records: Vec<RecordRow>,
}

impl RecordsResponse {
    pub fn from_set(timeline: &str, set: &RecordSet<'_>) -> Self {
        let records: Vec<RecordRow> = set
            .rows()
            .iter()
            .map(|row| RecordRow {
                position: row.position,
                record: row.record.clone(),
            })
            .collect();

        Self {
            timeline: timeline.to_string(),
            count: records.len(),
            records,
        }
    }
}

// ============================================
// QUERY DTOs
// ============================================

/// Query request: column name → substring
#[derive(Debug, Default, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub predicates: HashMap<String, String>,
}

// ============================================
// VISUALIZATION DTOs
// ============================================

/// Graph option overrides
#[derive(Debug, Default, Deserialize)]
pub struct GraphParams {
    #[serde(default)]
    pub dedup: Option<bool>,
    #[serde(default)]
    pub include_self: Option<bool>,
}

// ============================================
// EXPORT DTOs
// ============================================

/// Export request
#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    /// Format selector: csv, xlsx, pdf, tabular, spreadsheet, paginated-text
    pub format: String,
    /// Optional filter; the whole timeline is exported when empty
    #[serde(default)]
    pub predicates: HashMap<String, String>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "unhealthy"
    pub status: String,
    /// "ok" or "error"
    pub storage: String,
    pub timeline_count: usize,
    pub uptime_seconds: u64,
    pub version: String,
}
