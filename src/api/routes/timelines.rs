//! Timeline Routes
//!
//! - GET  /api/v1/timelines - List persisted timelines
//! - POST /api/v1/timelines - Create an empty timeline
//! - GET  /api/v1/timelines/:name/records - All records of a timeline
//! - POST /api/v1/timelines/:name/records - Append a record and save

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{
    AppendRecordRequest, AppendRecordResponse, CreateTimelineRequest, RecordsResponse,
    TimelineListResponse, TimelineSummary,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;

/// GET /api/v1/timelines
pub async fn list_timelines(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<TimelineListResponse>> {
    let timelines = state.directory.list()?;
    Ok(Json(TimelineListResponse { timelines }))
}

/// POST /api/v1/timelines
///
/// Creates and persists an empty timeline. Existing timelines are never
/// replaced through this route.
pub async fn create_timeline(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTimelineRequest>,
) -> ApiResult<(StatusCode, Json<TimelineSummary>)> {
    if state.directory.exists(&req.name)? {
        return Err(ApiError::Conflict(format!(
            "Timeline {:?} already exists",
            req.name
        )));
    }

    let store = state.directory.create(&req.name)?;

    Ok((
        StatusCode::CREATED,
        Json(TimelineSummary {
            name: store.name().to_string(),
            schema: store.schema().to_string(),
            record_count: store.len(),
        }),
    ))
}

/// GET /api/v1/timelines/:name/records
pub async fn list_records(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Json<RecordsResponse>> {
    let store = state.directory.load(&name)?;
    Ok(Json(RecordsResponse::from_set(store.name(), &store.as_set())))
}

/// POST /api/v1/timelines/:name/records
///
/// Appends one record and saves the whole timeline.
pub async fn append_record(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(req): Json<AppendRecordRequest>,
) -> ApiResult<(StatusCode, Json<AppendRecordResponse>)> {
    let record = req.to_record()?;

    let mut store = state.directory.load(&name)?;
    store.append(record);
    state.directory.save(&store)?;

    tracing::info!(timeline = %store.name(), records = store.len(), "Record appended");

    Ok((
        StatusCode::CREATED,
        Json(AppendRecordResponse {
            status: "ok".to_string(),
            position: store.len() - 1,
            record_count: store.len(),
        }),
    ))
}
