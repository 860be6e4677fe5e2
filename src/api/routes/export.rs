//! Export Routes
//!
//! - POST /api/v1/timelines/:name/export - Write an export artifact and
//!   return it as a download

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::api::dto::ExportRequest;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::export::ExportFormat;
use crate::query::RecordQuery;

/// POST /api/v1/timelines/:name/export
///
/// Exports the whole timeline, or the records matching `predicates`.
pub async fn export_timeline(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(req): Json<ExportRequest>,
) -> ApiResult<Response> {
    // Reject unknown formats before touching any file
    let format = req.format.parse::<ExportFormat>()?;
    let query = RecordQuery::from_pairs(&req.predicates)?;

    let store = state.directory.load(&name)?;
    let set = store.query(&query);
    let artifact = state.exporter.export(&set, format)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, artifact.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", artifact.file_name()),
            ),
        ],
        Body::from(artifact.content),
    )
        .into_response())
}
