//! Query Routes
//!
//! - POST /api/v1/timelines/:name/query - Keyword filter over a timeline

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{QueryRequest, RecordsResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::query::RecordQuery;

/// POST /api/v1/timelines/:name/query
///
/// Returns the matching records in timeline order.
pub async fn run_query(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(req): Json<QueryRequest>,
) -> ApiResult<Json<RecordsResponse>> {
    let query = RecordQuery::from_pairs(&req.predicates)?;
    let store = state.directory.load(&name)?;
    let result = store.query(&query);

    Ok(Json(RecordsResponse::from_set(store.name(), &result)))
}
