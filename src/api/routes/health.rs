//! Health Routes
//!
//! Health check endpoints for monitoring.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (data directory usable)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Returns 200 if timelines can be listed.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    match state.directory.list() {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// GET /health
///
/// Full health status with component details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let listing = state.directory.list();

    let (status, storage, timeline_count) = match &listing {
        Ok(names) => ("healthy", "ok", names.len()),
        Err(e) => {
            tracing::warn!(error = %e, "Timeline directory unavailable");
            ("unhealthy", "error", 0)
        }
    };

    Json(HealthResponse {
        status: status.to_string(),
        storage: storage.to_string(),
        timeline_count,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
