//! Sleuthline REST API
//!
//! HTTP API layer over the timeline directory, built with Axum.
//!
//! # Endpoints
//!
//! ## Timelines
//! - `GET /api/v1/timelines` - List timelines
//! - `POST /api/v1/timelines` - Create an empty timeline
//! - `GET /api/v1/timelines/:name/records` - All records
//! - `POST /api/v1/timelines/:name/records` - Append a record
//!
//! ## Query
//! - `POST /api/v1/timelines/:name/query` - Keyword filter
//!
//! ## Visualization
//! - `GET /api/v1/timelines/:name/chart` - Time-axis chart data, optional field predicates
//! - `GET /api/v1/timelines/:name/graph` - Relational graph data, optional field predicates
//!
//! ## Export
//! - `POST /api/v1/timelines/:name/export` - Tabular, xlsx spreadsheet or paginated text
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,no_run
//! use sleuthline::api::{serve, AppState};
//! use sleuthline::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let state = AppState::from_config(&config);
//!     serve(state, &config.api).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ApiConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Timeline routes
        .route(
            "/timelines",
            get(routes::timelines::list_timelines).post(routes::timelines::create_timeline),
        )
        .route(
            "/timelines/:name/records",
            get(routes::timelines::list_records).post(routes::timelines::append_record),
        )
        // Query routes
        .route("/timelines/:name/query", post(routes::query::run_query))
        // Visualization routes
        .route("/timelines/:name/chart", get(routes::visualize::chart))
        .route("/timelines/:name/graph", get(routes::visualize::graph))
        // Export routes
        .route("/timelines/:name/export", post(routes::export::export_timeline));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config.cors_origins);

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// Permissive CORS unless explicit origins are configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    state.directory.ensure_root()?;

    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Sleuthline API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Sleuthline API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::export::Exporter;
    use crate::graph::GraphOptions;
    use crate::storage::{Schema, TimelineDirectory};
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use tempfile::tempdir;
    use tower::util::ServiceExt;

    fn create_test_app() -> (Router, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let directory = TimelineDirectory::new(dir.path().join("timelines"), Schema::Extended);
        let exporter = Exporter::new(dir.path().join("out"));

        let state = AppState::new(
            directory,
            exporter,
            GraphOptions::default(),
            ApiConfig::default(),
        );
        let router = build_router(state);

        (router, dir)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn seed(app: &Router, name: &str, records: &[&str]) {
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/timelines",
                &format!(r#"{{"name": "{}"}}"#, name),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        for record in records {
            let response = app
                .clone()
                .oneshot(post_json(
                    &format!("/api/v1/timelines/{}/records", name),
                    record,
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }
    }

    const ALICE_BOB: &str = r#"{"fields": {"Date": "2024-03-02", "Time": "09:30", "Person_Entity": "Alice", "Description": "Met Bob", "Related_Entities": "Bob", "Relationship_Type": "contact"}}"#;
    const BOB: &str = r#"{"fields": {"Date": "2024-03-01", "Time": "18:00", "Person_Entity": "Bob", "Description": "Posted photo", "Source": "Twitter"}}"#;

    #[tokio::test]
    async fn test_health_live() {
        let (app, _dir) = create_test_app();

        let response = app.oneshot(get("/health/live")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready() {
        let (app, _dir) = create_test_app();

        let response = app.oneshot(get("/health/ready")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let (app, _dir) = create_test_app();
        seed(&app, "case1", &[]).await;

        let response = app.oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["timeline_count"], 1);
    }

    #[tokio::test]
    async fn test_list_timelines_empty() {
        let (app, _dir) = create_test_app();

        let response = app.oneshot(get("/api/v1/timelines")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["timelines"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_create_timeline_conflict() {
        let (app, _dir) = create_test_app();
        seed(&app, "case1", &[]).await;

        let response = app
            .clone()
            .oneshot(post_json("/api/v1/timelines", r#"{"name": "case1.csv"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = app.oneshot(get("/api/v1/timelines")).await.unwrap();
        let body = json_body(response).await;
        assert_eq!(body["timelines"], serde_json::json!(["case1"]));
    }

    #[tokio::test]
    async fn test_create_timeline_invalid_name() {
        let (app, _dir) = create_test_app();

        let response = app
            .oneshot(post_json("/api/v1/timelines", r#"{"name": "../escape"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_append_and_list_records() {
        let (app, _dir) = create_test_app();
        seed(&app, "case1", &[ALICE_BOB, BOB]).await;

        let response = app
            .oneshot(get("/api/v1/timelines/case1/records"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["count"], 2);
        assert_eq!(body["records"][0]["position"], 0);
        assert_eq!(body["records"][0]["Person_Entity"], "Alice");
        assert_eq!(body["records"][1]["Source"], "Twitter");
        // Backfilled to the full column set
        assert_eq!(body["records"][1]["Image"], "");
    }

    #[tokio::test]
    async fn test_append_unknown_field() {
        let (app, _dir) = create_test_app();
        seed(&app, "case1", &[]).await;

        let response = app
            .oneshot(post_json(
                "/api/v1/timelines/case1/records",
                r#"{"fields": {"Weather": "rain"}}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_timeline() {
        let (app, _dir) = create_test_app();

        let response = app
            .oneshot(get("/api/v1/timelines/nope/records"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "TIMELINE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_query_case_insensitive() {
        let (app, _dir) = create_test_app();
        seed(&app, "case1", &[ALICE_BOB, BOB]).await;

        let response = app
            .oneshot(post_json(
                "/api/v1/timelines/case1/query",
                r#"{"predicates": {"description": "PHOTO"}}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["count"], 1);
        assert_eq!(body["records"][0]["position"], 1);
    }

    #[tokio::test]
    async fn test_query_invalid_json() {
        let (app, _dir) = create_test_app();
        seed(&app, "case1", &[]).await;

        let response = app
            .oneshot(post_json("/api/v1/timelines/case1/query", "not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_chart_orders_by_time() {
        let (app, dir) = create_test_app();
        seed(&app, "case1", &[ALICE_BOB, BOB]).await;

        let response = app
            .oneshot(get("/api/v1/timelines/case1/chart"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["title"], "OSINT Investigation Timeline");
        assert_eq!(body["points"][0]["label"], "Posted photo");
        assert_eq!(body["points"][1]["label"], "Met Bob");

        assert!(dir.path().join("out").join("timeline_plot.json").exists());
    }

    #[tokio::test]
    async fn test_chart_bad_date() {
        let (app, _dir) = create_test_app();
        seed(
            &app,
            "case1",
            &[r#"{"fields": {"Date": "03/02/2024", "Time": "09:30"}}"#],
        )
        .await;

        let response = app
            .oneshot(get("/api/v1/timelines/case1/chart"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "DATETIME_PARSE_ERROR");
    }

    #[tokio::test]
    async fn test_graph_edges() {
        let (app, dir) = create_test_app();
        seed(&app, "case1", &[ALICE_BOB, BOB]).await;

        let response = app
            .oneshot(get("/api/v1/timelines/case1/graph"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        let edges = body["edges"].as_array().unwrap();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0]["source"], "Alice");
        assert_eq!(edges[0]["target"], "Bob");
        assert_eq!(edges[0]["relationship"], "contact");

        assert!(dir
            .path()
            .join("out")
            .join("relational_timeline.json")
            .exists());
    }

    #[tokio::test]
    async fn test_chart_with_predicates() {
        let (app, _dir) = create_test_app();
        seed(&app, "case1", &[ALICE_BOB, BOB]).await;

        let response = app
            .oneshot(get("/api/v1/timelines/case1/chart?description=PHOTO"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        let points = body["points"].as_array().unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0]["label"], "Posted photo");
    }

    #[tokio::test]
    async fn test_chart_unknown_predicate_field() {
        let (app, _dir) = create_test_app();
        seed(&app, "case1", &[BOB]).await;

        let response = app
            .oneshot(get("/api/v1/timelines/case1/chart?colour=red"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_graph_with_predicates() {
        let (app, _dir) = create_test_app();
        seed(&app, "case1", &[ALICE_BOB, BOB]).await;

        // Bob's own record is filtered out, so Alice's reference has no target
        let response = app
            .clone()
            .oneshot(get(
                "/api/v1/timelines/case1/graph?person_entity=alice&dedup=true",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["nodes"].as_array().unwrap().len(), 1);
        assert!(body["edges"].as_array().unwrap().is_empty());

        let response = app
            .oneshot(get("/api/v1/timelines/case1/graph?source=twitter"))
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["nodes"].as_array().unwrap().len(), 1);
        assert_eq!(body["nodes"][0]["entity"], "Bob");
    }

    #[tokio::test]
    async fn test_export_spreadsheet() {
        let (app, dir) = create_test_app();
        seed(&app, "case1", &[ALICE_BOB, BOB]).await;

        let response = app
            .oneshot(post_json(
                "/api/v1/timelines/case1/export",
                r#"{"format": "xlsx"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..4], b"PK\x03\x04");
        assert!(dir.path().join("out").join("timeline_output.xlsx").exists());
    }

    #[tokio::test]
    async fn test_export_tabular() {
        let (app, dir) = create_test_app();
        seed(&app, "case1", &[ALICE_BOB, BOB]).await;

        let response = app
            .oneshot(post_json(
                "/api/v1/timelines/case1/export",
                r#"{"format": "csv"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("timeline_output.csv"));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.starts_with("Date,Time,Location,Person_Entity"));
        assert_eq!(text.lines().count(), 3);

        assert!(dir.path().join("out").join("timeline_output.csv").exists());
    }

    #[tokio::test]
    async fn test_export_unsupported_format() {
        let (app, dir) = create_test_app();
        seed(&app, "case1", &[BOB]).await;

        let response = app
            .oneshot(post_json(
                "/api/v1/timelines/case1/export",
                r#"{"format": "docx"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "UNSUPPORTED_FORMAT");
        assert!(!dir.path().join("out").exists());
    }
}
