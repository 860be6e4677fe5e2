//! Visualization Routes
//!
//! - GET /api/v1/timelines/:name/chart - Time-axis chart data
//! - GET /api/v1/timelines/:name/graph - Relational graph data
//!
//! Any other query parameter is a field predicate, so
//! `?person_entity=alice` charts or relates only the matching records.
//! Both also refresh their JSON artifact in the export directory.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::dto::GraphParams;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::chronology::{Chronology, TimelineChart};
use crate::graph::{build_graph, GraphOptions, RelationalGraph};
use crate::query::RecordQuery;

const GRAPH_OPTION_KEYS: [&str; 2] = ["dedup", "include_self"];

/// GET /api/v1/timelines/:name/chart
pub async fn chart(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Query(predicates): Query<HashMap<String, String>>,
) -> ApiResult<Json<TimelineChart>> {
    let query = RecordQuery::from_pairs(&predicates)?;

    let store = state.directory.load(&name)?;
    let chart = Chronology::build(&store.query(&query))?.chart();

    state.exporter.write_chart(&chart)?;

    Ok(Json(chart))
}

/// GET /api/v1/timelines/:name/graph
///
/// Query parameters `dedup` and `include_self` override the configured
/// graph options.
pub async fn graph(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Query(params): Query<GraphParams>,
    Query(predicates): Query<HashMap<String, String>>,
) -> ApiResult<Json<RelationalGraph>> {
    let options = GraphOptions {
        dedup_edges: params.dedup.unwrap_or(state.graph_options.dedup_edges),
        include_self_edges: params
            .include_self
            .unwrap_or(state.graph_options.include_self_edges),
    };
    let query = RecordQuery::from_pairs(
        predicates
            .iter()
            .filter(|(key, _)| !GRAPH_OPTION_KEYS.contains(&key.as_str())),
    )?;

    let store = state.directory.load(&name)?;
    let chronology = Chronology::build(&store.query(&query))?;
    let graph = build_graph(&chronology, &options)?;

    state.exporter.write_graph(&graph)?;

    Ok(Json(graph))
}
