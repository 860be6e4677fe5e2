//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.
//!
//! There is no "current timeline": every handler loads the store it works
//! on by name and drops it when the request ends.

use crate::config::{ApiConfig, Config};
use crate::export::Exporter;
use crate::graph::GraphOptions;
use crate::storage::TimelineDirectory;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Persisted timelines
    pub directory: Arc<TimelineDirectory>,
    /// Export artifact writer
    pub exporter: Arc<Exporter>,
    /// Default graph options, overridable per request
    pub graph_options: GraphOptions,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        directory: TimelineDirectory,
        exporter: Exporter,
        graph_options: GraphOptions,
        config: ApiConfig,
    ) -> Self {
        Self {
            directory: Arc::new(directory),
            exporter: Arc::new(exporter),
            graph_options,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Build state from a full configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.storage.directory(),
            config.export.exporter(),
            config.graph,
            config.api.clone(),
        )
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
