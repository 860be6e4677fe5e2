//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::export::{Exporter, DEFAULT_PAGE_LINES};
use crate::graph::GraphOptions;
use crate::storage::{Schema, TimelineDirectory};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub graph: GraphOptions,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Timeline storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default)]
    pub schema: Schema,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("sleuthline").join("timelines").to_string_lossy().to_string())
        .unwrap_or_else(|| "./timelines".to_string())
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            schema: Schema::default(),
        }
    }
}

impl StorageConfig {
    pub fn directory(&self) -> TimelineDirectory {
        TimelineDirectory::new(&self.data_dir, self.schema)
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Export artifact configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    #[serde(default = "default_page_lines")]
    pub page_lines: usize,
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_page_lines() -> usize {
    DEFAULT_PAGE_LINES
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            page_lines: default_page_lines(),
        }
    }
}

impl ExportConfig {
    pub fn exporter(&self) -> Exporter {
        Exporter::new(&self.output_dir).with_page_lines(self.page_lines)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::from_toml(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("sleuthline").join("config.toml")),
            Some(PathBuf::from("/etc/sleuthline/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        // Fall back to environment-only config
        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Storage overrides
        if let Some(data_dir) = lookup("SLEUTHLINE_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }

        // Export overrides
        if let Some(output_dir) = lookup("SLEUTHLINE_EXPORT_DIR") {
            self.export.output_dir = output_dir;
        }

        // API overrides
        if let Some(host) = lookup("SLEUTHLINE_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = lookup("SLEUTHLINE_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Logging overrides
        if let Some(level) = lookup("SLEUTHLINE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("SLEUTHLINE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Sleuthline Configuration
#
# Environment variables override these settings:
# - SLEUTHLINE_DATA_DIR
# - SLEUTHLINE_EXPORT_DIR
# - SLEUTHLINE_API_HOST
# - SLEUTHLINE_API_PORT
# - SLEUTHLINE_LOG_LEVEL
# - SLEUTHLINE_LOG_FORMAT

[storage]
# Directory holding one <name>.csv file per timeline
# (default: <local data dir>/sleuthline/timelines)
# data_dir = "/srv/sleuthline/timelines"

# Record schema: "extended" (with Related_Entities and Relationship_Type) or "base"
schema = "extended"

[api]
# API server host
host = "127.0.0.1"

# API server port
port = 5000

# Allowed CORS origins (empty = any origin)
cors_origins = []

[export]
# Directory receiving timeline_output.* and visualization data files
output_dir = "."

# Lines per page of the paginated text report
page_lines = 27

[graph]
# Collapse identical edges asserted more than once
dedup_edges = false

# Keep edges where a record names its own Person_Entity
include_self_edges = true

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/sleuthline/sleuthline.log"
"#
    .to_string()
}
