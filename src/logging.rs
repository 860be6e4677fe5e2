//! Logging setup
//!
//! Installs the global `tracing` subscriber for the binaries. `RUST_LOG`
//! takes precedence over the configured level.

use crate::config::LoggingConfig;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("sleuthline={},tower_http=info", config.level))
    });

    let to_file = config.file.is_some();
    let writer = match &config.file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let (pretty, json) = if config.format.eq_ignore_ascii_case("json") {
        (None, Some(tracing_subscriber::fmt::layer().json().with_writer(writer)))
    } else {
        (
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(!to_file)
                    .with_writer(writer),
            ),
            None,
        )
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(pretty)
        .with(json)
        .try_init()?;

    Ok(())
}
