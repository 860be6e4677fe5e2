//! Sleuthline Export
//!
//! Writes record sets and derived visualization data to artifacts with fixed
//! names inside one output directory:
//!
//! | Artifact                    | Content                                |
//! |-----------------------------|----------------------------------------|
//! | `timeline_output.csv`       | tabular export                         |
//! | `timeline_output.xlsx`      | spreadsheet workbook                   |
//! | `timeline_output.txt`       | paginated text report                  |
//! | `timeline_plot.json`        | time-axis chart data                   |
//! | `relational_timeline.json`  | relational graph nodes and edges       |
//!
//! Repeated exports of the same kind overwrite the previous artifact. An
//! artifact is rendered completely in memory before its file is touched.

mod error;
mod formats;

pub use error::{ExportError, ExportResult};
pub use formats::{paginate, ExportFormat, DEFAULT_PAGE_LINES, PAGE_BREAK};

use crate::chronology::TimelineChart;
use crate::graph::RelationalGraph;
use crate::storage::RecordSet;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CHART_FILE: &str = "timeline_plot.json";
pub const GRAPH_FILE: &str = "relational_timeline.json";

/// A written export
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub format: ExportFormat,
    pub path: PathBuf,
    pub content: Vec<u8>,
}

impl ExportArtifact {
    pub fn file_name(&self) -> &'static str {
        self.format.file_name()
    }

    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }
}

/// Renders and writes export artifacts
#[derive(Debug, Clone)]
pub struct Exporter {
    output_dir: PathBuf,
    page_lines: usize,
}

impl Exporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            page_lines: DEFAULT_PAGE_LINES,
        }
    }

    /// Builder: lines per paginated-text page
    pub fn with_page_lines(mut self, page_lines: usize) -> Self {
        self.page_lines = page_lines.max(1);
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn artifact_path(&self, format: ExportFormat) -> PathBuf {
        self.output_dir.join(format.file_name())
    }

    /// Render a record set without writing anything
    pub fn render(&self, set: &RecordSet<'_>, format: ExportFormat) -> ExportResult<Vec<u8>> {
        let mut content = Vec::new();
        (format.entry().render)(set, self.page_lines, &mut content)?;
        Ok(content)
    }

    /// Render and write a record set to the format's artifact
    pub fn export(&self, set: &RecordSet<'_>, format: ExportFormat) -> ExportResult<ExportArtifact> {
        let content = self.render(set, format)?;
        let path = self.artifact_path(format);
        self.write(&path, &content)?;

        tracing::info!(
            format = %format,
            records = set.len(),
            path = %path.display(),
            "Export written"
        );

        Ok(ExportArtifact {
            format,
            path,
            content,
        })
    }

    /// Export with a textual selector (`csv`, `xlsx`, `pdf`, ...)
    pub fn export_as(&self, set: &RecordSet<'_>, selector: &str) -> ExportResult<ExportArtifact> {
        let format = selector.parse::<ExportFormat>()?;
        self.export(set, format)
    }

    /// Write chart data for an external plotter
    pub fn write_chart(&self, chart: &TimelineChart) -> ExportResult<PathBuf> {
        self.write_json(CHART_FILE, chart)
    }

    /// Write relational graph data for an external diagram renderer
    pub fn write_graph(&self, graph: &RelationalGraph) -> ExportResult<PathBuf> {
        self.write_json(GRAPH_FILE, graph)
    }

    fn write_json<T: Serialize>(&self, file_name: &str, value: &T) -> ExportResult<PathBuf> {
        let content = serde_json::to_vec_pretty(value)?;
        let path = self.output_dir.join(file_name);
        self.write(&path, &content)?;
        tracing::info!(path = %path.display(), "Visualization data written");
        Ok(path)
    }

    fn write(&self, path: &Path, content: &[u8]) -> ExportResult<()> {
        if !self.output_dir.exists() {
            fs::create_dir_all(&self.output_dir)?;
        }
        fs::write(path, content)?;
        Ok(())
    }
}
