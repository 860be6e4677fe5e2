//! Export formats
//!
//! Each format is one entry of [`REGISTRY`]: its selector aliases, artifact
//! file name, MIME type and render function. Adding a format means adding a
//! variant and a registry line.

use crate::export::error::{ExportError, ExportResult};
use crate::storage::store::write_table;
use crate::storage::RecordSet;
use rust_xlsxwriter::Workbook;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Separator line between report pages
pub const PAGE_BREAK: &str = "\u{000C}";

/// Lines per report page: 10 mm cells on A4 with 10 mm margins
pub const DEFAULT_PAGE_LINES: usize = 27;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    /// Comma-separated table with a header row
    Tabular,
    /// Excel workbook, one worksheet with a header row
    Spreadsheet,
    /// "Field: value" lines per record, grouped into pages
    PaginatedText,
}

type RenderFn = fn(&RecordSet<'_>, usize, &mut Vec<u8>) -> ExportResult<()>;

pub(crate) struct FormatEntry {
    pub format: ExportFormat,
    pub aliases: &'static [&'static str],
    pub file_name: &'static str,
    pub content_type: &'static str,
    pub render: RenderFn,
}

pub(crate) static REGISTRY: &[FormatEntry] = &[
    FormatEntry {
        format: ExportFormat::Tabular,
        aliases: &["tabular", "csv"],
        file_name: "timeline_output.csv",
        content_type: "text/csv",
        render: render_tabular,
    },
    FormatEntry {
        format: ExportFormat::Spreadsheet,
        aliases: &["spreadsheet", "xlsx", "xls", "excel"],
        file_name: "timeline_output.xlsx",
        content_type: "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        render: render_spreadsheet,
    },
    FormatEntry {
        format: ExportFormat::PaginatedText,
        aliases: &["paginated-text", "pdf", "txt", "text"],
        file_name: "timeline_output.txt",
        content_type: "text/plain; charset=utf-8",
        render: render_paginated,
    },
];

impl ExportFormat {
    pub fn all() -> impl Iterator<Item = ExportFormat> {
        REGISTRY.iter().map(|entry| entry.format)
    }

    pub(crate) fn entry(&self) -> &'static FormatEntry {
        REGISTRY
            .iter()
            .find(|entry| entry.format == *self)
            .expect("every export format is registered")
    }

    /// Fixed artifact file name
    pub fn file_name(&self) -> &'static str {
        self.entry().file_name
    }

    pub fn content_type(&self) -> &'static str {
        self.entry().content_type
    }

    /// Canonical selector
    pub fn as_str(&self) -> &'static str {
        self.entry().aliases[0]
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        REGISTRY
            .iter()
            .find(|entry| entry.aliases.contains(&wanted.as_str()))
            .map(|entry| entry.format)
            .ok_or_else(|| ExportError::UnsupportedFormat(s.to_string()))
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn render_tabular(set: &RecordSet<'_>, _page_lines: usize, out: &mut Vec<u8>) -> ExportResult<()> {
    write_table(set.schema(), set.records(), out, b',')?;
    Ok(())
}

fn render_spreadsheet(set: &RecordSet<'_>, _page_lines: usize, out: &mut Vec<u8>) -> ExportResult<()> {
    let schema = set.schema();
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, name) in schema.header().into_iter().enumerate() {
        sheet.write_string(0, col as u16, name)?;
    }
    for (idx, record) in set.records().enumerate() {
        let row = idx as u32 + 1;
        for (col, value) in record.values_in(schema).enumerate() {
            if !value.is_empty() {
                sheet.write_string(row, col as u16, value)?;
            }
        }
    }

    out.extend_from_slice(&workbook.save_to_buffer()?);
    Ok(())
}

fn render_paginated(set: &RecordSet<'_>, page_lines: usize, out: &mut Vec<u8>) -> ExportResult<()> {
    for (idx, page) in paginate(set, page_lines).iter().enumerate() {
        if idx > 0 {
            out.extend_from_slice(PAGE_BREAK.as_bytes());
            out.push(b'\n');
        }
        for line in page {
            out.extend_from_slice(line.as_bytes());
            out.push(b'\n');
        }
    }
    Ok(())
}

/// Report lines grouped into pages.
///
/// Each record contributes one `"<Field>: <value>"` line per schema field,
/// in schema order, followed by one blank line. Line breaks inside a value
/// are folded into single spaces.
pub fn paginate(set: &RecordSet<'_>, page_lines: usize) -> Vec<Vec<String>> {
    let schema = set.schema();
    let lines: Vec<String> = set
        .records()
        .flat_map(|record| {
            schema
                .fields()
                .iter()
                .map(move |field| format!("{}: {}", field.name(), single_line(record.get(*field))))
                .chain(std::iter::once(String::new()))
        })
        .collect();

    lines
        .chunks(page_lines.max(1))
        .map(|chunk| chunk.to_vec())
        .collect()
}

fn single_line(value: &str) -> String {
    value
        .split("\r\n")
        .flat_map(|part| part.split(['\r', '\n']))
        .collect::<Vec<_>>()
        .join(" ")
}
