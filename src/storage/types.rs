//! Core data types for timeline records
//!
//! - `Record`: one investigative event, a field → text mapping
//! - `RecordSet`: an ordered, read-only view over records of one store
//!   (the whole store, or the result of a query)
//! - `Row`: one entry of a record set, remembering its store position

use crate::storage::schema::{Field, Schema};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single timeline event
///
/// Records have no identifier; their identity is their position in the store.
/// Fields that were never set read as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    values: BTreeMap<Field, String>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set a field
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Set a field, replacing any previous value
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Value of a field, empty if unset
    pub fn get(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Whether the field is physically present (possibly empty)
    pub fn has(&self, field: Field) -> bool {
        self.values.contains_key(&field)
    }

    /// Fields present in this record, in schema order
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.values.keys().copied()
    }

    /// Bring the record in line with a schema: every schema field present,
    /// fields outside the schema dropped.
    pub fn conformed(mut self, schema: Schema) -> Self {
        self.values.retain(|field, _| schema.contains(*field));
        for field in schema.fields() {
            self.values.entry(*field).or_default();
        }
        self
    }

    /// Values in schema order, empty strings for unset fields
    pub fn values_in(&self, schema: Schema) -> impl Iterator<Item = &str> + '_ {
        schema.fields().iter().map(move |f| self.get(*f))
    }
}

/// One entry of a record set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row<'a> {
    /// Position of the record in its store (0-based)
    pub position: usize,
    pub record: &'a Record,
}

/// Ordered read-only view over records of a single store
///
/// Produced by [`RecordStore::as_set`](crate::storage::RecordStore::as_set)
/// for the whole store, and by queries for filtered subsets. Row order is
/// always the store's insertion order unless a later stage reorders it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSet<'a> {
    schema: Schema,
    rows: Vec<Row<'a>>,
}

impl<'a> RecordSet<'a> {
    pub fn new(schema: Schema, rows: Vec<Row<'a>>) -> Self {
        Self { schema, rows }
    }

    /// View over a slice of records, positions counted from zero
    pub fn from_records(schema: Schema, records: &'a [Record]) -> Self {
        let rows = records
            .iter()
            .enumerate()
            .map(|(position, record)| Row { position, record })
            .collect();
        Self { schema, rows }
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn rows(&self) -> &[Row<'a>] {
        &self.rows
    }

    pub fn records(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.rows.iter().map(|row| row.record)
    }

    /// Store positions of the rows, in set order
    pub fn positions(&self) -> Vec<usize> {
        self.rows.iter().map(|row| row.position).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Clone the underlying records out of the view
    pub fn to_records(&self) -> Vec<Record> {
        self.records().cloned().collect()
    }
}
