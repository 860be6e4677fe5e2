//! Record store
//!
//! In-memory table of records for one named timeline, plus the CSV codec
//! for its persisted form:
//!
//! ```text
//! Date,Time,Location,Person_Entity,...,Relationship_Type   <- schema order
//! 2024-01-01,10:00,Berlin,Alice,...,colleague
//! ```
//!
//! On read, columns the active schema knows nothing about are ignored and
//! schema fields missing from the file are backfilled with empty values, so
//! timelines written under the base schema load under the extended one.

use crate::query::RecordQuery;
use crate::storage::error::StorageResult;
use crate::storage::schema::{Field, Schema};
use crate::storage::types::{Record, RecordSet};
use std::io::{Read, Write};

/// Records of one timeline, in insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordStore {
    name: String,
    schema: Schema,
    records: Vec<Record>,
}

impl RecordStore {
    /// Create an empty store
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
            records: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record; unset schema fields become empty, fields outside the
    /// schema are dropped. Does not persist.
    pub fn append(&mut self, record: Record) {
        self.records.push(record.conformed(self.schema));
    }

    /// Append a record built from `(field, value)` pairs
    pub fn append_fields<I, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = (Field, V)>,
        V: Into<String>,
    {
        let record = values
            .into_iter()
            .fold(Record::new(), |record, (field, value)| record.with(field, value));
        self.append(record);
    }

    /// View over every record of the store
    pub fn as_set(&self) -> RecordSet<'_> {
        RecordSet::from_records(self.schema, &self.records)
    }

    /// Filter the store, keeping store order
    pub fn query(&self, query: &RecordQuery) -> RecordSet<'_> {
        query.execute(&self.as_set())
    }

    /// Read a store from its CSV form
    pub fn read_csv<R: Read>(name: impl Into<String>, schema: Schema, input: R) -> StorageResult<Self> {
        let name = name.into();
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);

        let headers = reader.headers()?.clone();
        let mut columns: Vec<Option<Field>> = Vec::with_capacity(headers.len());
        for header in headers.iter() {
            match Field::from_name(header.trim()) {
                Some(field) if schema.contains(field) => columns.push(Some(field)),
                _ => {
                    tracing::warn!(
                        timeline = %name,
                        column = %header,
                        schema = %schema,
                        "Ignoring column outside the active schema"
                    );
                    columns.push(None);
                }
            }
        }

        let missing: Vec<&str> = schema
            .fields()
            .iter()
            .filter(|f| !columns.contains(&Some(**f)))
            .map(|f| f.name())
            .collect();
        if !missing.is_empty() && !headers.is_empty() {
            tracing::info!(
                timeline = %name,
                missing = ?missing,
                "Backfilling columns absent from persisted timeline"
            );
        }

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let mut record = Record::new();
            for (column, value) in columns.iter().zip(row.iter()) {
                if let Some(field) = column {
                    record.set(*field, value);
                }
            }
            records.push(record.conformed(schema));
        }

        Ok(Self {
            name,
            schema,
            records,
        })
    }

    /// Write the store in CSV form: header, then one row per record
    pub fn write_csv<W: Write>(&self, output: W) -> StorageResult<()> {
        write_table(self.schema, self.records.iter(), output, b',')?;
        Ok(())
    }
}

/// Write records as a delimited table with a header row in schema order
pub(crate) fn write_table<'r, I, W>(
    schema: Schema,
    records: I,
    output: W,
    delimiter: u8,
) -> Result<(), csv::Error>
where
    I: IntoIterator<Item = &'r Record>,
    W: Write,
{
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(output);

    writer.write_record(schema.header())?;
    for record in records {
        writer.write_record(record.values_in(schema))?;
    }
    writer.flush()?;
    Ok(())
}
