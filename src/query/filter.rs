//! Record Query
//!
//! Keyword filtering over a record set. A query holds at most one substring
//! predicate per field:
//!
//! 1. A record matches a predicate when its field value contains the
//!    predicate text, compared case-insensitively
//! 2. An empty field value never matches a non-empty predicate
//! 3. Predicates are AND-combined; empty predicates constrain nothing
//!
//! The predicate text is matched literally.

use crate::query::error::{QueryError, QueryResult};
use crate::storage::{Field, Record, RecordSet};
use std::collections::BTreeMap;

/// Per-field substring predicates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordQuery {
    /// Lowercased needles keyed by field; never empty strings
    predicates: BTreeMap<Field, String>,
}

impl RecordQuery {
    /// A query without predicates (matches everything)
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: require `field` to contain `needle`.
    ///
    /// An empty needle removes any predicate on that field.
    pub fn contains(mut self, field: Field, needle: impl AsRef<str>) -> Self {
        let needle = needle.as_ref();
        if needle.is_empty() {
            self.predicates.remove(&field);
        } else {
            self.predicates.insert(field, needle.to_lowercase());
        }
        self
    }

    /// Build a query from field names as they arrive from a form or request.
    ///
    /// Names are matched leniently (`person_entity`, `Person_Entity`).
    pub fn from_pairs<I, K, V>(pairs: I) -> QueryResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut query = Self::new();
        for (name, needle) in pairs {
            let field = Field::parse_loose(name.as_ref())
                .ok_or_else(|| QueryError::UnknownField(name.as_ref().to_string()))?;
            query = query.contains(field, needle);
        }
        Ok(query)
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Active predicates as `(field, lowercased needle)`
    pub fn predicates(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        self.predicates.iter().map(|(f, n)| (*f, n.as_str()))
    }

    /// Check a single record against every predicate
    pub fn matches(&self, record: &Record) -> bool {
        self.predicates
            .iter()
            .all(|(field, needle)| record.get(*field).to_lowercase().contains(needle.as_str()))
    }

    /// Filter a record set, keeping its order
    pub fn execute<'a>(&self, set: &RecordSet<'a>) -> RecordSet<'a> {
        if self.is_empty() {
            return set.clone();
        }

        let rows = set
            .rows()
            .iter()
            .filter(|row| self.matches(row.record))
            .copied()
            .collect::<Vec<_>>();

        tracing::debug!(
            predicates = self.predicates.len(),
            scanned = set.len(),
            matched = rows.len(),
            "Query executed"
        );

        RecordSet::new(set.schema(), rows)
    }
}
