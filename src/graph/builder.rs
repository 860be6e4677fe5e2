//! Relational Graph Builder
//!
//! Derives timed edges between entities from the free-text
//! `Related_Entities` field:
//!
//! ```text
//! for R in chronology:
//!     for E in R.Related_Entities split on ';':
//!         for R2 in chronology where R2.Person_Entity == E:
//!             edge (R.Person_Entity → R2.Person_Entity, R.instant, R2.instant)
//! ```
//!
//! Matching is exact and case-sensitive. Repeated assertions produce repeated
//! edges and a record may match itself; both are kept unless the options say
//! otherwise.

use crate::chronology::Chronology;
use crate::graph::error::{GraphError, GraphResult};
use crate::storage::Field;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Edge filtering applied after derivation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphOptions {
    /// Keep only the first edge per (source, target, source instant, target instant)
    pub dedup_edges: bool,
    /// Keep edges where a record matched itself
    pub include_self_edges: bool,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            dedup_edges: false,
            include_self_edges: true,
        }
    }
}

/// A timed relation between two entities
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EntityEdge {
    /// Person_Entity of the asserting record
    pub source: String,
    /// Person_Entity of the matched record
    pub target: String,
    pub source_instant: NaiveDateTime,
    pub target_instant: NaiveDateTime,
    /// Relationship_Type of the asserting record, possibly empty
    pub relationship: String,
}

/// One plotted event: an entity positioned at an instant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityNode {
    pub entity: String,
    pub instant: NaiveDateTime,
    pub description: String,
    /// Store position of the record
    pub row: usize,
}

/// Nodes and edges for a relationship diagram
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RelationalGraph {
    /// One node per record, chronological
    pub nodes: Vec<EntityNode>,
    pub edges: Vec<EntityEdge>,
    /// Distinct Person_Entity values in order of first appearance
    pub entities: Vec<String>,
}

/// Derive the relational graph of a chronology
pub fn build_graph(chronology: &Chronology<'_>, options: &GraphOptions) -> GraphResult<RelationalGraph> {
    let schema = chronology.schema();
    for field in [Field::PersonEntity, Field::RelatedEntities] {
        if !schema.contains(field) {
            return Err(GraphError::MissingField { field, schema });
        }
    }

    let entries = chronology.entries();

    // Trimmed Person_Entity -> entry indices, chronological
    let mut by_entity: HashMap<&str, Vec<usize>> = HashMap::new();
    for (idx, entry) in entries.iter().enumerate() {
        by_entity
            .entry(entry.record.get(Field::PersonEntity).trim())
            .or_default()
            .push(idx);
    }

    let mut edges = Vec::new();
    let mut seen = HashSet::new();
    let mut duplicates = 0usize;
    let mut self_edges = 0usize;

    for (idx, entry) in entries.iter().enumerate() {
        let related = entry.record.get(Field::RelatedEntities);
        if related.is_empty() {
            continue;
        }

        let source = entry.record.get(Field::PersonEntity).trim();
        let relationship = entry.record.get(Field::RelationshipType);

        for candidate in related.split(';').map(str::trim).filter(|c| !c.is_empty()) {
            let Some(matches) = by_entity.get(candidate) else {
                continue;
            };

            for &target_idx in matches {
                if target_idx == idx && !options.include_self_edges {
                    self_edges += 1;
                    continue;
                }

                let target = &entries[target_idx];
                let edge = EntityEdge {
                    source: source.to_string(),
                    target: target.record.get(Field::PersonEntity).trim().to_string(),
                    source_instant: entry.instant,
                    target_instant: target.instant,
                    relationship: relationship.to_string(),
                };

                if options.dedup_edges {
                    let key = (
                        edge.source.clone(),
                        edge.target.clone(),
                        edge.source_instant,
                        edge.target_instant,
                    );
                    if !seen.insert(key) {
                        duplicates += 1;
                        continue;
                    }
                }

                edges.push(edge);
            }
        }
    }

    let nodes = entries
        .iter()
        .map(|entry| EntityNode {
            entity: entry.record.get(Field::PersonEntity).to_string(),
            instant: entry.instant,
            description: entry.record.get(Field::Description).to_string(),
            row: entry.position,
        })
        .collect::<Vec<_>>();

    let mut entities: Vec<String> = Vec::new();
    for node in &nodes {
        if !entities.contains(&node.entity) {
            entities.push(node.entity.clone());
        }
    }

    tracing::debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        dropped_duplicates = duplicates,
        dropped_self = self_edges,
        "Relational graph built"
    );

    Ok(RelationalGraph {
        nodes,
        edges,
        entities,
    })
}
