//! Timeline schema
//!
//! Every record of a timeline carries the same ordered set of fields.
//! Two schema versions exist:
//! - `Base`: the nine original event fields
//! - `Extended`: the base fields plus `Related_Entities` and `Relationship_Type`
//!
//! Field order matters: it is the column order of persisted timelines and the
//! line order of exported reports.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single named field of a timeline record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "Date")]
    Date,
    #[serde(rename = "Time")]
    Time,
    #[serde(rename = "Location")]
    Location,
    #[serde(rename = "Person_Entity")]
    PersonEntity,
    #[serde(rename = "Image")]
    Image,
    #[serde(rename = "Video")]
    Video,
    #[serde(rename = "Description")]
    Description,
    #[serde(rename = "Source")]
    Source,
    #[serde(rename = "Source_Link")]
    SourceLink,
    #[serde(rename = "Related_Entities")]
    RelatedEntities,
    #[serde(rename = "Relationship_Type")]
    RelationshipType,
}

const BASE_FIELDS: [Field; 9] = [
    Field::Date,
    Field::Time,
    Field::Location,
    Field::PersonEntity,
    Field::Image,
    Field::Video,
    Field::Description,
    Field::Source,
    Field::SourceLink,
];

const EXTENDED_FIELDS: [Field; 11] = [
    Field::Date,
    Field::Time,
    Field::Location,
    Field::PersonEntity,
    Field::Image,
    Field::Video,
    Field::Description,
    Field::Source,
    Field::SourceLink,
    Field::RelatedEntities,
    Field::RelationshipType,
];

impl Field {
    /// Column name as written in persisted timelines
    pub fn name(&self) -> &'static str {
        match self {
            Field::Date => "Date",
            Field::Time => "Time",
            Field::Location => "Location",
            Field::PersonEntity => "Person_Entity",
            Field::Image => "Image",
            Field::Video => "Video",
            Field::Description => "Description",
            Field::Source => "Source",
            Field::SourceLink => "Source_Link",
            Field::RelatedEntities => "Related_Entities",
            Field::RelationshipType => "Relationship_Type",
        }
    }

    /// Look up a field by its exact column name
    pub fn from_name(name: &str) -> Option<Field> {
        EXTENDED_FIELDS.iter().copied().find(|f| f.name() == name)
    }

    /// Look up a field leniently: case-insensitive, with `_`, `-` and spaces
    /// treated alike (`person_entity`, `Person Entity`, `source-link`).
    pub fn parse_loose(name: &str) -> Option<Field> {
        let wanted = normalize(name);
        EXTENDED_FIELDS
            .iter()
            .copied()
            .find(|f| normalize(f.name()) == wanted)
    }
}

fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Schema version of a timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Schema {
    /// Nine event fields, no relationship columns
    Base,
    /// Base fields plus `Related_Entities` and `Relationship_Type`
    #[default]
    Extended,
}

impl Schema {
    /// Fields in column order
    pub fn fields(&self) -> &'static [Field] {
        match self {
            Schema::Base => &BASE_FIELDS,
            Schema::Extended => &EXTENDED_FIELDS,
        }
    }

    pub fn contains(&self, field: Field) -> bool {
        self.fields().contains(&field)
    }

    /// Column names in order, as used for the header row
    pub fn header(&self) -> Vec<&'static str> {
        self.fields().iter().map(|f| f.name()).collect()
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schema::Base => write!(f, "base"),
            Schema::Extended => write!(f, "extended"),
        }
    }
}
