//! Timeline directory
//!
//! Maps timeline names to CSV files inside one data directory:
//! `<data_dir>/<name>.csv`. Saving overwrites the whole file; the last
//! writer wins.

use crate::storage::error::{StorageError, StorageResult};
use crate::storage::schema::Schema;
use crate::storage::store::RecordStore;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};

const EXTENSION: &str = "csv";

/// Directory of persisted timelines, all read under one active schema
#[derive(Debug, Clone)]
pub struct TimelineDirectory {
    root: PathBuf,
    schema: Schema,
}

impl TimelineDirectory {
    pub fn new(root: impl Into<PathBuf>, schema: Schema) -> Self {
        Self {
            root: root.into(),
            schema,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    /// Path of the persisted form for a timeline name
    pub fn path_for(&self, name: &str) -> StorageResult<PathBuf> {
        let name = normalize_name(name)?;
        Ok(self.root.join(format!("{}.{}", name, EXTENSION)))
    }

    /// Names of all persisted timelines, sorted
    pub fn list(&self) -> StorageResult<Vec<String>> {
        self.ensure_root()?;

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn exists(&self, name: &str) -> StorageResult<bool> {
        Ok(self.path_for(name)?.is_file())
    }

    /// Create an empty timeline and persist it immediately
    pub fn create(&self, name: &str) -> StorageResult<RecordStore> {
        let store = RecordStore::new(normalize_name(name)?, self.schema);
        self.save(&store)?;
        tracing::info!(timeline = %store.name(), schema = %self.schema, "Created timeline");
        Ok(store)
    }

    /// Load a persisted timeline
    pub fn load(&self, name: &str) -> StorageResult<RecordStore> {
        let name = normalize_name(name)?;
        let path = self.path_for(&name)?;

        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StorageError::TimelineNotFound(name));
            }
            Err(e) => return Err(e.into()),
        };

        let store = RecordStore::read_csv(name, self.schema, BufReader::new(file))?;
        tracing::info!(
            timeline = %store.name(),
            records = store.len(),
            "Timeline loaded"
        );
        Ok(store)
    }

    /// Persist a store under its own name, replacing any previous version
    pub fn save(&self, store: &RecordStore) -> StorageResult<()> {
        self.save_as(store, store.name())
    }

    /// Persist a store under another name
    pub fn save_as(&self, store: &RecordStore, name: &str) -> StorageResult<()> {
        self.ensure_root()?;
        let path = self.path_for(name)?;

        let file = File::create(&path)?;
        store.write_csv(BufWriter::new(file))?;

        tracing::info!(
            timeline = %name,
            records = store.len(),
            path = %path.display(),
            "Timeline saved"
        );
        Ok(())
    }

    /// Create the data directory if missing
    pub fn ensure_root(&self) -> StorageResult<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
            tracing::debug!(path = %self.root.display(), "Created timeline directory");
        }
        Ok(())
    }
}

/// Validate a timeline name and strip a trailing `.csv`
pub fn normalize_name(name: &str) -> StorageResult<String> {
    let trimmed = name.trim();
    let stem = trimmed
        .strip_suffix(".csv")
        .unwrap_or(trimmed);

    let invalid = stem.is_empty()
        || stem.starts_with('.')
        || stem.contains(['/', '\\', '\0'])
        || stem.contains("..");
    if invalid {
        return Err(StorageError::InvalidName(name.to_string()));
    }
    Ok(stem.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::schema::Field;
    use crate::storage::types::Record;
    use tempfile::tempdir;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("case-42").unwrap(), "case-42");
        assert_eq!(normalize_name("case-42.csv").unwrap(), "case-42");
        assert_eq!(normalize_name("  spaced name ").unwrap(), "spaced name");

        for bad in ["", ".csv", "../etc/passwd", "a/b", "a\\b", ".hidden", "x..y"] {
            assert!(
                matches!(normalize_name(bad), Err(StorageError::InvalidName(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_load_missing_timeline() {
        let dir = tempdir().unwrap();
        let timelines = TimelineDirectory::new(dir.path(), Schema::Extended);

        let err = timelines.load("nope").unwrap_err();
        assert!(matches!(err, StorageError::TimelineNotFound(ref n) if n == "nope"));
    }

    #[test]
    fn test_create_save_load() {
        let dir = tempdir().unwrap();
        let timelines = TimelineDirectory::new(dir.path().join("timelines"), Schema::Extended);

        let mut store = timelines.create("case").unwrap();
        assert!(timelines.exists("case").unwrap());

        store.append(
            Record::new()
                .with(Field::Date, "2024-03-01")
                .with(Field::Time, "12:00")
                .with(Field::PersonEntity, "Alice"),
        );
        store.append(Record::new().with(Field::PersonEntity, "Bob"));
        timelines.save(&store).unwrap();

        let loaded = timelines.load("case.csv").unwrap();
        assert_eq!(loaded, store);
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempdir().unwrap();
        let timelines = TimelineDirectory::new(dir.path(), Schema::Extended);

        let mut store = RecordStore::new("case", Schema::Extended);
        store.append(Record::new().with(Field::Location, "first"));
        timelines.save(&store).unwrap();

        let replacement = RecordStore::new("case", Schema::Extended);
        timelines.save(&replacement).unwrap();

        assert!(timelines.load("case").unwrap().is_empty());
    }

    #[test]
    fn test_list_sorted_csv_only() {
        let dir = tempdir().unwrap();
        let timelines = TimelineDirectory::new(dir.path(), Schema::Extended);

        timelines.create("zeta").unwrap();
        timelines.create("alpha").unwrap();
        fs::write(dir.path().join("notes.txt"), "not a timeline").unwrap();

        assert_eq!(timelines.list().unwrap(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_base_timeline_widens_on_load() {
        let dir = tempdir().unwrap();
        let base = TimelineDirectory::new(dir.path(), Schema::Base);
        let mut store = RecordStore::new("legacy", Schema::Base);
        store.append(Record::new().with(Field::PersonEntity, "Alice"));
        base.save(&store).unwrap();

        let extended = TimelineDirectory::new(dir.path(), Schema::Extended);
        let loaded = extended.load("legacy").unwrap();
        let record = &loaded.records()[0];

        assert_eq!(loaded.schema(), Schema::Extended);
        assert_eq!(record.get(Field::PersonEntity), "Alice");
        assert!(record.has(Field::RelatedEntities));
        assert_eq!(record.get(Field::RelationshipType), "");
    }
}
