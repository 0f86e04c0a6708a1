//! # Experiment Store
//!
//! Read access to experiment records keyed by slug.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::RwLock;

use super::errors::{StoreError, StoreResult};
use super::model::Experiment;

/// Read-side store interface used by the REST layer
pub trait ExperimentStore: Send + Sync {
    /// Records satisfying `predicate`, ordered by slug ascending
    fn scan(&self, predicate: &dyn Fn(&Experiment) -> bool) -> StoreResult<Vec<Experiment>>;

    /// Record with exactly this slug
    fn get(&self, slug: &str) -> StoreResult<Option<Experiment>>;

    /// Number of records held
    fn len(&self) -> StoreResult<usize>;

    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

/// In-memory store indexed by slug
///
/// A `BTreeMap` keeps iteration in slug order, so scans need no extra sort.
#[derive(Debug, Default)]
pub struct InMemoryExperimentStore {
    records: RwLock<BTreeMap<String, Experiment>>,
}

impl InMemoryExperimentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from records, rejecting invalid or duplicate ones
    pub fn from_records(records: impl IntoIterator<Item = Experiment>) -> StoreResult<Self> {
        let store = Self::new();
        for record in records {
            store.insert(record)?;
        }
        Ok(store)
    }

    /// Load a JSON array of records from a fixture file
    pub fn load_json(path: &Path) -> StoreResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let records: Vec<Experiment> =
            serde_json::from_str(&content).map_err(|source| StoreError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let count = records.len();
        let store = Self::from_records(records)?;
        tracing::debug!(path = %path.display(), records = count, "loaded experiment records");
        Ok(store)
    }

    /// Add a record
    pub fn insert(&self, record: Experiment) -> StoreResult<()> {
        record.validate()?;

        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        if records.contains_key(&record.slug) {
            return Err(StoreError::DuplicateSlug(record.slug));
        }
        records.insert(record.slug.clone(), record);
        Ok(())
    }
}

impl ExperimentStore for InMemoryExperimentStore {
    fn scan(&self, predicate: &dyn Fn(&Experiment) -> bool) -> StoreResult<Vec<Experiment>> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.values().filter(|r| predicate(r)).cloned().collect())
    }

    fn get(&self, slug: &str) -> StoreResult<Option<Experiment>> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.get(slug).cloned())
    }

    fn len(&self) -> StoreResult<usize> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiment::Status;
    use std::io::Write;

    #[test]
    fn test_scan_is_slug_ordered() {
        let store = InMemoryExperimentStore::from_records(vec![
            Experiment::new("zeta", Status::Live),
            Experiment::new("alpha", Status::Live),
            Experiment::new("mid", Status::Draft),
        ])
        .unwrap();

        let slugs: Vec<_> = store
            .scan(&|_| true)
            .unwrap()
            .into_iter()
            .map(|e| e.slug)
            .collect();
        assert_eq!(slugs, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_scan_applies_predicate() {
        let store = InMemoryExperimentStore::from_records(vec![
            Experiment::new("a", Status::Live),
            Experiment::new("b", Status::Draft),
        ])
        .unwrap();

        let drafts = store.scan(&|e| e.status == Status::Draft).unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].slug, "b");
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let result = InMemoryExperimentStore::from_records(vec![
            Experiment::new("same", Status::Live),
            Experiment::new("same", Status::Draft),
        ]);
        assert!(matches!(result, Err(StoreError::DuplicateSlug(slug)) if slug == "same"));
    }

    #[test]
    fn test_get_by_slug() {
        let store = InMemoryExperimentStore::new();
        store.insert(Experiment::new("found", Status::Complete)).unwrap();

        assert_eq!(store.get("found").unwrap().unwrap().status, Status::Complete);
        assert!(store.get("missing").unwrap().is_none());
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_load_json_fixture() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"slug": "b-exp", "status": "Live", "is_first_run": true}},
                {{"slug": "a-exp", "status": "Draft", "is_localized": true}}
            ]"#
        )
        .unwrap();

        let store = InMemoryExperimentStore::load_json(file.path()).unwrap();
        assert_eq!(store.len().unwrap(), 2);
        assert!(store.get("a-exp").unwrap().unwrap().is_localized);
    }

    #[test]
    fn test_load_json_errors() {
        let missing_path = Path::new("/nonexistent/experiments.json");
        let missing = InMemoryExperimentStore::load_json(missing_path);
        assert!(matches!(missing, Err(StoreError::Io { .. })));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"slug": "not-an-array"}}"#).unwrap();
        let parsed = InMemoryExperimentStore::load_json(file.path());
        assert!(matches!(parsed, Err(StoreError::Parse { .. })));
    }
}
