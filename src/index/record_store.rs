use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};
use crate::analysis::analyzer::NameAnalyzer;
use crate::core::error::{Error, Result};
use crate::core::types::{BirthMonth, Record, RecordId};
use crate::index::buckets::BucketMap;
use crate::search::prefix::PrefixIndex;

/// Canonical id → record map plus the three secondary views over it.
///
/// The canonical map is the only owner of a record's lifetime; the country
/// buckets, birth-month buckets and name trie hold `Arc` handles to the same
/// value. Every insert and delete goes through this type so all four
/// structures change together.
pub struct RecordStore {
    records: HashMap<RecordId, Arc<Record>>,
    by_country: BucketMap<String, Arc<Record>>,
    by_birth_month: BucketMap<BirthMonth, Arc<Record>>,
    by_name: PrefixIndex<Arc<Record>>,
    analyzer: NameAnalyzer,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::with_analyzer(NameAnalyzer::default())
    }

    pub fn with_analyzer(analyzer: NameAnalyzer) -> Self {
        RecordStore {
            records: HashMap::new(),
            by_country: BucketMap::new(),
            by_birth_month: BucketMap::new(),
            by_name: PrefixIndex::new(),
            analyzer,
        }
    }

    /// Index `record` everywhere.
    ///
    /// An id that is already present overwrites the canonical entry only:
    /// the earlier record's country, birth-month and name entries stay behind
    /// and keep answering queries. Use [`RecordStore::upsert`] to replace a
    /// record cleanly.
    pub fn insert(&mut self, record: Record) -> Arc<Record> {
        let record = Arc::new(record);

        if let Some(previous) = self.records.insert(record.id.clone(), record.clone()) {
            warn!(
                id = %record.id,
                previous_name = %previous.name,
                "Duplicate id inserted, secondary entries of the previous record are kept"
            );
        }

        self.by_country.insert(record.country.clone(), record.clone());
        self.by_birth_month.insert(record.birth_month(), record.clone());

        for key in self.analyzer.index_keys(&record.name) {
            self.by_name.insert(&key, record.clone());
        }

        debug!(id = %record.id, country = %record.country, "Record indexed");
        record
    }

    /// Replace whatever is stored under the record's id
    pub fn upsert(&mut self, record: Record) -> Arc<Record> {
        self.delete(record.id.as_str());
        self.insert(record)
    }

    pub fn get_by_id(&self, id: &str) -> Option<Arc<Record>> {
        self.records.get(id).cloned()
    }

    pub fn get_by_country(&self, country: &str) -> Vec<Arc<Record>> {
        self.by_country.get(country)
    }

    pub fn get_by_birth_month(&self, month: BirthMonth) -> Vec<Arc<Record>> {
        self.by_birth_month.get(&month)
    }

    /// Remove the record from the canonical map and from every secondary
    /// structure. Unknown ids are a no-op.
    pub fn delete(&mut self, id: &str) -> Option<Arc<Record>> {
        let record = self.records.remove(id)?;

        self.by_country.remove(record.country.as_str(), &record.id);
        self.by_birth_month.remove(&record.birth_month(), &record.id);

        for key in self.analyzer.index_keys(&record.name) {
            self.by_name.remove(&key, &record.id);
        }

        debug!(id = %record.id, "Record removed");
        Some(record)
    }

    pub fn name_index(&self) -> &PrefixIndex<Arc<Record>> {
        &self.by_name
    }

    pub fn analyzer(&self) -> &NameAnalyzer {
        &self.analyzer
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Record>> {
        self.records.values()
    }

    pub fn country_count(&self) -> usize {
        self.by_country.len()
    }

    pub fn birth_month_count(&self) -> usize {
        self.by_birth_month.len()
    }

    /// Check that every stored record is reachable through each secondary
    /// structure and that nothing in a secondary structure points at an id
    /// missing from the canonical map.
    pub fn verify_consistency(&self) -> Result<()> {
        for record in self.records.values() {
            let id = &record.id;

            if !self.by_country.contains(record.country.as_str(), id) {
                return Err(Error::invalid_state(format!(
                    "record {} missing from country bucket {}", id, record.country
                )));
            }

            if !self.by_birth_month.contains(&record.birth_month(), id) {
                return Err(Error::invalid_state(format!(
                    "record {} missing from birth month bucket {}", id, record.birth_month()
                )));
            }

            for key in self.analyzer.index_keys(&record.name) {
                if !self.by_name.terminal_set(&key).iter().any(|r| &r.id == id) {
                    return Err(Error::invalid_state(format!(
                        "record {} missing from name key '{}'", id, key
                    )));
                }
            }
        }

        for (country, bucket) in self.by_country.iter() {
            self.check_known(bucket, || format!("country bucket {}", country))?;
        }

        for (month, bucket) in self.by_birth_month.iter() {
            self.check_known(bucket, || format!("birth month bucket {}", month))?;
        }

        for key in self.by_name.keys_with_prefix("") {
            self.check_known(self.by_name.terminal_set(&key), || format!("name key '{}'", key))?;
        }

        Ok(())
    }

    fn check_known<F>(&self, handles: &[Arc<Record>], location: F) -> Result<()>
    where
        F: Fn() -> String,
    {
        match handles.iter().find(|r| !self.records.contains_key(&r.id)) {
            Some(orphan) => Err(Error::invalid_state(format!(
                "{} holds record {} absent from the canonical map", location(), orphan.id
            ))),
            None => Ok(()),
        }
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(id: &str, name: &str, country: &str, dob: (i32, u32, u32)) -> Record {
        let dob = NaiveDate::from_ymd_opt(dob.0, dob.1, dob.2).unwrap();
        Record::new(id, name, dob, country, format!("{}@example.com", id))
    }

    /// Ids stored under exactly `key`, without the subtree below it
    fn name_ids(store: &RecordStore, key: &str) -> Vec<String> {
        store.name_index()
            .terminal_set(key)
            .iter()
            .map(|r| r.id.to_string())
            .collect()
    }

    #[test]
    fn test_insert_fans_out_to_every_index() {
        let mut store = RecordStore::new();
        store.insert(record("1", "Ann Lee", "Norway", (2000, 5, 17)));

        assert!(store.get_by_id("1").is_some());
        assert_eq!(store.get_by_country("Norway").len(), 1);
        assert_eq!(store.get_by_birth_month(BirthMonth::new(2000, 5)).len(), 1);
        assert_eq!(name_ids(&store, "ann lee"), vec!["1"]);
        assert_eq!(name_ids(&store, "ann"), vec!["1"]);
        assert_eq!(name_ids(&store, "lee"), vec!["1"]);
        assert!(store.verify_consistency().is_ok());
    }

    #[test]
    fn test_token_key_subtree_holds_full_name_too() {
        let mut store = RecordStore::new();
        store.insert(record("1", "Ann Lee", "Norway", (2000, 5, 17)));

        // "ann lee" sits below "ann", so the subtree sees the record twice
        let subtree: Vec<String> = store.name_index()
            .search_exact("ann")
            .iter()
            .map(|r| r.id.to_string())
            .collect();
        assert_eq!(subtree, vec!["1", "1"]);
        assert_eq!(name_ids(&store, "ann"), vec!["1"]);
    }

    #[test]
    fn test_delete_removes_from_every_index() {
        let mut store = RecordStore::new();
        store.insert(record("1", "Ann Lee", "Norway", (2000, 5, 17)));
        store.insert(record("2", "Ann", "Norway", (1999, 5, 1)));

        let removed = store.delete("1").unwrap();
        assert_eq!(removed.name, "Ann Lee");

        assert!(store.get_by_id("1").is_none());
        assert_eq!(store.get_by_country("Norway").len(), 1);
        assert!(store.get_by_birth_month(BirthMonth::new(2000, 5)).is_empty());
        assert_eq!(name_ids(&store, "ann"), vec!["2"]);
        assert!(name_ids(&store, "lee").is_empty());
        assert!(store.verify_consistency().is_ok());
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut store = RecordStore::new();
        store.insert(record("1", "Ann Lee", "Norway", (2000, 5, 17)));
        store.insert(record("2", "Bo Berg", "Sweden", (1980, 2, 3)));

        assert!(store.delete("1").is_some());
        assert!(store.delete("1").is_none());

        assert_eq!(store.len(), 1);
        assert_eq!(store.country_count(), 1);
        assert_eq!(store.birth_month_count(), 1);
        assert_eq!(store.name_index().keys_with_prefix(""), vec!["berg", "bo", "bo berg"]);
    }

    #[test]
    fn test_duplicate_insert_keeps_stale_secondary_entries() {
        let mut store = RecordStore::new();
        store.insert(record("1", "Ann Lee", "Norway", (2000, 5, 17)));
        store.insert(record("1", "Ann Lee", "Peru", (2000, 5, 17)));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get_by_id("1").unwrap().country, "Peru");
        assert_eq!(store.get_by_country("Norway").len(), 1);
        assert_eq!(store.get_by_country("Peru").len(), 1);

        // Delete follows the current record, so the Norway entry is orphaned
        store.delete("1");
        assert_eq!(store.get_by_country("Norway").len(), 1);
        assert!(store.verify_consistency().is_err());
    }

    #[test]
    fn test_upsert_replaces_cleanly() {
        let mut store = RecordStore::new();
        store.insert(record("1", "Ann Lee", "Norway", (2000, 5, 17)));
        store.upsert(record("1", "Ann Berg", "Peru", (2001, 6, 1)));

        assert!(store.get_by_country("Norway").is_empty());
        assert!(name_ids(&store, "lee").is_empty());
        assert_eq!(name_ids(&store, "berg"), vec!["1"]);
        assert!(store.verify_consistency().is_ok());
    }

    #[test]
    fn test_verify_reports_orphans() {
        let mut store = RecordStore::new();
        store.insert(record("1", "Ann Lee", "Norway", (2000, 5, 17)));
        store.records.remove("1");

        let err = store.verify_consistency().unwrap_err();
        assert_eq!(err.kind, crate::core::error::ErrorKind::InvalidState);
    }
}
