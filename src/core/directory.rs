use std::sync::Arc;
use parking_lot::RwLock;
use tracing::{info, warn};
use crate::core::clock::{Clock, SystemClock};
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::stats::DirectoryStats;
use crate::core::types::Record;
use crate::index::record_store::RecordStore;
use crate::ingest::LoadReport;
use crate::ingest::row::RecordRow;
use crate::query::cache::NameCache;
use crate::search::executor::QueryExecutor;

/// Entry point for callers: one writer at a time, any number of readers.
///
/// The name cache is only read or written while the store lock is held, so a
/// writer's `clear` can never race with a reader filling in stale results.
pub struct Directory {
    config: Config,
    store: RwLock<RecordStore>,
    executor: QueryExecutor,
    name_cache: NameCache,
}

impl Directory {
    pub fn new(config: Config) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: Config, clock: Arc<dyn Clock>) -> Self {
        Directory {
            store: RwLock::new(RecordStore::new()),
            executor: QueryExecutor::new(config.min_prefix_query_len, clock),
            name_cache: NameCache::new(config.name_cache_size),
            config,
        }
    }

    pub fn insert_user(&self, record: Record) -> Arc<Record> {
        let mut store = self.store.write();
        let record = store.insert(record);
        self.after_mutation(&store);
        record
    }

    pub fn upsert_user(&self, record: Record) -> Arc<Record> {
        let mut store = self.store.write();
        let record = store.upsert(record);
        self.after_mutation(&store);
        record
    }

    /// Remove a user from every index; unknown ids are ignored
    pub fn delete_user(&self, id: &str) -> Option<Arc<Record>> {
        let mut store = self.store.write();
        let removed = store.delete(id);
        if removed.is_some() {
            self.after_mutation(&store);
        }
        removed
    }

    pub fn get_user_by_id(&self, id: &str) -> Option<Arc<Record>> {
        self.store.read().get_by_id(id)
    }

    pub fn get_users_by_country(&self, country: &str) -> Vec<Arc<Record>> {
        self.store.read().get_by_country(country)
    }

    pub fn get_users_by_name(&self, name: &str) -> Vec<Arc<Record>> {
        let store = self.store.read();
        let key = NameCache::key_for(name);

        if let Some(cached) = self.name_cache.get(&key) {
            return cached;
        }

        let results = self.executor.search_by_name(&store, name);
        self.name_cache.put(key, results.clone());
        results
    }

    /// Users born in the current month, `age` years ago
    pub fn get_users_by_age(&self, age: i32) -> Vec<Arc<Record>> {
        self.executor.search_by_age(&self.store.read(), age)
    }

    /// Insert every row that coerces cleanly; bad rows are logged and
    /// skipped.
    pub fn load_rows<I>(&self, rows: I) -> LoadReport
    where
        I: IntoIterator<Item = RecordRow>,
    {
        let mut report = LoadReport::default();
        let mut store = self.store.write();

        for row in rows {
            let row_id = row.id.clone();
            match Record::try_from(row) {
                Ok(record) => {
                    store.insert(record);
                    report.inserted += 1;
                }
                Err(e) => {
                    warn!(row = %row_id, error = %e, "Skipping row");
                    report.skipped += 1;
                }
            }
        }

        self.after_mutation(&store);
        info!(inserted = report.inserted, skipped = report.skipped, "Rows loaded");
        report
    }

    /// Load a JSON array of rows
    pub fn load_json(&self, json: &str) -> Result<LoadReport> {
        let rows: Vec<RecordRow> = serde_json::from_str(json)?;
        Ok(self.load_rows(rows))
    }

    pub fn verify_consistency(&self) -> Result<()> {
        self.store.read().verify_consistency()
    }

    pub fn stats(&self) -> DirectoryStats {
        let store = self.store.read();
        DirectoryStats {
            record_count: store.len(),
            country_buckets: store.country_count(),
            birth_month_buckets: store.birth_month_count(),
            name_keys: store.name_index().len(),
            name_root_fanout: store.name_index().top_level_keys().len(),
            name_cache: self.name_cache.stats(),
        }
    }

    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.read().is_empty()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn after_mutation(&self, store: &RecordStore) {
        self.name_cache.clear();

        if cfg!(debug_assertions) && self.config.check_invariants {
            if let Err(e) = store.verify_consistency() {
                panic!("record store invariant violated: {}", e);
            }
        }
    }
}

impl Default for Directory {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
