use std::sync::Arc;
use chrono::Datelike;
use crate::core::clock::{Clock, SystemClock};
use crate::core::types::{BirthMonth, Record};
use crate::index::record_store::RecordStore;
use crate::search::results::{MatchTier, TieredCollector};

/// Stateless read-side queries over a [`RecordStore`]
pub struct QueryExecutor {
    pub min_prefix_query_len: usize,
    clock: Arc<dyn Clock>,
}

impl QueryExecutor {
    pub fn new(min_prefix_query_len: usize, clock: Arc<dyn Clock>) -> Self {
        QueryExecutor {
            min_prefix_query_len,
            clock,
        }
    }

    /// Name search, unique by id, in first-discovery order across the tiers
    pub fn search_by_name(&self, store: &RecordStore, query: &str) -> Vec<Arc<Record>> {
        self.collect_by_name(store, query).into_records()
    }

    /// Runs the three tiers in order:
    /// 1. the whole lowercased query as one key,
    /// 2. each whitespace token of the query,
    /// 3. every stored key starting with the query, if the query is long
    ///    enough, skipping keys already looked up as tokens.
    ///
    /// Tiers 1 and 2 take the key's whole subtree; tier 3 reads only the
    /// records stored at each listed key. Every such key lies under the
    /// tier 1 node, so tier 3 finds nothing tier 1 has not already seen and
    /// `MatchTier::Prefix` only shows up if tier 1 is narrowed.
    pub fn collect_by_name(&self, store: &RecordStore, query: &str) -> TieredCollector {
        let mut collector = TieredCollector::new();
        let terms = store.analyzer().query_terms(query);
        if terms.full.is_empty() {
            return collector;
        }

        let index = store.name_index();

        collector.collect(index.search_exact(&terms.full), MatchTier::FullName);

        for token in &terms.tokens {
            collector.collect(index.search_exact(token), MatchTier::Token);
        }

        if terms.full.chars().count() >= self.min_prefix_query_len {
            for key in index.keys_with_prefix(&terms.full) {
                if terms.tokens.contains(&key) {
                    continue;
                }
                collector.collect(index.terminal_set(&key).iter().cloned(), MatchTier::Prefix);
            }
        }

        collector
    }

    /// Bucket an age query lands in: the year `age` years before today and
    /// today's month (1-based). Only records born in that exact month match.
    pub fn birth_month_for_age(&self, age: i32) -> Option<BirthMonth> {
        let today = self.clock.today();
        let year = today.year().checked_sub(age)?;
        Some(BirthMonth::new(year, today.month()))
    }

    pub fn search_by_age(&self, store: &RecordStore, age: i32) -> Vec<Arc<Record>> {
        match self.birth_month_for_age(age) {
            Some(month) => store.get_by_birth_month(month),
            None => Vec::new(),
        }
    }
}

impl Default for QueryExecutor {
    fn default() -> Self {
        QueryExecutor::new(3, Arc::new(SystemClock))
    }
}
