use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use crate::core::types::{Identified, RecordId};

/// Multi-valued map from a derived key (country, birth month) to record
/// handles. Buckets are kept in insertion order and dropped once empty.
pub struct BucketMap<K, T> {
    buckets: HashMap<K, Vec<T>>,
}

impl<K: Hash + Eq, T: Identified + Clone> BucketMap<K, T> {
    pub fn new() -> Self {
        BucketMap {
            buckets: HashMap::new(),
        }
    }

    pub fn insert(&mut self, key: K, record: T) {
        self.buckets.entry(key)
            .or_insert_with(Vec::new)
            .push(record);
    }

    /// Owned copy of the bucket's handles; unknown keys give an empty vector
    pub fn get<Q>(&self, key: &Q) -> Vec<T>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.buckets.get(key).cloned().unwrap_or_default()
    }

    pub fn contains<Q>(&self, key: &Q, id: &RecordId) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.buckets
            .get(key)
            .is_some_and(|bucket| bucket.iter().any(|r| r.record_id() == id))
    }

    /// Filter the record with `id` out of the bucket. Returns whether
    /// anything was removed.
    pub fn remove<Q>(&mut self, key: &Q, id: &RecordId) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(bucket) = self.buckets.get_mut(key) else {
            return false;
        };

        let before = bucket.len();
        bucket.retain(|r| r.record_id() != id);
        let removed = bucket.len() != before;

        if bucket.is_empty() {
            self.buckets.remove(key);
        }
        removed
    }

    /// Number of non-empty buckets
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &[T])> {
        self.buckets.iter().map(|(k, v)| (k, v.as_slice()))
    }
}

impl<K: Hash + Eq, T: Identified + Clone> Default for BucketMap<K, T> {
    fn default() -> Self {
        Self::new()
    }
}
