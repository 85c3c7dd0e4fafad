use std::collections::BTreeMap;
use crate::core::types::{Identified, RecordId};

/// Character trie mapping lowercase keys to the records inserted under them.
///
/// Each node owns its children and holds a terminal set of record handles for
/// the key ending exactly there. Lookups collect the whole subtree below the
/// key, which makes every exact lookup a prefix lookup as well.
///
/// The empty key is never stored: `insert("")` is a no-op and
/// `search_exact("")` returns nothing.
pub struct PrefixIndex<T> {
    root: TrieNode<T>,

    /// Number of nodes with a non-empty terminal set
    key_count: usize,
}

struct TrieNode<T> {
    children: BTreeMap<char, TrieNode<T>>,
    records: Vec<T>,
}

impl<T> TrieNode<T> {
    fn new() -> Self {
        TrieNode {
            children: BTreeMap::new(),
            records: Vec::new(),
        }
    }

    fn is_vacant(&self) -> bool {
        self.records.is_empty() && self.children.is_empty()
    }
}

impl<T: Identified + Clone> PrefixIndex<T> {
    pub fn new() -> Self {
        PrefixIndex {
            root: TrieNode::new(),
            key_count: 0,
        }
    }

    /// Associate `record` with `key`. Inserting the same pair twice stores it
    /// twice.
    pub fn insert(&mut self, key: &str, record: T) {
        if key.is_empty() {
            return;
        }

        let mut node = &mut self.root;
        for c in key.chars() {
            node = node.children.entry(c).or_insert_with(TrieNode::new);
        }

        if node.records.is_empty() {
            self.key_count += 1;
        }
        node.records.push(record);
    }

    /// All records whose key starts with `key`: the terminal set of the node
    /// reached by `key` followed by every descendant's, children in
    /// character order.
    pub fn search_exact(&self, key: &str) -> Vec<T> {
        if key.is_empty() {
            return Vec::new();
        }

        match self.find(key) {
            Some(node) => Self::collect_subtree(node),
            None => Vec::new(),
        }
    }

    /// Records stored exactly under `key`, without descendants
    pub fn terminal_set(&self, key: &str) -> &[T] {
        if key.is_empty() {
            return &[];
        }

        self.find(key).map(|node| node.records.as_slice()).unwrap_or(&[])
    }

    /// Drop the association between `key` and the record with `id`. Other
    /// records under the same key are untouched. Returns whether anything
    /// was removed; a missing path is a no-op.
    pub fn remove(&mut self, key: &str, id: &RecordId) -> bool {
        if key.is_empty() {
            return false;
        }

        let mut chars = key.chars();
        match Self::remove_from(&mut self.root, &mut chars, id) {
            Some(emptied) => {
                if emptied {
                    self.key_count -= 1;
                }
                true
            }
            None => false,
        }
    }

    /// Single-character edges leaving the root
    pub fn top_level_keys(&self) -> Vec<String> {
        self.root.children.keys().map(|c| c.to_string()).collect()
    }

    /// Every stored key having `prefix` as prefix, in lexical order. The empty
    /// prefix lists all keys.
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        let Some(start) = self.find(prefix) else {
            return Vec::new();
        };

        let mut keys = Vec::new();
        let mut stack = vec![(prefix.to_string(), start)];

        while let Some((key, node)) = stack.pop() {
            if !node.records.is_empty() {
                keys.push(key.clone());
            }

            // Reverse so the smallest child is popped first
            for (c, child) in node.children.iter().rev() {
                let mut child_key = key.clone();
                child_key.push(*c);
                stack.push((child_key, child));
            }
        }

        keys
    }

    /// Number of distinct keys currently holding records
    pub fn len(&self) -> usize {
        self.key_count
    }

    pub fn is_empty(&self) -> bool {
        self.key_count == 0
    }

    fn find(&self, key: &str) -> Option<&TrieNode<T>> {
        let mut node = &self.root;
        for c in key.chars() {
            node = node.children.get(&c)?;
        }
        Some(node)
    }

    fn collect_subtree(start: &TrieNode<T>) -> Vec<T> {
        let mut results = Vec::new();
        let mut stack = vec![start];

        while let Some(node) = stack.pop() {
            results.extend(node.records.iter().cloned());
            stack.extend(node.children.values().rev());
        }

        results
    }

    /// `None` when nothing matched, otherwise whether the terminal set went
    /// from non-empty to empty. Vacant nodes are pruned on the way back up.
    fn remove_from(
        node: &mut TrieNode<T>,
        chars: &mut std::str::Chars<'_>,
        id: &RecordId,
    ) -> Option<bool> {
        match chars.next() {
            None => {
                let before = node.records.len();
                node.records.retain(|r| r.record_id() != id);

                if node.records.len() == before {
                    None
                } else {
                    Some(node.records.is_empty())
                }
            }
            Some(c) => {
                let child = node.children.get_mut(&c)?;
                let outcome = Self::remove_from(child, chars, id);

                if child.is_vacant() {
                    node.children.remove(&c);
                }
                outcome
            }
        }
    }
}

impl<T: Identified + Clone> Default for PrefixIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use chrono::NaiveDate;
    use crate::core::types::Record;

    fn record(id: &str, name: &str) -> Arc<Record> {
        let dob = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
        Arc::new(Record::new(id, name, dob, "Norway", "x@example.com"))
    }

    fn ids(records: &[Arc<Record>]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_search_collects_subtree() {
        let mut index = PrefixIndex::new();
        let r = record("1", "Ana");
        index.insert("ana", r.clone());

        assert_eq!(ids(&index.search_exact("an")), vec!["1"]);
        assert_eq!(ids(&index.search_exact("ana")), vec!["1"]);
        assert!(index.search_exact("anab").is_empty());
        assert!(index.search_exact("b").is_empty());
    }

    #[test]
    fn test_subtree_order_is_node_then_children_by_char() {
        let mut index = PrefixIndex::new();
        index.insert("annz", record("3", "Annz"));
        index.insert("anna", record("2", "Anna"));
        index.insert("ann", record("1", "Ann"));

        assert_eq!(ids(&index.search_exact("ann")), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_empty_key_is_ignored() {
        let mut index = PrefixIndex::new();
        index.insert("", record("1", "Nobody"));

        assert!(index.is_empty());
        assert!(index.top_level_keys().is_empty());
        assert!(index.search_exact("").is_empty());
        assert!(!index.remove("", &RecordId::from("1")));
    }

    #[test]
    fn test_remove_only_the_identified_record() {
        let mut index = PrefixIndex::new();
        index.insert("ann", record("1", "Ann"));
        index.insert("ann", record("2", "Ann"));

        assert!(index.remove("ann", &RecordId::from("1")));
        assert_eq!(ids(&index.search_exact("ann")), vec!["2"]);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_remove_missing_path_is_noop() {
        let mut index = PrefixIndex::new();
        index.insert("ann", record("1", "Ann"));

        assert!(!index.remove("bob", &RecordId::from("1")));
        assert!(!index.remove("an", &RecordId::from("1")));
        assert!(!index.remove("ann", &RecordId::from("9")));
        assert_eq!(ids(&index.search_exact("ann")), vec!["1"]);
    }

    #[test]
    fn test_remove_prunes_vacant_branches() {
        let mut index = PrefixIndex::new();
        index.insert("ann", record("1", "Ann"));
        index.insert("an", record("2", "An"));
        index.insert("bo", record("3", "Bo"));

        index.remove("ann", &RecordId::from("1"));
        assert_eq!(index.keys_with_prefix("a"), vec!["an"]);

        index.remove("bo", &RecordId::from("3"));
        assert_eq!(index.top_level_keys(), vec!["a"]);

        index.remove("an", &RecordId::from("2"));
        assert!(index.top_level_keys().is_empty());
        assert!(index.is_empty());
    }

    #[test]
    fn test_keys_with_prefix_lexical() {
        let mut index = PrefixIndex::new();
        for (id, key) in [("1", "lee"), ("2", "leelani"), ("3", "ann lee"), ("4", "leo")] {
            index.insert(key, record(id, key));
        }

        assert_eq!(index.keys_with_prefix("lee"), vec!["lee", "leelani"]);
        assert_eq!(index.keys_with_prefix("le"), vec!["lee", "leelani", "leo"]);
        assert_eq!(index.keys_with_prefix(""), vec!["ann lee", "lee", "leelani", "leo"]);
        assert!(index.keys_with_prefix("x").is_empty());
        assert_eq!(index.top_level_keys(), vec!["a", "l"]);
    }

    #[test]
    fn test_terminal_set_excludes_descendants() {
        let mut index = PrefixIndex::new();
        index.insert("lee", record("1", "Lee"));
        index.insert("leelani", record("2", "Leelani"));

        assert_eq!(ids(index.terminal_set("lee")), vec!["1"]);
        assert!(index.terminal_set("le").is_empty());
    }
}
