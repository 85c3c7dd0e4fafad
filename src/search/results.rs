use std::collections::HashSet;
use std::sync::Arc;
use crate::core::types::{Record, RecordId};

/// Which name-search tier first produced a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    FullName,
    Token,
    Prefix,
}

/// Ordered, id-unique accumulator for tiered search. The first tier to see a
/// record fixes its position; later sightings are ignored.
#[derive(Debug, Default)]
pub struct TieredCollector {
    seen: HashSet<RecordId>,
    hits: Vec<(Arc<Record>, MatchTier)>,
}

impl TieredCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collect<I>(&mut self, records: I, tier: MatchTier)
    where
        I: IntoIterator<Item = Arc<Record>>,
    {
        for record in records {
            if self.seen.insert(record.id.clone()) {
                self.hits.push((record, tier));
            }
        }
    }

    pub fn hits(&self) -> &[(Arc<Record>, MatchTier)] {
        &self.hits
    }

    pub fn into_records(self) -> Vec<Arc<Record>> {
        self.hits.into_iter().map(|(record, _)| record).collect()
    }
}
