use serde::Serialize;
use crate::query::cache::CacheStats;

/// Directory statistics for monitoring
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryStats {
    pub record_count: usize,
    pub country_buckets: usize,
    pub birth_month_buckets: usize,

    // Name index
    pub name_keys: usize,
    pub name_root_fanout: usize,

    pub name_cache: CacheStats,
}
