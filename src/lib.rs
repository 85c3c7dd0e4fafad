pub mod core;
pub mod analysis;
pub mod index;
pub mod search;
pub mod query;
pub mod ingest;

pub use crate::core::config::Config;
pub use crate::core::directory::Directory;
pub use crate::core::error::{Error, ErrorKind, Result};
pub use crate::core::types::{BirthMonth, Record, RecordId};

/*
┌──────────────────────────────────────────────────────────────────────────┐
│                        PERSONDEX STRUCT ARCHITECTURE                     │
└──────────────────────────────────────────────────────────────────────────┘

  struct Directory                                  (core/directory.rs)
  ┌──────────────────────────────────────────────────────────────────────┐
  │ config: Config                  // prefix tier length, cache size    │
  │ store: RwLock<RecordStore>      // single writer, shared readers     │
  │ executor: QueryExecutor         // name tiers + age buckets          │
  │ name_cache: NameCache           // LRU, cleared on every mutation    │
  └──────────────────────────────────────────────────────────────────────┘
                 │
                 ▼
  struct RecordStore                                (index/record_store.rs)
  ┌──────────────────────────────────────────────────────────────────────┐
  │ records: HashMap<RecordId, Arc<Record>>            // owner          │
  │ by_country: BucketMap<String, Arc<Record>>         // handle         │
  │ by_birth_month: BucketMap<BirthMonth, Arc<Record>> // handle         │
  │ by_name: PrefixIndex<Arc<Record>>                  // handle         │
  │ analyzer: NameAnalyzer     // "Ann Lee" → ["ann lee", "ann", "lee"]  │
  └──────────────────────────────────────────────────────────────────────┘

  insert(record)                         delete(id)
    records[id] = record                   record = records.remove(id)
    by_country[country] += record          by_country[country] -= id
    by_birth_month[yyyy-mm] += record      by_birth_month[yyyy-mm] -= id
    by_name[key] += record (each key)      by_name[key] -= id (each key)

  search_by_name(query)
    1. by_name.search_exact("ann lee")                 full string
    2. by_name.search_exact("ann"), ("lee")            tokens
    3. by_name.keys_with_prefix("ann lee") → subtrees  len >= 3 only
    first tier to reach a record fixes its position, later ones skip it

  search_by_age(age)
    by_birth_month[(today.year - age)-(today.month)]
*/
