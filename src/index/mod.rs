pub mod buckets;
pub mod record_store;
