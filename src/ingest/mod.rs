pub mod row;

use serde::Serialize;

/// Outcome of a bulk load
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub inserted: usize,
    pub skipped: usize,
}
