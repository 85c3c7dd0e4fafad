#[derive(Debug, Clone)]
pub struct Config {
    /// Queries shorter than this skip the prefix tier of name search
    pub min_prefix_query_len: usize,

    /// Entries kept in the name-search result cache, 0 disables it
    pub name_cache_size: usize,

    /// Run the full consistency check after every mutation (debug builds only)
    pub check_invariants: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            min_prefix_query_len: 3,
            name_cache_size: 256,
            check_invariants: false,
        }
    }
}
