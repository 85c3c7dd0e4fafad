use crate::analysis::tokenizer::{Tokenizer, WhitespaceTokenizer};

/// Turns names into the keys they are indexed under, and queries into the
/// keys the tiered search looks up.
pub struct NameAnalyzer {
    pub tokenizer: Box<dyn Tokenizer>,
}

/// Lowercased view of a name-search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTerms {
    pub full: String,
    pub tokens: Vec<String>,
}

impl NameAnalyzer {
    pub fn new(tokenizer: Box<dyn Tokenizer>) -> Self {
        NameAnalyzer { tokenizer }
    }

    /// Full lowercased name first, then each distinct token not equal to it.
    /// A single-token name yields one key.
    pub fn index_keys(&self, name: &str) -> Vec<String> {
        let full = name.trim().to_lowercase();
        let mut keys = Vec::new();
        if !full.is_empty() {
            keys.push(full);
        }

        for token in self.tokenizer.tokenize(name) {
            if !keys.contains(&token.text) {
                keys.push(token.text);
            }
        }

        keys
    }

    pub fn query_terms(&self, query: &str) -> QueryTerms {
        QueryTerms {
            full: query.trim().to_lowercase(),
            tokens: self.tokenizer
                .tokenize(query)
                .into_iter()
                .map(|t| t.text)
                .collect(),
        }
    }
}

impl Default for NameAnalyzer {
    fn default() -> Self {
        NameAnalyzer::new(Box::new(WhitespaceTokenizer::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_keys_full_name_then_tokens() {
        let analyzer = NameAnalyzer::default();

        assert_eq!(analyzer.index_keys("Ann Lee"), vec!["ann lee", "ann", "lee"]);
        assert_eq!(analyzer.index_keys("Ann"), vec!["ann"]);
        assert_eq!(analyzer.index_keys("Ann Ann"), vec!["ann ann", "ann"]);
        assert!(analyzer.index_keys("  ").is_empty());
    }

    #[test]
    fn test_query_terms() {
        let terms = NameAnalyzer::default().query_terms(" Ann LEE ");

        assert_eq!(terms.full, "ann lee");
        assert_eq!(terms.tokens, vec!["ann", "lee"]);
    }
}
