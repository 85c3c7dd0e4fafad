use crate::analysis::token::Token;

pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<Token>;
}

/// Lowercases and splits on Unicode whitespace. Punctuation stays inside
/// tokens, so "Mary-Jane" is a single token.
#[derive(Debug, Clone)]
pub struct WhitespaceTokenizer {
    pub lowercase: bool,
}

impl Default for WhitespaceTokenizer {
    fn default() -> Self {
        WhitespaceTokenizer { lowercase: true }
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let text_to_process = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        let mut tokens = Vec::new();
        let mut position = 0u32;
        let mut rest = text_to_process.as_str();
        let mut offset = 0;

        while let Some(start) = rest.find(|c: char| !c.is_whitespace()) {
            let word = &rest[start..];
            let end = word.find(char::is_whitespace).unwrap_or(word.len());

            tokens.push(Token::new(word[..end].to_string(), position, offset + start));
            position += 1;

            offset += start + end;
            rest = &word[end..];
        }

        tokens
    }
}
