use serde::{Serialize, Deserialize};

/// One whitespace-delimited piece of a name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,      // Lowercased token text
    pub position: u32,     // Index among the name's tokens
    pub offset: usize,     // Byte offset in the lowercased name
}

impl Token {
    pub fn new(text: String, position: u32, offset: usize) -> Self {
        Token {
            text,
            position,
            offset,
        }
    }
}
