//! Message parser - Normalises raw text into a keyword command

/// A normalised command: trimmed, uppercased and split on whitespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub text: String,
    pub tokens: Vec<String>,
}

impl ParsedCommand {
    /// Token at `index`, if present
    pub fn token(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    /// Tokens from `index` on, joined by single spaces
    pub fn rest(&self, index: usize) -> String {
        self.tokens.get(index..).map(|t| t.join(" ")).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Parses incoming keyword messages
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageParser;

impl MessageParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a text message
    pub fn parse(&self, text: &str) -> ParsedCommand {
        let text = text.trim().to_uppercase();
        let tokens = text.split_whitespace().map(str::to_string).collect();
        ParsedCommand { text, tokens }
    }
}
