use crate::catalog::tokenize;

/// A user query after truncation and tokenization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    text: String,
    tokens: Vec<String>,
    truncated: bool,
}

impl Query {
    /// Truncate to `max_chars` characters (0 = no limit) and tokenize.
    ///
    /// Repeated tokens are kept; each occurrence scores separately.
    pub fn parse(raw: &str, max_chars: usize) -> Self {
        let (text, truncated) = match raw.char_indices().nth(max_chars) {
            Some((byte_offset, _)) if max_chars > 0 => (&raw[..byte_offset], true),
            _ => (raw, false),
        };
        Self {
            tokens: tokenize(text),
            text: text.to_string(),
            truncated,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// No tokens survived normalization
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub const fn was_truncated(&self) -> bool {
        self.truncated
    }
}
