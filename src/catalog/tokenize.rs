//! Text normalization shared by catalog items and queries.
//!
//! 1. NFKC-normalize and lower-case
//! 2. delete apostrophes, turn every other non-alphanumeric char into a space
//! 3. split on whitespace
//! 4. drop stop words
//!
//! Deduplication is left to callers: the index stores token sets, queries
//! keep repeated tokens because term frequency feeds the score.

use unicode_normalization::UnicodeNormalization;

/// Articles and prepositions dropped from every token stream.
pub const STOP_WORDS: [&str; 8] = ["a", "the", "of", "to", "is", "in", "for", "and"];

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

/// Lower-case, strip punctuation and collapse whitespace.
pub fn normalize(text: &str) -> String {
    let lowered = text.nfkc().collect::<String>().to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    for ch in lowered.chars() {
        if ch.is_alphanumeric() {
            out.push(ch);
        } else if matches!(ch, '\'' | '\u{2019}') {
            continue;
        } else {
            out.push(' ');
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Tokenize text in order, keeping duplicates.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split(' ')
        .filter(|token| !token.is_empty() && !is_stop_word(token))
        .map(str::to_string)
        .collect()
}
