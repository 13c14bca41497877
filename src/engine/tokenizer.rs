use regex::Regex;
use std::sync::OnceLock;

/// A lowercased word and its byte span in the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub term: String,
    pub start: usize,
    pub end: usize,
}

fn word_pattern() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| Regex::new(r"[\p{L}\p{N}]+").expect("word pattern is valid"))
}

/// Splits `text` into lowercased alphanumeric words, keeping their offsets so
/// matches can be highlighted in the original text.
pub fn tokenize(text: &str) -> Vec<Token> {
    word_pattern()
        .find_iter(text)
        .map(|m| Token {
            term: m.as_str().to_lowercase(),
            start: m.start(),
            end: m.end(),
        })
        .collect()
}

/// Terms only, in order, duplicates kept.
pub fn tokenize_terms(text: &str) -> Vec<String> {
    tokenize(text).into_iter().map(|t| t.term).collect()
}
