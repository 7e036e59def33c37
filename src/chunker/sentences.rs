use std::sync::LazyLock;

use regex::Regex;

static BOUNDARY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]\s+").unwrap());

/// Split after `.`, `!` or `?` when followed by whitespace; the whitespace
/// run is dropped. Abbreviations and decimals are not special-cased.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for m in BOUNDARY_RE.find_iter(text) {
        // punctuation is one byte, keep it with the left side
        sentences.push(&text[start..m.start() + 1]);
        start = m.end();
    }
    sentences.push(&text[start..]);
    sentences.retain(|s| !s.trim().is_empty());
    sentences
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
