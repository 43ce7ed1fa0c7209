use once_cell::sync::Lazy;
use regex::Regex;

/// Runs of letters and apostrophes, four characters or longer.
static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z']{4,}").unwrap());

/// Common function words and leftover URL scheme tokens.
pub const STOP_WORDS: &[&str] = &[
    "the", "and", "that", "have", "for", "with", "this", "http", "https", "from",
    "they", "you", "your", "about", "just", "like", "when", "what", "there", "their",
    "would", "could", "should", "them", "these", "those", "into", "some", "only",
    "being", "been", "were", "was", "such", "also",
];

/// Whether `word` is in [`STOP_WORDS`].
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Split free text into lowercase words in the order they occur.
///
/// Duplicates are kept so callers can count them. Stop words and anything
/// shorter than four characters never appear in the output.
pub fn normalize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|w| !is_stop_word(w))
        .map(str::to_string)
        .collect()
}
