//! Keyword extraction and whole-word matching over free-text queries.

use std::collections::HashSet;

/// Stop words dropped by [`extract_filtered`]: articles, pronouns, and the
/// query verbs users wrap around the actual topic ("what is", "tell me
/// about"). One consolidated list; the knowledge-base matcher is its only
/// consumer.
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "is", "it", "in", "on", "of", "for", "to", "and", "or", "be", "was", "are",
    "what", "when", "where", "who", "why", "how", "do", "does", "did", "i", "you", "he", "she",
    "me", "my", "your", "his", "her", "with", "about", "if", "get", "can", "use", "from", "by",
    "tell", "explain", "define",
];

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Lowercases `text`, splits it into maximal alphanumeric/underscore runs,
/// and keeps tokens longer than 2 characters. Duplicates collapse.
pub fn extract(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !is_word_char(c))
        .filter(|w| w.chars().count() > 2)
        .map(str::to_string)
        .collect()
}

/// Like [`extract`], additionally dropping [`STOP_WORDS`]. An empty result
/// means the query carries nothing actionable; callers short-circuit to
/// no-match without scanning.
pub fn extract_filtered(text: &str) -> HashSet<String> {
    let mut keywords = extract(text);
    keywords.retain(|w| !STOP_WORDS.contains(&w.as_str()));
    keywords
}

/// Whole-word containment: `word` occurs in `haystack` with no adjacent
/// word character on either side, so "arc" is found in "the arc spec" but
/// never inside "architecture". Both arguments must already be lowercased.
pub fn contains_word(haystack: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    let mut from = 0;
    while let Some(pos) = haystack[from..].find(word) {
        let begin = from + pos;
        let end = begin + word.len();
        let clear_before = haystack[..begin]
            .chars()
            .next_back()
            .map_or(true, |c| !is_word_char(c));
        let clear_after = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !is_word_char(c));
        if clear_before && clear_after {
            return true;
        }
        // An overlapping later occurrence would start inside this one and
        // therefore be preceded by a word character, so skipping past the
        // whole match is safe.
        from = end;
    }
    false
}
