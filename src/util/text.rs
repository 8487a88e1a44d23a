// src/util/text.rs

/// Cut `text` to at most `limit` characters, marking the cut with `...`.
///
/// Counts characters, not bytes, so multi-byte text is never split inside a
/// code point.
///
/// # Examples
///
/// ```
/// use karten::util::text::truncate_chars;
///
/// assert_eq!(truncate_chars("Straße", 10), "Straße");
/// assert_eq!(truncate_chars("Straßenbahn", 6), "Straße...");
/// ```
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Normalize a user-supplied word: trim surrounding whitespace.
///
/// Returns `None` for blank input.
pub fn clean_word(word: &str) -> Option<String> {
    let trimmed = word.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
