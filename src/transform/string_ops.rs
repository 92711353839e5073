use std::borrow::Cow;

use itertools::Itertools;

/// Returns a lowercase representation, reusing the original string if already lowercase.
pub fn lowercase(input: &str) -> Cow<'_, str> {
    if input.chars().all(|ch| !ch.is_uppercase()) {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(input.to_lowercase())
    }
}

/// Collapses whitespace runs to single spaces, borrowing when already collapsed.
pub fn collapse_whitespace(input: &str) -> Cow<'_, str> {
    let trimmed = input.trim();
    let collapsed = !trimmed.contains("  ")
        && !trimmed.contains(|ch: char| ch.is_whitespace() && ch != ' ');
    if collapsed {
        Cow::Borrowed(trimmed)
    } else {
        Cow::Owned(trimmed.split_whitespace().join(" "))
    }
}

/// Matching key for a column name: whitespace collapsed, trimmed, lowercased.
pub fn normalize_name(input: &str) -> String {
    lowercase(collapse_whitespace(input).as_ref()).into_owned()
}

/// Keeps at most `max_chars` characters, counting chars rather than bytes.
pub fn truncate_chars(value: &str, max_chars: usize) -> Cow<'_, str> {
    match value.char_indices().nth(max_chars) {
        Some((end_byte, _)) => Cow::Borrowed(&value[..end_byte]),
        None => Cow::Borrowed(value),
    }
}
