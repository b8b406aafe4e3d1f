const ELLIPSIS: char = '\u{2026}';

/// Cut `text` to at most `max_len` characters, marking the cut with an
/// ellipsis. A truncated string is exactly `max_len` characters long, so
/// truncating it again returns it unchanged.
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    if max_len == 0 {
        return String::new();
    }

    let mut truncated: String = text.chars().take(max_len - 1).collect();
    truncated.push(ELLIPSIS);
    truncated
}
