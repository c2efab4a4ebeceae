use std::borrow::Cow;

/// Default cap on characters sent to an embedding endpoint.
pub const DEFAULT_MAX_TEXT_LENGTH: usize = 30_000;

/// Appended to text that was cut at the limit.
pub const TRUNCATION_MARKER: &str = "...";

/// Cut `text` to at most `max_chars` characters, appending [`TRUNCATION_MARKER`]
/// when anything was dropped. Counts chars, never splits a code point.
pub fn truncate_for_embedding(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        None => Cow::Borrowed(text),
        Some((byte_end, _)) => {
            tracing::warn!(
                chars = text.chars().count(),
                limit = max_chars,
                "text exceeds embedding limit, truncating"
            );
            let mut cut = String::with_capacity(byte_end + TRUNCATION_MARKER.len());
            cut.push_str(&text[..byte_end]);
            cut.push_str(TRUNCATION_MARKER);
            Cow::Owned(cut)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_untouched() {
        let out = truncate_for_embedding("rates rising", 100);
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out, "rates rising");
    }

    #[test]
    fn test_text_at_exact_limit_untouched() {
        assert_eq!(truncate_for_embedding("abcde", 5), "abcde");
    }

    #[test]
    fn test_long_text_truncated_with_marker() {
        assert_eq!(truncate_for_embedding("abcdefgh", 5), "abcde...");
    }

    #[test]
    fn test_multibyte_chars_counted_not_bytes() {
        let text = "通胀上升利率上升";
        assert_eq!(truncate_for_embedding(text, 4), "通胀上升...");
    }

    #[test]
    fn test_tails_beyond_limit_collapse() {
        let a = format!("{}{}", "x".repeat(10), "tail one");
        let b = format!("{}{}", "x".repeat(10), "another tail");
        assert_eq!(truncate_for_embedding(&a, 10), truncate_for_embedding(&b, 10));
    }
}
