//! Column limits for page fields

/// Maximum length, in characters, of title, lead and main image URL
pub const MAX_FIELD_CHARS: usize = 255;

/// Marker appended to truncated fields
pub const ELLIPSIS: &str = "...";

/// Truncates `value` to [`MAX_FIELD_CHARS`] characters
///
/// Values that fit are returned unchanged. Longer values keep their first
/// 252 characters followed by [`ELLIPSIS`], for exactly 255 characters.
/// Lengths are counted in characters, so multi-byte text is never split.
pub fn truncate_field(value: &str) -> String {
    if value.chars().count() <= MAX_FIELD_CHARS {
        return value.to_string();
    }

    let keep = MAX_FIELD_CHARS - ELLIPSIS.chars().count();
    let mut truncated: String = value.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Drops a URL that does not fit the column
///
/// A cut-off URL would point somewhere else, so oversized URLs become
/// `None` instead of being truncated.
pub fn clear_oversized_url(url: Option<&str>) -> Option<String> {
    url.filter(|url| url.chars().count() <= MAX_FIELD_CHARS)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_values_unchanged() {
        assert_eq!(truncate_field(""), "");
        assert_eq!(truncate_field("Short title"), "Short title");

        let exact = "x".repeat(MAX_FIELD_CHARS);
        assert_eq!(truncate_field(&exact), exact);
    }

    #[test]
    fn test_long_value_truncated_with_marker() {
        let title = "a".repeat(260);
        let truncated = truncate_field(&title);

        assert_eq!(truncated.chars().count(), 255);
        assert!(truncated.ends_with(ELLIPSIS));
        assert_eq!(truncated, format!("{}...", "a".repeat(252)));
    }

    #[test]
    fn test_truncation_counts_characters() {
        let lead = "ő".repeat(300);
        let truncated = truncate_field(&lead);

        assert_eq!(truncated.chars().count(), 255);
        assert!(truncated.starts_with(&"ő".repeat(252)));
    }

    #[test]
    fn test_url_within_limit_kept() {
        let url = format!("https://example.com/{}", "p".repeat(200));
        assert_eq!(clear_oversized_url(Some(&url)), Some(url.clone()));
    }

    #[test]
    fn test_url_over_limit_dropped() {
        let url = format!("https://example.com/{}", "p".repeat(300));
        assert_eq!(clear_oversized_url(Some(&url)), None);
        assert_eq!(clear_oversized_url(None), None);
    }

    #[test]
    fn test_url_limit_boundary() {
        let at_limit = format!("https://example.com/{}", "p".repeat(MAX_FIELD_CHARS - 20));
        assert_eq!(at_limit.chars().count(), 255);
        assert_eq!(clear_oversized_url(Some(&at_limit)), Some(at_limit.clone()));

        let one_over = format!("{}p", at_limit);
        assert_eq!(one_over.chars().count(), 256);
        assert_eq!(clear_oversized_url(Some(&one_over)), None);
    }
}
