//! Whitespace cleanup applied to extracted text before it is persisted

/// Characters treated as line boundaries.
///
/// Covers `\n`, `\r` (and so `\r\n`) plus the vertical tab, form feed,
/// file/group/record separators, NEL and the Unicode line/paragraph
/// separators that extractors occasionally emit between blocks.
const LINE_BREAKS: &[char] = &[
    '\n', '\r', '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}',
    '\u{2029}',
];

/// Split into lines, trim each, drop the empty ones and rejoin with `\n`.
///
/// Line order is preserved and no trailing newline is added.
pub fn normalize_text(raw: &str) -> String {
    raw.split(LINE_BREAKS)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_strips_and_drops_blank_lines() {
        let raw = "  Title  \n\n\t\nFirst line\t\r\n   second line\n   \n";
        assert_eq!(normalize_text(raw), "Title\nFirst line\nsecond line");
    }

    #[test]
    fn test_preserves_inner_whitespace_and_order() {
        let raw = "b  b\na\tc\n";
        assert_eq!(normalize_text(raw), "b  b\na\tc");
    }

    #[test]
    fn test_form_feed_separates_pages() {
        let raw = "page one\u{0c}page two";
        assert_eq!(normalize_text(raw), "page one\npage two");
    }

    #[test]
    fn test_blank_input_gives_empty_output() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text(" \n\r\n\t "), "");
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(raw in "\\PC*") {
            let once = normalize_text(&raw);
            prop_assert_eq!(normalize_text(&once), once.clone());
        }

        #[test]
        fn prop_no_blank_or_padded_lines(raw in "[ a-z\\t\\r\\n]*") {
            let normalized = normalize_text(&raw);
            if !normalized.is_empty() {
                for line in normalized.split('\n') {
                    prop_assert!(!line.is_empty());
                    prop_assert_eq!(line, line.trim());
                }
            }
        }
    }
}
