use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

/// Display width of a string in terminal columns.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate `s` to at most `max_width` columns, appending "..." when cut.
///
/// Widths of 3 or less are filled with as many characters as fit, without
/// an ellipsis. Returns `Cow::Borrowed` when `s` already fits.
///
/// ```
/// use holofeed::util::truncate_to_width;
///
/// assert_eq!(truncate_to_width("Short", 10), "Short");
/// assert_eq!(truncate_to_width("Hello World", 8), "Hello...");
/// assert_eq!(truncate_to_width("Test", 2), "Te");
/// ```
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }

    let (budget, suffix) = if max_width <= ELLIPSIS_WIDTH {
        (max_width, "")
    } else {
        (max_width - ELLIPSIS_WIDTH, ELLIPSIS)
    };

    let mut used = 0;
    let mut end = 0;
    for (idx, c) in s.char_indices() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        end = idx + c.len_utf8();
    }

    Cow::Owned(format!("{}{}", &s[..end], suffix))
}

/// Remove terminal control characters from feed-supplied text.
///
/// Feed titles end up verbatim on the terminal, so ESC and other C0/DEL
/// bytes are dropped; tabs and newlines become spaces. ANSI sequence
/// payloads lose their ESC and are left as inert text.
pub fn sanitize_text(s: &str) -> Cow<'_, str> {
    let is_unsafe = |c: char| c.is_control();
    if !s.chars().any(is_unsafe) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.chars()
            .filter_map(|c| match c {
                '\t' | '\n' | '\r' => Some(' '),
                c if is_unsafe(c) => None,
                c => Some(c),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncation() {
        assert_eq!(truncate_to_width("Hello World", 8), "Hello...");
        assert_eq!(truncate_to_width("12345", 5), "12345");
        assert_eq!(truncate_to_width("Testing", 4), "T...");
    }

    #[test]
    fn test_narrow_widths() {
        assert_eq!(truncate_to_width("Test", 0), "");
        assert_eq!(truncate_to_width("Test", 1), "T");
        assert_eq!(truncate_to_width("Test", 3), "Tes");
    }

    #[test]
    fn test_wide_characters() {
        // Each CJK character is two columns
        assert_eq!(truncate_to_width("日本語です", 7), "日本...");
        assert_eq!(truncate_to_width("日本", 1), "");
        assert_eq!(display_width("日本"), 4);
    }

    #[test]
    fn test_fits_is_borrowed() {
        assert!(matches!(truncate_to_width("fits", 10), Cow::Borrowed(_)));
    }

    #[test]
    fn test_sanitize_clean_is_borrowed() {
        assert!(matches!(sanitize_text("Coral Reef 4K"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_sanitize_strips_escape_and_controls() {
        assert_eq!(sanitize_text("\x1b[31mRed\x1b[0m"), "[31mRed[0m");
        assert_eq!(sanitize_text("a\x00b\x07c\x7f"), "abc");
        assert_eq!(sanitize_text("two\nlines\tx"), "two lines x");
    }
}
