use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";

/// Number of terminal columns `s` occupies (CJK and emoji count as 2).
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate `s` to at most `max_width` terminal columns.
///
/// Appends "..." when text is cut and there is room for it; at widths of
/// 3 or less the text is cut without an ellipsis. Never splits a character.
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }

    let (budget, suffix) = if max_width > ELLIPSIS.len() {
        (max_width - ELLIPSIS.len(), ELLIPSIS)
    } else {
        (max_width, "")
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

fn is_stripped_control(c: char) -> bool {
    c == '\u{7f}' || (c.is_ascii_control() && !matches!(c, '\t' | '\n' | '\r'))
}

/// Remove terminal control characters and ANSI escape sequences.
///
/// Server-provided messages are drawn straight into the terminal, so CSI
/// (`ESC [ ... final`) and OSC (`ESC ] ... BEL|ESC \`) sequences are dropped
/// whole, and every other control character except tab, newline and CR is
/// removed. Clean input is returned borrowed.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    if !s.chars().any(is_stripped_control) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\u{1b}' {
            if !is_stripped_control(c) {
                out.push(c);
            }
            continue;
        }

        match chars.peek() {
            Some('[') => {
                chars.next();
                // Parameter and intermediate bytes run until a final byte in @..=~
                for c in chars.by_ref() {
                    if ('@'..='~').contains(&c) {
                        break;
                    }
                }
            }
            Some(']') => {
                chars.next();
                while let Some(c) = chars.next() {
                    if c == '\u{7}' {
                        break;
                    }
                    if c == '\u{1b}' && chars.peek() == Some(&'\\') {
                        chars.next();
                        break;
                    }
                }
            }
            _ => {}
        }
    }

    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_borrowed() {
        assert!(matches!(truncate_to_width("Short", 10), Cow::Borrowed("Short")));
    }

    #[test]
    fn test_ascii_truncation() {
        assert_eq!(truncate_to_width("Hello World", 8), "Hello...");
    }

    #[test]
    fn test_wide_chars_never_split() {
        // Each CJK char is 2 columns: budget of 4 fits two of them.
        assert_eq!(truncate_to_width("\u{4f60}\u{597d}\u{4e16}\u{754c}", 7), "\u{4f60}\u{597d}...");
    }

    #[test]
    fn test_narrow_width_has_no_ellipsis() {
        assert_eq!(truncate_to_width("Hello", 3), "Hel");
        assert_eq!(truncate_to_width("Hello", 0), "");
    }

    #[test]
    fn test_exact_fit() {
        assert_eq!(truncate_to_width("Hello", 5), "Hello");
    }

    #[test]
    fn test_strip_clean_text_borrowed() {
        assert!(matches!(strip_control_chars("Box 4 done"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_strip_keeps_whitespace() {
        assert_eq!(strip_control_chars("a\tb\nc\r"), "a\tb\nc\r");
    }

    #[test]
    fn test_strip_csi_sequence() {
        assert_eq!(strip_control_chars("\x1b[1;31mred\x1b[0m"), "red");
    }

    #[test]
    fn test_strip_osc_sequences() {
        assert_eq!(strip_control_chars("\x1b]0;title\x07ok"), "ok");
        assert_eq!(strip_control_chars("\x1b]0;title\x1b\\ok"), "ok");
    }

    #[test]
    fn test_strip_bare_controls() {
        assert_eq!(strip_control_chars("a\x00b\x7fc\x1bd"), "abcd");
    }

    #[test]
    fn test_strip_preserves_unicode() {
        assert_eq!(strip_control_chars("\u{4f60}\x07\u{597d}"), "\u{4f60}\u{597d}");
    }
}
