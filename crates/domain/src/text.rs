//! Free-text sanitization helpers.
//!
//! Every free-text field crosses a trust boundary twice: once when a client
//! submits it and once when the model echoes content back. Both directions
//! go through [`sanitize_text`].

/// Strips ASCII control characters (0x00-0x1F and 0x7F) and trims
/// leading/trailing whitespace.
///
/// Pure and total; idempotent by construction.
///
/// # Examples
///
/// ```
/// use questweaver_domain::sanitize_text;
///
/// assert_eq!(sanitize_text("  hello\u{0000} world\n"), "hello world");
/// assert_eq!(sanitize_text("clean"), "clean");
/// ```
pub fn sanitize_text(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_ascii_control())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Returns true when `value` is a string whose trimmed length is at least
/// `min` characters.
///
/// # Examples
///
/// ```
/// use questweaver_domain::is_nonempty_string;
///
/// assert!(is_nonempty_string("hello", 1));
/// assert!(!is_nonempty_string("   ", 1));
/// assert!(!is_nonempty_string("short", 10));
/// ```
pub fn is_nonempty_string(value: &str, min: usize) -> bool {
    value.trim().chars().count() >= min.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_control_characters() {
        assert_eq!(sanitize_text("a\u{0001}b\u{001F}c\u{007F}d"), "abcd");
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(sanitize_text("  padded  "), "padded");
    }

    #[test]
    fn passes_through_clean_text() {
        assert_eq!(sanitize_text("The Ember Core is weakening."), "The Ember Core is weakening.");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(sanitize_text(""), "");
        assert_eq!(sanitize_text("\u{0000}\u{0007}"), "");
    }

    #[test]
    fn sanitize_is_idempotent() {
        let inputs = ["  a\u{0000}b  ", "plain", "\ttabs\tinside\t", ""];
        for input in inputs {
            let once = sanitize_text(input);
            assert_eq!(sanitize_text(&once), once);
        }
    }

    #[test]
    fn nonempty_counts_trimmed_length() {
        assert!(is_nonempty_string("0123456789", 10));
        assert!(!is_nonempty_string(" 123456789 ", 10));
        assert!(is_nonempty_string("x", 1));
        assert!(!is_nonempty_string("", 1));
    }
}
