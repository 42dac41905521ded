//! UTF-8 safe string preview helpers.
//!
//! Provides small helpers to take the first N Unicode scalar values (chars)
//! from a string without slicing by byte index which can panic on multibyte
//! characters. Used when logging raw model replies and long tool output.

/// Return the first `n` characters of `s` as a `String` (no ellipsis).
pub fn prefix_chars(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

/// Return a preview of `s` up to `n` characters. If `s` is longer than `n`
/// characters, the returned string will include a trailing ellipsis `...`.
pub fn preview(s: &str, n: usize) -> String {
    let mut prefix = prefix_chars(s, n);
    if s.chars().count() > n {
        prefix.push_str("...");
    }
    prefix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_basic_ascii() {
        let s = "hello world";
        assert_eq!(preview(s, 5), "hello...");
        assert_eq!(preview(s, 20), "hello world");
    }

    #[test]
    fn preview_exact_length_no_ellipsis() {
        assert_eq!(preview("hello", 5), "hello");
    }

    #[test]
    fn preview_multibyte_characters() {
        // Multibyte UTF-8 must not panic on char boundaries
        let s = "héllo wörld ünïcode";
        let p = preview(s, 8);
        assert_eq!(p, format!("{}...", s.chars().take(8).collect::<String>()));
    }

    #[test]
    fn prefix_chars_empty() {
        assert_eq!(prefix_chars("", 10), "");
    }
}
