//! Greedy width-bounded line wrapping.

use super::width::char_width;

/// Split `text` into lines that fit within `content_width` at `font_size`.
///
/// Accumulation is greedy: a line ends the moment adding the next character's
/// width would exceed the content width (strict `>`), and that character
/// starts the next line. A character wider than the content width still gets a
/// line of its own rather than looping. Always returns at least one line; the
/// empty string wraps to a single empty line.
pub fn wrap_by_width(text: &str, font_size: f64, content_width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut width = 0.0;

    for c in text.chars() {
        let w = char_width(c, font_size);
        if width + w > content_width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            width = 0.0;
        }
        current.push(c);
        width += w;
    }
    lines.push(current);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::text_width;

    #[test]
    fn test_short_text_single_line() {
        assert_eq!(wrap_by_width("hello", 10.0, 100.0), vec!["hello"]);
        assert_eq!(wrap_by_width("", 10.0, 100.0), vec![""]);
    }

    #[test]
    fn test_wrap_at_exact_boundary_does_not_split() {
        // Four half-width chars at size 10 are exactly 20 wide.
        assert_eq!(wrap_by_width("abcd", 10.0, 20.0), vec!["abcd"]);
    }

    #[test]
    fn test_overflow_char_starts_next_line() {
        assert_eq!(wrap_by_width("abcde", 10.0, 20.0), vec!["abcd", "e"]);
    }

    #[test]
    fn test_full_width_wrapping() {
        // Each CJK char is 10 wide; three fit in 30.
        assert_eq!(
            wrap_by_width("一二三四五", 10.0, 30.0),
            vec!["一二三", "四五"]
        );
    }

    #[test]
    fn test_no_line_exceeds_content_width() {
        let text = "混合 mixed 文本 1234567890 中文 and ascii 连在一起的长行";
        for line in wrap_by_width(text, 12.0, 50.0) {
            assert!(text_width(&line, 12.0) <= 50.0 + 1e-9);
        }
    }

    #[test]
    fn test_oversized_char_gets_own_line() {
        // Content width narrower than one full-width char must not loop.
        let lines = wrap_by_width("中文", 10.0, 5.0);
        assert_eq!(lines, vec!["中", "文"]);
    }
}
