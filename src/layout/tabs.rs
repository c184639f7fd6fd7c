//! Tab expansion against visual column positions.

use super::width::is_half_width;

/// Tab stops repeat every eight visual columns.
pub const TAB_STOP: usize = 8;

/// Replace every literal tab with spaces up to the next multiple-of-8 visual
/// column.
///
/// Alignment is computed against the progressively rewritten string, so the
/// padding of a later tab accounts for the spaces substituted for earlier
/// ones. A tab sitting exactly on a stop expands to a full [`TAB_STOP`] run,
/// moving to the next stop. Lines without tabs are returned unchanged.
pub fn expand_tabs(text: &str) -> String {
    if !text.contains('\t') {
        return text.to_string();
    }

    let mut chars: Vec<char> = text.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] != '\t' {
            i += 1;
            continue;
        }
        let column: usize = chars[..i]
            .iter()
            .map(|&c| if is_half_width(c) { 1 } else { 2 })
            .sum();
        let pad = TAB_STOP - column % TAB_STOP;
        chars.splice(i..=i, std::iter::repeat(' ').take(pad));
        i += pad;
    }
    chars.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::visual_index;

    fn visual_len(text: &str) -> usize {
        visual_index(text, text.chars().count())
    }

    #[test]
    fn test_expand_tabs_no_tab_is_identity() {
        let line = "普通文本 plain text";
        assert_eq!(expand_tabs(line), line);
        // Idempotent once tabs are gone.
        let once = expand_tabs("a\tb");
        assert_eq!(expand_tabs(&once), once);
    }

    #[test]
    fn test_expand_tabs_aligns_to_stop() {
        // "abc" occupies 3 columns, so the tab pads to column 8.
        assert_eq!(expand_tabs("abc\tx"), "abc     x");
        assert_eq!(visual_len("abc     "), 8);
    }

    #[test]
    fn test_expand_tabs_full_width_prefix() {
        // "测试" occupies 4 columns; the tab pads 4 more.
        let expanded = expand_tabs("测试\tx");
        assert_eq!(expanded, "测试    x");
        assert_eq!(visual_len("测试    "), 8);
    }

    #[test]
    fn test_expand_tabs_on_stop_advances_full_stop() {
        let expanded = expand_tabs("12345678\tx");
        assert_eq!(expanded, format!("12345678{}x", " ".repeat(8)));
    }

    #[test]
    fn test_expand_tabs_multiple() {
        // The second tab aligns against the already-expanded prefix.
        let expanded = expand_tabs("测试文本\t--->\t第五行。");
        assert!(!expanded.contains('\t'));
        let arrow_at = expanded.find("--->").unwrap();
        let prefix: String = expanded[..arrow_at].chars().collect();
        assert_eq!(visual_len(&prefix) % TAB_STOP, 0);
    }
}
