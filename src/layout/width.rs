//! Binary half-width/full-width character classification.

/// Check whether a character renders at half an em.
///
/// True for the ASCII printable range (U+0021..=U+007E) and the space
/// character. Everything else is treated as full-width.
pub fn is_half_width(c: char) -> bool {
    matches!(c, '\u{0021}'..='\u{007E}' | ' ')
}

/// Rendered width of a single character at the given font size.
pub fn char_width(c: char, font_size: f64) -> f64 {
    if is_half_width(c) {
        font_size / 2.0
    } else {
        font_size
    }
}

/// Rendered width of a string at the given font size.
///
/// Additive over concatenation: `text_width(a) + text_width(b)` equals
/// `text_width(a + b)` for any split point.
pub fn text_width(text: &str, font_size: f64) -> f64 {
    text.chars().map(|c| char_width(c, font_size)).sum()
}

/// Visual column of the character at `char_index`, counting half-width
/// characters as one column and full-width characters as two.
///
/// Used for tab-stop alignment in a 2:1 monospaced rendering. An index at or
/// past the end of the string yields the full visual length.
pub fn visual_index(text: &str, char_index: usize) -> usize {
    text.chars()
        .take(char_index)
        .map(|c| if is_half_width(c) { 1 } else { 2 })
        .sum()
}
