//! Glyph-width model and width-driven text preparation.
//!
//! Layout treats every character as either half-width (ASCII printable range
//! plus the space) or full-width (everything else, i.e. the CJK class). All
//! width arithmetic, tab expansion, and line wrapping build on that binary
//! classification.

mod tabs;
mod width;
mod wrap;

pub use tabs::{expand_tabs, TAB_STOP};
pub use width::{char_width, is_half_width, text_width, visual_index};
pub use wrap::wrap_by_width;
