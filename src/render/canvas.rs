//! Canvas capability driven by the pagination renderer.
//!
//! The renderer never emits document bytes itself; it issues drawing calls
//! against this trait. Coordinates follow the usual page convention: origin
//! at the bottom-left corner, y growing upward, text drawn from its baseline.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Font weight selector for [`Canvas::set_font`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    /// Regular text weight
    Normal,
    /// Bold weight, used for headings and catalog entries
    Bold,
}

/// An RGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Default body text color.
    pub const TEXT: Color = Color::new(0.1, 0.1, 0.1);

    /// Hyperlink text color.
    pub const LINK: Color = Color::new(0.0, 0.0, 1.0);

    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

    /// Highlight fill behind level-2 headings.
    pub const HEADING2_FILL: Color = Color::new(0.6, 0.7, 1.0);

    /// Highlight fill behind level-3 headings.
    pub const HEADING3_FILL: Color = Color::new(1.0, 0.9, 0.6);
}

/// An axis-aligned rectangle, `(x, y)` at the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Page-description capability the renderer draws against.
///
/// Implementations accumulate drawing state page by page; [`page_break`]
/// finishes the current page and starts a fresh one. Bookmarks name the
/// current page as a jump destination, and link regions bind a clickable
/// rectangle on the current page to a previously or subsequently bookmarked
/// destination.
///
/// [`page_break`]: Canvas::page_break
pub trait Canvas {
    /// Select the active font weight and size for subsequent text.
    fn set_font(&mut self, weight: FontWeight, size: f64);

    /// Draw `text` with its baseline starting at `(x, y)`.
    fn draw_text(&mut self, x: f64, y: f64, text: &str);

    /// Set the fill color for subsequent text and shapes.
    fn set_fill_color(&mut self, color: Color);

    /// Fill `rect` with `color`, no stroke.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Finish the current page and start a new one.
    fn page_break(&mut self);

    /// Register the current page as the jump destination `name`.
    fn bookmark_current_page(&mut self, name: &str);

    /// Bind a clickable `rect` on the current page to `target` (a bookmark
    /// name). `name` must be unique within the document.
    fn add_link_region(&mut self, name: &str, target: &str, rect: Rect);

    /// Flush the finished document.
    fn save(&mut self) -> Result<()>;
}
