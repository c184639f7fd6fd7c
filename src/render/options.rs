//! Rendering options and page geometry.

/// Options controlling page geometry, spacing, and the generated labels.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Page width in points
    pub page_width: f64,

    /// Page height in points
    pub page_height: f64,

    /// Margin around the content area, all four sides
    pub page_margin: f64,

    /// Extra vertical gap between consecutive text lines
    pub line_margin: f64,

    /// Scale factor applied to every base font size
    pub size_ratio: f64,

    /// Heading text of the table-of-contents page
    pub catalog_label: String,

    /// Text of the per-page link back to the table of contents
    pub return_label: String,

    /// Suffix appended to each catalog entry as its clickable region
    pub jump_label: String,
}

impl RenderOptions {
    /// Create new render options with defaults (A4 portrait).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set page width and height in points.
    pub fn with_page_size(mut self, width: f64, height: f64) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    /// Set the content-area margin.
    pub fn with_page_margin(mut self, margin: f64) -> Self {
        self.page_margin = margin;
        self
    }

    /// Set the inter-line gap.
    pub fn with_line_margin(mut self, margin: f64) -> Self {
        self.line_margin = margin;
        self
    }

    /// Set the font size scale factor.
    pub fn with_size_ratio(mut self, ratio: f64) -> Self {
        self.size_ratio = ratio;
        self
    }

    /// Set the table-of-contents heading text.
    pub fn with_catalog_label(mut self, label: impl Into<String>) -> Self {
        self.catalog_label = label.into();
        self
    }

    /// Set the per-page return link text.
    pub fn with_return_label(mut self, label: impl Into<String>) -> Self {
        self.return_label = label.into();
        self
    }

    /// Set the catalog entry link suffix.
    pub fn with_jump_label(mut self, label: impl Into<String>) -> Self {
        self.jump_label = label.into();
        self
    }

    /// Width of the content area between the left and right margins.
    pub fn content_width(&self) -> f64 {
        self.page_width - 2.0 * self.page_margin
    }

    /// Font sizes after applying the scale ratio.
    pub fn font_scale(&self) -> FontScale {
        FontScale::scaled(self.size_ratio)
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            // A4 portrait
            page_width: 595.0,
            page_height: 842.0,
            page_margin: 28.0,
            line_margin: 4.0,
            size_ratio: 1.2,
            catalog_label: "目录".to_string(),
            return_label: "返回目录".to_string(),
            jump_label: " [跳转到]".to_string(),
        }
    }
}

/// Scaled font sizes for each text role.
///
/// Base sizes are 40 (title), 25/20/15 (headings), 10 (content and footer);
/// each is multiplied by the configured ratio and floored to keep whole-point
/// sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontScale {
    pub title: f64,
    pub heading1: f64,
    pub heading2: f64,
    pub heading3: f64,
    pub content: f64,
    pub footer: f64,
}

impl FontScale {
    fn scaled(ratio: f64) -> Self {
        let scale = |base: f64| (base * ratio).floor();
        Self {
            title: scale(40.0),
            heading1: scale(25.0),
            heading2: scale(20.0),
            heading3: scale(15.0),
            content: scale(10.0),
            footer: scale(10.0),
        }
    }

    /// Size of a heading at `style` (1-3).
    pub fn heading(&self, style: u8) -> f64 {
        match style {
            1 => self.heading1,
            2 => self.heading2,
            _ => self.heading3,
        }
    }
}
