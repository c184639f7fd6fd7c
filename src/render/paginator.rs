//! Pagination renderer.
//!
//! Drives a [`Canvas`] one page at a time: tracks the write cursor, breaks
//! pages when a draw of a given height would cross the bottom margin, wraps
//! content lines by rendered width, and records every heading together with
//! the page it landed on. Each new page gets a centered page-number footer, a
//! jump bookmark, and a link back to the table of contents in the top-right
//! corner.

use log::debug;

use crate::layout::{expand_tabs, text_width, wrap_by_width};
use crate::render::canvas::{Canvas, Color, FontWeight, Rect};
use crate::render::options::{FontScale, RenderOptions};

/// One heading recorded in emission order; the authoritative source for
/// table-of-contents generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingEntry {
    pub text: String,
    /// Styling level, clamped to 1-3
    pub level: u8,
    /// 1-based page the heading was drawn on
    pub page: usize,
}

/// Write position within the current page's content area. Moves strictly
/// downward between page breaks.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    x: f64,
    y: f64,
}

/// Page number the per-page return link jumps to. The table of contents
/// always starts on the page right after the title page.
const CATALOG_PAGE: usize = 2;

/// Placeholder reserving room for up to three page-number digits in catalog
/// leader computation.
const PAGE_DIGITS: &str = "999";

/// Stateful writer laying text out onto successive pages of a canvas.
pub struct PageWriter<C: Canvas> {
    canvas: C,
    options: RenderOptions,
    scale: FontScale,
    cursor: Cursor,
    page_num: usize,
    link_num: usize,
    heading_table: Vec<HeadingEntry>,
}

impl<C: Canvas> PageWriter<C> {
    /// Start writing on page 1 of `canvas`.
    pub fn new(canvas: C, options: RenderOptions) -> Self {
        let scale = options.font_scale();
        let cursor = Cursor {
            x: options.page_margin,
            y: options.page_height - options.page_margin,
        };
        let mut writer = Self {
            canvas,
            scale,
            cursor,
            page_num: 1,
            link_num: 0,
            heading_table: Vec::new(),
            options,
        };
        writer.write_page_footer();
        writer.canvas.bookmark_current_page("p1");
        writer
    }

    /// 1-based number of the page currently being written.
    pub fn page_number(&self) -> usize {
        self.page_num
    }

    /// Headings recorded so far, in emission order.
    pub fn heading_table(&self) -> &[HeadingEntry] {
        &self.heading_table
    }

    /// Number of link regions placed so far.
    pub fn link_count(&self) -> usize {
        self.link_num
    }

    /// Flush the underlying canvas.
    pub fn save(&mut self) -> crate::error::Result<()> {
        self.canvas.save()
    }

    /// Give up the canvas and the recorded heading table.
    pub fn into_parts(self) -> (C, Vec<HeadingEntry>) {
        (self.canvas, self.heading_table)
    }

    /// Draw the document title and move on to a fresh page.
    pub fn write_title(&mut self, text: &str) {
        let size = self.scale.title;
        self.canvas.set_font(FontWeight::Bold, size);
        self.canvas
            .draw_text(self.cursor.x, self.cursor.y - size, text);
        self.enter_new_page();
    }

    /// Write a content line, tab-expanded and wrapped to the content width.
    pub fn write_content(&mut self, text: &str) {
        let text = expand_tabs(text);
        let size = self.scale.content;
        let lines = wrap_by_width(&text, size, self.options.content_width());
        self.canvas.set_font(FontWeight::Normal, size);
        for line in lines {
            self.break_page_if_needed(size);
            self.canvas
                .draw_text(self.cursor.x, self.cursor.y - size, &line);
            self.cursor.y -= size + self.options.line_margin;
        }
    }

    /// Write a heading. Styling clamps to level 3 for deeper nesting; the
    /// colored variant fills a highlight bar behind level 2 and 3 headings.
    pub fn write_heading(&mut self, level: u8, text: &str, colored: bool) {
        let style = level.clamp(1, 3);
        if style == 1 {
            self.write_heading1(text, false);
        } else {
            self.write_subheading(style, text, colored);
        }
    }

    /// Level-1 heading. Always starts at the top of a page, so it carries no
    /// gap above.
    fn write_heading1(&mut self, text: &str, center: bool) {
        let page_top = self.options.page_height - self.options.page_margin;
        if self.cursor.y < page_top {
            self.enter_new_page();
        }

        let size = self.scale.heading1;
        let gap = (size / 5.0).floor();
        self.canvas.set_font(FontWeight::Bold, size);
        self.break_page_if_needed(size);

        let x = if center {
            (self.options.page_width - text_width(text, size)) / 2.0
        } else {
            self.cursor.x
        };
        self.canvas.draw_text(x, self.cursor.y - size, text);
        self.record_heading(text, 1);
        self.cursor.y -= size + self.options.line_margin + gap;
    }

    fn write_subheading(&mut self, style: u8, text: &str, colored: bool) {
        let size = self.scale.heading(style);
        let gap = (size / 5.0).floor();
        self.break_page_if_needed(size);

        if colored {
            let (fill, width_factor) = if style == 2 {
                (Color::HEADING2_FILL, 1.0)
            } else {
                (Color::HEADING3_FILL, 0.85)
            };
            let rect = Rect::new(
                self.cursor.x,
                self.cursor.y - gap - size - gap,
                self.options.content_width() * width_factor,
                size + gap,
            );
            self.canvas.fill_rect(rect, fill);
            self.canvas.set_fill_color(Color::TEXT);
        }

        self.canvas.set_font(FontWeight::Bold, size);
        self.canvas
            .draw_text(self.cursor.x, self.cursor.y - size - gap, text);
        self.record_heading(text, style);
        self.cursor.y -= size + self.options.line_margin + 2.0 * gap;
    }

    /// Write a whole line of link text jumping to `target_page`.
    pub fn write_link(&mut self, text: &str, target_page: usize) {
        let size = self.scale.content;
        self.canvas.set_font(FontWeight::Normal, size);
        self.canvas.set_fill_color(Color::LINK);
        self.break_page_if_needed(size);

        self.canvas
            .draw_text(self.cursor.x, self.cursor.y - size, text);
        self.canvas.set_fill_color(Color::BLACK);
        self.cursor.y -= size + self.options.line_margin;

        let rect = Rect::new(self.cursor.x, self.cursor.y, text_width(text, size), size);
        self.place_link(target_page, rect);
    }

    /// Write a text line followed by the clickable jump-label suffix.
    pub fn write_trailing_link(&mut self, text: &str, target_page: usize, bold: bool) {
        let text = expand_tabs(text);
        let size = self.scale.content;
        let weight = if bold {
            FontWeight::Bold
        } else {
            FontWeight::Normal
        };
        // Break first: a page break re-issues the footer and return-link
        // fonts, which would override the weight selected here.
        self.break_page_if_needed(size);
        self.canvas.set_font(weight, size);
        self.canvas
            .draw_text(self.cursor.x, self.cursor.y - size, &text);

        let label = self.options.jump_label.clone();
        let x = self.cursor.x + text_width(&text, size);
        self.canvas.set_fill_color(Color::LINK);
        self.canvas.draw_text(x, self.cursor.y - size, &label);
        self.canvas.set_fill_color(Color::BLACK);
        self.cursor.y -= size + self.options.line_margin;

        let rect = Rect::new(x, self.cursor.y, text_width(&label, size), size);
        self.place_link(target_page, rect);
    }

    /// Write the table of contents from `table`, adding `offset` to every
    /// recorded page number. One entry per heading, indented by level, with a
    /// dot leader sized to the space left over after the entry text, a
    /// room reserved for three page digits, and the jump label.
    pub fn write_catalog(&mut self, table: &[HeadingEntry], offset: usize) {
        debug!(
            "writing catalog of {} entries with page offset {}",
            table.len(),
            offset
        );
        let label = self.options.catalog_label.clone();
        self.write_heading1(&label, true);
        self.write_content(" ");

        let size = self.scale.content;
        for entry in table {
            let style = entry.level.clamp(1, 3);
            let indent = "   ".repeat(usize::from(style) - 1);
            let measured = format!(
                "{}{}{}{}",
                indent, entry.text, PAGE_DIGITS, self.options.jump_label
            );
            let spare = self.options.content_width() - text_width(&measured, size);
            let dots = ((spare * 2.0 / size).floor() as i64 - 2).max(0) as usize;

            let page = entry.page + offset;
            let line = format!("{}{} {} {}", indent, entry.text, ".".repeat(dots), page);
            self.write_trailing_link(&line, page, style == 1);
        }
    }

    /// Break the page first if a draw of height `size` would cross the
    /// bottom margin.
    fn break_page_if_needed(&mut self, size: f64) {
        if self.cursor.y - size < self.options.page_margin {
            self.enter_new_page();
        }
    }

    fn enter_new_page(&mut self) {
        self.canvas.page_break();
        self.page_num += 1;
        self.cursor = Cursor {
            x: self.options.page_margin,
            y: self.options.page_height - self.options.page_margin,
        };
        self.write_page_footer();
        self.canvas.bookmark_current_page(&format!("p{}", self.page_num));
        self.write_return_link(CATALOG_PAGE);
    }

    fn write_page_footer(&mut self) {
        let size = self.scale.footer;
        let text = self.page_num.to_string();
        self.canvas.set_font(FontWeight::Normal, size);
        let x = (self.options.page_width - text_width(&text, size)) / 2.0;
        self.canvas.draw_text(x, 10.0, &text);
    }

    /// Top-right corner link back to the table of contents.
    fn write_return_link(&mut self, target_page: usize) {
        let label = self.options.return_label.clone();
        let size = self.scale.content;
        self.canvas.set_font(FontWeight::Normal, size);
        self.canvas.set_fill_color(Color::LINK);
        let x = self.options.page_width - text_width(&label, size) - 5.0;
        let y = self.options.page_height - size - 5.0;
        self.canvas.draw_text(x, y, &label);
        self.canvas.set_fill_color(Color::BLACK);

        let rect = Rect::new(x, y, text_width(&label, size), size);
        self.place_link(target_page, rect);
    }

    fn record_heading(&mut self, text: &str, level: u8) {
        self.heading_table.push(HeadingEntry {
            text: text.to_string(),
            level,
            page: self.page_num,
        });
    }

    fn place_link(&mut self, target_page: usize, rect: Rect) {
        self.link_num += 1;
        let name = format!("link_{}", self.link_num);
        let target = format!("p{}", target_page);
        self.canvas.add_link_region(&name, &target, rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::recording::{DrawCommand, RecordingCanvas};

    fn writer(options: RenderOptions) -> PageWriter<RecordingCanvas> {
        PageWriter::new(RecordingCanvas::in_memory("测试"), options)
    }

    /// Page height chosen so the cursor lands exactly on the break boundary
    /// after two content lines: 100 - 28 - 2 * (12 + 4) = 40, and
    /// 40 - 12 == 28 is not below the margin.
    fn tiny_page() -> RenderOptions {
        RenderOptions::new().with_page_size(595.0, 100.0)
    }

    #[test]
    fn test_title_forces_page_break() {
        let mut writer = writer(RenderOptions::default());
        writer.write_title("文档标题");
        assert_eq!(writer.page_number(), 2);
    }

    #[test]
    fn test_break_boundary_is_strict() {
        let mut writer = writer(tiny_page());
        for _ in 0..3 {
            writer.write_content("行");
        }
        // Lines land at y = 72, 56, 40; the draw at 40 sits exactly on the
        // boundary and must not break.
        assert_eq!(writer.page_number(), 1);
        writer.write_content("行");
        assert_eq!(writer.page_number(), 2);
    }

    #[test]
    fn test_long_content_wraps_and_paginates() {
        let options = RenderOptions::default();
        let content_width = options.content_width();
        let mut writer = writer(options);
        let long = "很长的中文内容。".repeat(60);
        writer.write_content(&long);

        let (canvas, _) = writer.into_parts();
        for page in canvas.pages() {
            for command in &page.commands {
                if let DrawCommand::DrawText { text, .. } = command {
                    assert!(text_width(text, 12.0) <= content_width + 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_heading1_starts_at_page_top() {
        let mut writer = writer(RenderOptions::default());
        writer.write_heading(1, "第一章", false);
        assert_eq!(writer.page_number(), 1);
        writer.write_content("内容");
        writer.write_heading(1, "第二章", false);
        assert_eq!(writer.page_number(), 2);

        let pages: Vec<usize> = writer.heading_table().iter().map(|e| e.page).collect();
        assert_eq!(pages, vec![1, 2]);
    }

    #[test]
    fn test_heading_table_records_levels_and_pages() {
        let mut writer = writer(RenderOptions::default());
        writer.write_heading(1, "章", false);
        writer.write_heading(2, "节", false);
        writer.write_heading(3, "目", false);
        writer.write_heading(5, "过深", false);

        let levels: Vec<u8> = writer.heading_table().iter().map(|e| e.level).collect();
        assert_eq!(levels, vec![1, 2, 3, 3]);
    }

    #[test]
    fn test_colored_subheading_fills_highlight() {
        let mut writer = writer(RenderOptions::default());
        writer.write_heading(2, "着色标题", true);
        let (canvas, _) = writer.into_parts();
        let filled = canvas.pages()[0]
            .commands
            .iter()
            .any(|c| matches!(c, DrawCommand::FillRect { color, .. } if *color == Color::HEADING2_FILL));
        assert!(filled);
    }

    #[test]
    fn test_link_names_are_sequential() {
        let mut writer = writer(RenderOptions::default());
        writer.write_link("跳转甲", 3);
        writer.write_link("跳转乙", 4);
        assert_eq!(writer.link_count(), 2);

        let (canvas, _) = writer.into_parts();
        let names: Vec<String> = canvas.pages()[0]
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Link { name, .. } => Some(name.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(names, vec!["link_1", "link_2"]);
    }

    #[test]
    fn test_trailing_link_keeps_weight_across_page_break() {
        let mut writer = writer(tiny_page());
        for i in 0..4 {
            writer.write_trailing_link(&format!("条目{}", i), 2, true);
        }
        assert_eq!(writer.page_number(), 2);

        // The entry pushed onto page 2 must still be drawn bold, despite
        // the footer and return link written by the page break.
        let (canvas, _) = writer.into_parts();
        let mut weight = None;
        let mut checked = false;
        for command in &canvas.pages()[1].commands {
            match command {
                DrawCommand::SetFont { weight: w, .. } => weight = Some(*w),
                DrawCommand::DrawText { text, .. } if text.starts_with("条目") => {
                    assert_eq!(weight, Some(FontWeight::Bold));
                    checked = true;
                }
                _ => {}
            }
        }
        assert!(checked);
    }

    #[test]
    fn test_new_page_gets_footer_bookmark_and_return_link() {
        let mut writer = writer(RenderOptions::default());
        writer.write_title("标题");
        let (canvas, _) = writer.into_parts();

        let page2 = &canvas.pages()[1].commands;
        assert!(page2
            .iter()
            .any(|c| matches!(c, DrawCommand::Bookmark { name } if name == "p2")));
        assert!(page2
            .iter()
            .any(|c| matches!(c, DrawCommand::Link { target, .. } if target == "p2")));
        assert!(page2
            .iter()
            .any(|c| matches!(c, DrawCommand::DrawText { text, .. } if text == "2")));
    }

    #[test]
    fn test_catalog_links_carry_offset() {
        let table = vec![
            HeadingEntry {
                text: "第一章".to_string(),
                level: 1,
                page: 2,
            },
            HeadingEntry {
                text: "小节".to_string(),
                level: 2,
                page: 3,
            },
        ];
        let mut writer = writer(RenderOptions::default());
        writer.write_catalog(&table, 1);

        let (canvas, _) = writer.into_parts();
        let targets: Vec<String> = canvas
            .pages()
            .iter()
            .flat_map(|p| p.commands.iter())
            .filter_map(|c| match c {
                DrawCommand::Link { target, .. } => Some(target.clone()),
                _ => None,
            })
            .collect();
        assert!(targets.contains(&"p3".to_string()));
        assert!(targets.contains(&"p4".to_string()));
    }

    #[test]
    fn test_catalog_entry_fits_content_width() {
        let options = RenderOptions::default();
        let content_width = options.content_width();
        let table = vec![HeadingEntry {
            text: "标题".to_string(),
            level: 1,
            page: 2,
        }];
        let mut writer = writer(options);
        writer.write_catalog(&table, 0);

        let (canvas, _) = writer.into_parts();
        let entry_width: f64 = canvas
            .pages()
            .iter()
            .flat_map(|p| p.commands.iter())
            .filter_map(|c| match c {
                DrawCommand::DrawText { text, .. } if text.contains('.') => {
                    Some(text_width(text, 12.0) + text_width(" [跳转到]", 12.0))
                }
                _ => None,
            })
            .next()
            .unwrap();
        assert!(entry_width <= content_width + 1e-9);
    }
}
