//! Recording canvas implementation.
//!
//! Records every drawing call as a typed command, grouped by page, and
//! serializes the finished document as JSON. The intermediate passes of
//! document composition use an in-memory recording; the final pass writes
//! its recording to disk.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::render::canvas::{Canvas, Color, FontWeight, Rect};

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    SetFont { weight: FontWeight, size: f64 },
    DrawText { x: f64, y: f64, text: String },
    SetFillColor { color: Color },
    FillRect { rect: Rect, color: Color },
    Bookmark { name: String },
    Link { name: String, target: String, rect: Rect },
}

/// All commands recorded on one page, in issue order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordedPage {
    pub commands: Vec<DrawCommand>,
}

/// Document-level metadata written alongside the page list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMeta {
    pub title: String,
    pub generated: DateTime<Utc>,
    pub page_count: usize,
}

#[derive(Serialize)]
struct Envelope<'a> {
    meta: DocumentMeta,
    pages: &'a [RecordedPage],
}

/// A [`Canvas`] that records drawing commands page by page.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    title: String,
    output: Option<PathBuf>,
    pages: Vec<RecordedPage>,
}

impl RecordingCanvas {
    /// Create a recording that is never written to disk.
    pub fn in_memory(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            output: None,
            pages: vec![RecordedPage::default()],
        }
    }

    /// Create a recording that [`save`](Canvas::save) writes to `path`.
    pub fn with_output(title: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self {
            title: title.into(),
            output: Some(path.as_ref().to_path_buf()),
            pages: vec![RecordedPage::default()],
        }
    }

    /// Number of pages recorded so far (the open page included).
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Recorded pages, the still-open page last.
    pub fn pages(&self) -> &[RecordedPage] {
        &self.pages
    }

    /// Document title carried into the metadata.
    pub fn title(&self) -> &str {
        &self.title
    }

    fn meta(&self) -> DocumentMeta {
        DocumentMeta {
            title: self.title.clone(),
            generated: Utc::now(),
            page_count: self.pages.len(),
        }
    }

    /// Serialize the recording as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        let envelope = Envelope {
            meta: self.meta(),
            pages: &self.pages,
        };
        Ok(serde_json::to_string_pretty(&envelope)?)
    }

    fn push(&mut self, command: DrawCommand) {
        // A page is always open; page_break keeps the invariant.
        if let Some(page) = self.pages.last_mut() {
            page.commands.push(command);
        }
    }
}

impl Canvas for RecordingCanvas {
    fn set_font(&mut self, weight: FontWeight, size: f64) {
        self.push(DrawCommand::SetFont { weight, size });
    }

    fn draw_text(&mut self, x: f64, y: f64, text: &str) {
        self.push(DrawCommand::DrawText {
            x,
            y,
            text: text.to_string(),
        });
    }

    fn set_fill_color(&mut self, color: Color) {
        self.push(DrawCommand::SetFillColor { color });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.push(DrawCommand::FillRect { rect, color });
    }

    fn page_break(&mut self) {
        self.pages.push(RecordedPage::default());
    }

    fn bookmark_current_page(&mut self, name: &str) {
        self.push(DrawCommand::Bookmark {
            name: name.to_string(),
        });
    }

    fn add_link_region(&mut self, name: &str, target: &str, rect: Rect) {
        self.push(DrawCommand::Link {
            name: name.to_string(),
            target: target.to_string(),
            rect,
        });
    }

    fn save(&mut self) -> Result<()> {
        let Some(path) = self.output.clone() else {
            debug!("in-memory recording of {} pages discarded", self.pages.len());
            return Ok(());
        };
        let envelope = Envelope {
            meta: self.meta(),
            pages: &self.pages,
        };
        let file = File::create(&path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), &envelope)?;
        debug!("saved {} pages to {}", self.pages.len(), path.display());
        Ok(())
    }
}
