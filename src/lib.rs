//! # outpage
//!
//! Converts tab-indented outline notes into a paginated, hyperlinked
//! document with an auto-generated, page-accurate table of contents.
//!
//! The pipeline has two stages: an indentation-grammar parser that recovers
//! a tree of named nodes from flat text, and a pagination renderer that lays
//! the tree out onto fixed-size pages, wrapping text by rendered glyph width
//! (half-width vs full-width characters) and resolving table-of-contents
//! page numbers through a three-pass composition.
//!
//! ## Quick Start
//!
//! ```no_run
//! fn main() -> outpage::Result<()> {
//!     // Reads notes.txt and writes notes.json next to it.
//!     let output = outpage::generate("notes.txt")?;
//!     println!("wrote {}", output.display());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Strict indentation grammar**: line-numbered structural errors, with a
//!   lenient mode that skips malformed lines
//! - **CJK-aware layout**: width computation and 8-column tab alignment for
//!   mixed half-width/full-width text
//! - **Page-accurate TOC**: dot leaders, jump links, and per-page return
//!   links, with page numbers corrected for the TOC's own length
//! - **Parallel batch generation**: uses Rayon across independent inputs

pub mod compose;
pub mod error;
pub mod layout;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use compose::{compose, compose_into};
pub use error::{Error, Result};
pub use model::{flatten, Directive, NodeId, OutlineNode, OutlineTree, ROOT};
pub use parser::{parse_file, parse_str, ErrorMode, OutlineParser, ParseOptions};
pub use render::{
    Canvas, Color, DocumentMeta, DrawCommand, FontWeight, HeadingEntry, PageWriter, Rect,
    RecordedPage, RecordingCanvas, RenderOptions,
};

use std::path::{Path, PathBuf};

use rayon::prelude::*;

/// Generate a document from an outline file with default options.
///
/// The output lands next to the input, named after it with the extension
/// replaced, and the input's base name becomes the document title.
///
/// # Example
///
/// ```no_run
/// let output = outpage::generate("门店认领文档.txt").unwrap();
/// assert!(output.ends_with("门店认领文档.json"));
/// ```
pub fn generate<P: AsRef<Path>>(input: P) -> Result<PathBuf> {
    Outpage::new().generate(input)
}

/// Generate a document with custom parse and render options.
pub fn generate_with_options<P: AsRef<Path>>(
    input: P,
    parse_options: ParseOptions,
    render_options: RenderOptions,
) -> Result<PathBuf> {
    Outpage::new()
        .with_parse_options(parse_options)
        .with_render_options(render_options)
        .generate(input)
}

/// Generate documents for several outline files in parallel.
///
/// Each input owns its own tree, cursor, and canvas, so inputs are fully
/// independent; results come back in input order.
pub fn generate_many<P: AsRef<Path> + Sync>(inputs: &[P]) -> Vec<Result<PathBuf>> {
    let outpage = Outpage::new();
    inputs.par_iter().map(|p| outpage.generate(p)).collect()
}

/// Builder for parsing outlines and generating documents.
///
/// # Example
///
/// ```no_run
/// use outpage::Outpage;
///
/// let output = Outpage::new()
///     .lenient()
///     .with_catalog_label("索引")
///     .generate("notes.txt")?;
/// # Ok::<(), outpage::Error>(())
/// ```
pub struct Outpage {
    parse_options: ParseOptions,
    render_options: RenderOptions,
}

impl Outpage {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Enable lenient parsing mode.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Replace the parse options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Replace the render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Set the page size in points.
    pub fn with_page_size(mut self, width: f64, height: f64) -> Self {
        self.render_options = self.render_options.with_page_size(width, height);
        self
    }

    /// Set the table-of-contents heading text.
    pub fn with_catalog_label(mut self, label: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_catalog_label(label);
        self
    }

    /// Parse an outline file into a tree.
    pub fn parse<P: AsRef<Path>>(&self, input: P) -> Result<OutlineTree> {
        let text = std::fs::read_to_string(input)?;
        OutlineParser::with_options(self.parse_options.clone()).parse(&text)
    }

    /// Generate the document for `input`, writing it next to the input with
    /// the extension replaced. Returns the output path.
    pub fn generate<P: AsRef<Path>>(&self, input: P) -> Result<PathBuf> {
        let input = input.as_ref();
        let tree = self.parse(input)?;
        let directives = flatten(&tree);

        let title = input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        let output = input.with_extension(OUTPUT_EXTENSION);

        compose_into(&directives, &title, &self.render_options, &output)?;
        Ok(output)
    }
}

impl Default for Outpage {
    fn default() -> Self {
        Self::new()
    }
}

/// Extension of the generated recording file.
pub const OUTPUT_EXTENSION: &str = "json";
