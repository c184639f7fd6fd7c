//! Indentation-grammar parser that recovers an outline tree from flat text.
//!
//! Input is UTF-8 text indented with tabs only. A line ending in the
//! full-width colon declares a node; any other non-blank line is content
//! belonging to the most recent node. The grammar is enforced line by line
//! with a small state machine; every structural error carries the 0-based
//! index of the offending line.

use std::fs;
use std::path::Path;

use log::{debug, warn};
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::model::{NodeId, OutlineTree, ROOT};
use crate::parser::options::{ErrorMode, ParseOptions};

/// Full-width colon that closes a declaration line.
pub const DECLARATION_MARKER: char = '：';

/// Parse outline text with default options.
pub fn parse_str(text: &str) -> Result<OutlineTree> {
    OutlineParser::new().parse(text)
}

/// Read and parse an outline file with default options.
pub fn parse_file(path: impl AsRef<Path>) -> Result<OutlineTree> {
    let text = fs::read_to_string(path)?;
    OutlineParser::new().parse(&text)
}

/// Line-oriented outline parser.
#[derive(Debug, Clone, Default)]
pub struct OutlineParser {
    options: ParseOptions,
}

impl OutlineParser {
    /// Create a parser with default options.
    pub fn new() -> Self {
        Self {
            options: ParseOptions::default(),
        }
    }

    /// Create a parser with the given options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Parse `text` into an outline tree.
    pub fn parse(&self, text: &str) -> Result<OutlineTree> {
        // Tolerate a UTF-8 byte order mark at the start of the file.
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        let mut lines: Vec<&str> = text.split('\n').collect();
        if text.ends_with('\n') {
            // Artifact of the final newline, not an input line.
            lines.pop();
        }
        self.check_sentinel(&lines)?;

        let mut state = ParserState::new(self.options.normalize);
        for (index, raw) in lines.iter().enumerate() {
            let line = raw.trim_end();
            if line.is_empty() {
                continue;
            }
            let previous_indent = state.last_indent;
            if let Err(err) = state.consume(index, line) {
                match self.options.error_mode {
                    ErrorMode::Strict => return Err(err),
                    ErrorMode::Lenient => {
                        warn!("skipping malformed line {}: {}", index, err);
                        state.last_indent = previous_indent;
                    }
                }
            }
        }

        debug!("parsed outline with {} nodes", state.tree.len() - 1);
        Ok(state.tree)
    }

    /// The trailing blank line is the explicit end-of-input sentinel.
    fn check_sentinel(&self, lines: &[&str]) -> Result<()> {
        let ends_blank = lines.last().map_or(true, |line| line.trim().is_empty());
        if ends_blank {
            return Ok(());
        }
        match self.options.error_mode {
            ErrorMode::Strict => Err(Error::MissingTrailingBlankLine),
            ErrorMode::Lenient => {
                warn!("input does not end with a blank line, healing");
                Ok(())
            }
        }
    }
}

/// Per-line parsing state.
///
/// `current` points at the most recently declared node. `unit_closed` is
/// false while that node has an open run of content lines, and
/// `content_indent` tracks how many indentation levels the content region
/// itself has consumed, so a dedent can be split into "content region
/// shrinks" and "pointer retreats to an ancestor".
struct ParserState {
    tree: OutlineTree,
    current: NodeId,
    last_indent: usize,
    unit_closed: bool,
    content_indent: usize,
    normalize: bool,
}

impl ParserState {
    fn new(normalize: bool) -> Self {
        Self {
            tree: OutlineTree::new(),
            current: ROOT,
            last_indent: 0,
            unit_closed: true,
            content_indent: 0,
            normalize,
        }
    }

    fn consume(&mut self, index: usize, line: &str) -> Result<()> {
        let current_indent = leading_tabs(line);
        let indent_change = current_indent as isize - self.last_indent as isize;
        self.last_indent = current_indent;

        let is_declaration = line.ends_with(DECLARATION_MARKER);

        if indent_change > 1 {
            return Err(Error::ExcessiveIndentJump { line: index });
        }

        if indent_change == 1 {
            return self.consume_deeper(index, line, is_declaration);
        }
        if indent_change == 0 {
            return self.consume_same_level(index, line, is_declaration, current_indent);
        }
        self.consume_shallower(index, line, is_declaration, indent_change)
    }

    fn consume_deeper(&mut self, index: usize, line: &str, is_declaration: bool) -> Result<()> {
        if self.unit_closed {
            if is_declaration {
                self.declare(self.current, line);
            } else {
                self.write_content(line, 0);
                self.unit_closed = false;
            }
            return Ok(());
        }
        if is_declaration {
            return Err(Error::DeclarationInsideOpenContent { line: index });
        }
        // Deeper continuation line; keep its relative indentation.
        self.content_indent += 1;
        self.write_content(line, self.content_indent);
        Ok(())
    }

    fn consume_same_level(
        &mut self,
        index: usize,
        line: &str,
        is_declaration: bool,
        current_indent: usize,
    ) -> Result<()> {
        if is_declaration {
            if self.unit_closed {
                // Sibling of the last declaration.
                let parent = self.tree.parent(self.current).unwrap_or(ROOT);
                self.declare(parent, line);
                return Ok(());
            }
            if self.content_indent > 0 {
                return Err(Error::DeclarationInsideOpenContent { line: index });
            }
            // A declaration level with the base content region closes the
            // run and opens a child of the content's owner.
            self.unit_closed = true;
            self.declare(self.current, line);
            return Ok(());
        }
        if self.unit_closed {
            if current_indent == 0 {
                return Err(Error::ContentOutsideAnyNode { line: index });
            }
            return Err(Error::ContentSiblingOfDeclaration { line: index });
        }
        self.write_content(line, self.content_indent);
        Ok(())
    }

    fn consume_shallower(
        &mut self,
        index: usize,
        line: &str,
        is_declaration: bool,
        indent_change: isize,
    ) -> Result<()> {
        let diff = indent_change + self.content_indent as isize;
        if diff >= 0 {
            // Only the content region's own indentation shrank.
            self.content_indent = diff as usize;
            if is_declaration {
                if diff > 0 {
                    return Err(Error::DeclarationInsideOpenContent { line: index });
                }
                self.unit_closed = true;
                self.declare(self.current, line);
                return Ok(());
            }
            self.write_content(line, self.content_indent);
            return Ok(());
        }

        // The dedent crossed out of the content region into the hierarchy.
        // `diff` counts levels against the previous line's indent: the
        // content base when a run was open, but the declaration's own indent
        // when the unit was already closed, which sits one level higher.
        let levels = if self.unit_closed {
            (-diff) as usize + 1
        } else {
            (-diff) as usize
        };
        self.content_indent = 0;
        self.current = self.tree.retreat(self.current, levels);
        self.unit_closed = true;
        if !is_declaration {
            return Err(Error::DedentWithoutDeclaration { line: index });
        }
        self.declare(self.current, line);
        Ok(())
    }

    fn declare(&mut self, parent: NodeId, line: &str) {
        let name = line.trim_start_matches('\t');
        let name = name.strip_suffix(DECLARATION_MARKER).unwrap_or(name);
        let name = self.normalized(name);
        self.current = self.tree.create_child(parent, name);
    }

    fn write_content(&mut self, line: &str, depth: usize) {
        let body = self.normalized(line.trim_start_matches('\t'));
        let mut stored = "\t".repeat(depth);
        stored.push_str(&body);
        self.tree.push_content(self.current, stored);
    }

    fn normalized(&self, text: &str) -> String {
        if self.normalize {
            text.nfc().collect()
        } else {
            text.to_string()
        }
    }
}

fn leading_tabs(line: &str) -> usize {
    line.chars().take_while(|&c| c == '\t').count()
}
