//! Error types for the outpage library.

use std::io;
use thiserror::Error;

/// Result type alias for outpage operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while parsing an outline or generating a document.
///
/// Structural parse errors carry the 0-based index of the offending input line.
/// All parse errors are fatal to the current run; there is no partial-tree
/// recovery.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A declaration line appeared inside a node's open content run.
    #[error("declaration is not allowed inside an open content run (line {line})")]
    DeclarationInsideOpenContent {
        /// 0-based input line index
        line: usize,
    },

    /// A content line appeared at the root indentation level.
    #[error("content must belong to a declared node (line {line})")]
    ContentOutsideAnyNode {
        /// 0-based input line index
        line: usize,
    },

    /// A content line appeared at the same indentation level as a sibling
    /// declaration, outside any open content run.
    #[error("content may not share an indentation level with a declaration (line {line})")]
    ContentSiblingOfDeclaration {
        /// 0-based input line index
        line: usize,
    },

    /// Indentation increased by more than one level between consecutive
    /// non-blank lines.
    #[error("indentation may not increase by more than one level per line (line {line})")]
    ExcessiveIndentJump {
        /// 0-based input line index
        line: usize,
    },

    /// After a dedent out of the node hierarchy, the triggering line was not a
    /// declaration.
    #[error("a dedent out of a node must be followed by a declaration (line {line})")]
    DedentWithoutDeclaration {
        /// 0-based input line index
        line: usize,
    },

    /// The input did not end with the blank-line end-of-input sentinel.
    #[error("input must end with a blank line")]
    MissingTrailingBlankLine,

    /// JSON serialization error while emitting a recorded document.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error reported by the canvas backend while emitting the document.
    #[error("rendering error: {0}")]
    Render(String),
}

impl Error {
    /// The 0-based input line index attached to a structural parse error.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::DeclarationInsideOpenContent { line }
            | Error::ContentOutsideAnyNode { line }
            | Error::ContentSiblingOfDeclaration { line }
            | Error::ExcessiveIndentJump { line }
            | Error::DedentWithoutDeclaration { line } => Some(*line),
            _ => None,
        }
    }
}
