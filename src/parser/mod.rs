//! Outline text parsing.

mod options;
mod outline;

pub use options::{ErrorMode, ParseOptions};
pub use outline::{parse_file, parse_str, OutlineParser, DECLARATION_MARKER};
