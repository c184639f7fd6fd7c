//! Document model: the outline tree and its flattened directive form.

mod flatten;
mod outline;

pub use flatten::{flatten, Directive};
pub use outline::{NodeId, OutlineNode, OutlineTree, ROOT};
