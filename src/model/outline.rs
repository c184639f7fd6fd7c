//! Arena-backed outline tree.
//!
//! Nodes live in a flat arena and address each other by index, so an upward
//! walk ("retreat N levels") is a plain loop over parent indices and never
//! involves hashing node identity.

use serde::{Deserialize, Serialize};

/// Index of a node within an [`OutlineTree`] arena.
pub type NodeId = usize;

/// The unnamed root node present in every tree.
pub const ROOT: NodeId = 0;

/// A named tree node with ordered children and an ordered content payload.
///
/// Children and content are both first-class: a node may hold content lines
/// and child nodes at the same time. Insertion order of children is the
/// document's traversal and emission order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlineNode {
    /// Node name (declaration line text with marker and indentation stripped).
    /// Empty for the root.
    pub name: String,

    /// Parent node index; `None` only for the root.
    pub parent: Option<NodeId>,

    /// Child node indices in declaration order.
    pub children: Vec<NodeId>,

    /// Content lines in input order.
    pub content: Vec<String>,
}

/// A parsed outline document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlineTree {
    nodes: Vec<OutlineNode>,
}

impl OutlineTree {
    /// Create a tree holding only the root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![OutlineNode {
                name: String::new(),
                parent: None,
                children: Vec::new(),
                content: Vec::new(),
            }],
        }
    }

    /// Borrow a node by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this tree.
    pub fn node(&self, id: NodeId) -> &OutlineNode {
        &self.nodes[id]
    }

    /// Parent of `id`, `None` for the root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    /// Append a new child under `parent` and return its id.
    pub fn create_child(&mut self, parent: NodeId, name: impl Into<String>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(OutlineNode {
            name: name.into(),
            parent: Some(parent),
            children: Vec::new(),
            content: Vec::new(),
        });
        self.nodes[parent].children.push(id);
        id
    }

    /// Append a content line to `id`.
    pub fn push_content(&mut self, id: NodeId, line: impl Into<String>) {
        self.nodes[id].content.push(line.into());
    }

    /// Walk `levels` parents upward from `id`, stopping at the root.
    pub fn retreat(&self, id: NodeId, levels: usize) -> NodeId {
        let mut current = id;
        for _ in 0..levels {
            match self.nodes[current].parent {
                Some(parent) => current = parent,
                None => break,
            }
        }
        current
    }

    /// Nesting depth of `id`; the root is 0, its direct children 1.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = id;
        while let Some(parent) = self.nodes[current].parent {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// Total number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the tree holds nothing but the root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Re-serialize the tree as tab-indented outline text.
    ///
    /// Declarations get their marker back and content lines are emitted one
    /// level deeper than their owning declaration. The output ends with the
    /// blank-line sentinel, so it parses back to the same structure.
    pub fn to_outline_text(&self) -> String {
        let mut out = String::new();
        self.write_node_children(ROOT, 0, &mut out);
        out.push('\n');
        out
    }

    fn write_node_children(&self, id: NodeId, indent: usize, out: &mut String) {
        for &child in &self.nodes[id].children {
            let node = &self.nodes[child];
            for _ in 0..indent {
                out.push('\t');
            }
            out.push_str(&node.name);
            out.push('：');
            out.push('\n');
            for line in &node.content {
                for _ in 0..=indent {
                    out.push('\t');
                }
                out.push_str(line);
                out.push('\n');
            }
            self.write_node_children(child, indent + 1, out);
        }
    }
}

impl Default for OutlineTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OutlineTree {
        let mut tree = OutlineTree::new();
        let a = tree.create_child(ROOT, "甲");
        tree.push_content(a, "说明一");
        let b = tree.create_child(a, "乙");
        tree.push_content(b, "说明二");
        tree.create_child(ROOT, "丙");
        tree
    }

    #[test]
    fn test_create_and_lookup() {
        let tree = sample();
        assert_eq!(tree.len(), 4);
        let root = tree.node(ROOT);
        assert_eq!(root.children.len(), 2);
        assert_eq!(tree.node(root.children[0]).name, "甲");
    }

    #[test]
    fn test_retreat_is_bounded_by_root() {
        let tree = sample();
        let b = tree.node(tree.node(ROOT).children[0]).children[0];
        assert_eq!(tree.depth(b), 2);
        assert_eq!(tree.retreat(b, 1), tree.parent(b).unwrap());
        assert_eq!(tree.retreat(b, 2), ROOT);
        assert_eq!(tree.retreat(b, 99), ROOT);
    }

    #[test]
    fn test_to_outline_text_shape() {
        let text = sample().to_outline_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "甲：");
        assert_eq!(lines[1], "\t说明一");
        assert_eq!(lines[2], "\t乙：");
        assert_eq!(lines[3], "\t\t说明二");
        assert_eq!(lines[4], "丙：");
        assert!(text.ends_with("\n\n"));
    }
}
