//! Pre-order flattening of an outline tree into typed render directives.

use serde::{Deserialize, Serialize};

use super::{NodeId, OutlineTree, ROOT};

/// One typed instruction for the pagination renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Directive {
    /// Start a heading at the given nesting level (1 at the root's direct
    /// children). Depth is preserved as declared; rendering clamps styling to
    /// level 3.
    Heading {
        /// Nesting level, 1-based
        level: u8,
        /// Heading text
        text: String,
    },

    /// One content line belonging to the most recent heading.
    Content {
        /// Raw content line (tabs not yet expanded)
        line: String,
    },
}

/// Flatten `tree` into render directives.
///
/// For each node, in insertion order: its content lines first, then for each
/// child a heading directive immediately followed by the child's own
/// sequence.
pub fn flatten(tree: &OutlineTree) -> Vec<Directive> {
    let mut directives = Vec::new();
    flatten_node(tree, ROOT, 0, &mut directives);
    directives
}

fn flatten_node(tree: &OutlineTree, id: NodeId, depth: usize, out: &mut Vec<Directive>) {
    let node = tree.node(id);
    for line in &node.content {
        out.push(Directive::Content { line: line.clone() });
    }
    for &child in &node.children {
        out.push(Directive::Heading {
            level: (depth + 1).min(u8::MAX as usize) as u8,
            text: tree.node(child).name.clone(),
        });
        flatten_node(tree, child, depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_preorder() {
        let mut tree = OutlineTree::new();
        let a = tree.create_child(ROOT, "章节");
        tree.push_content(a, "内容一");
        let b = tree.create_child(a, "小节");
        tree.push_content(b, "内容二");
        tree.create_child(ROOT, "附录");

        let directives = flatten(&tree);
        assert_eq!(
            directives,
            vec![
                Directive::Heading {
                    level: 1,
                    text: "章节".into()
                },
                Directive::Content {
                    line: "内容一".into()
                },
                Directive::Heading {
                    level: 2,
                    text: "小节".into()
                },
                Directive::Content {
                    line: "内容二".into()
                },
                Directive::Heading {
                    level: 1,
                    text: "附录".into()
                },
            ]
        );
    }

    #[test]
    fn test_flatten_empty_tree() {
        assert!(flatten(&OutlineTree::new()).is_empty());
    }

    #[test]
    fn test_flatten_deep_levels_keep_true_depth() {
        let mut tree = OutlineTree::new();
        let mut node = ROOT;
        for name in ["一", "二", "三", "四", "五"] {
            node = tree.create_child(node, name);
        }
        let levels: Vec<u8> = flatten(&tree)
            .into_iter()
            .map(|d| match d {
                Directive::Heading { level, .. } => level,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(levels, vec![1, 2, 3, 4, 5]);
    }
}
