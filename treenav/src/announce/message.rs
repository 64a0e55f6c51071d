//! Sentences spoken for selection and expansion changes.

use crate::tree::{NodeKind, TreeNode, VisibleNode};

pub const SELECTION_CLEARED: &str = "Selection cleared";

fn count(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("1 {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Describe a node that just became selected, e.g.
/// `"a, prefix group, collapsed, 2 suggestions, 1 of 2, level 1"`.
pub fn describe_node(node: &TreeNode, visible: &VisibleNode) -> String {
    let mut parts = vec![node.content.clone()];
    match node.kind {
        NodeKind::Prefix => {
            parts.push("prefix group".to_string());
            if node.has_children() {
                parts.push(if visible.expanded { "expanded" } else { "collapsed" }.to_string());
                parts.push(count(node.children.len(), "suggestion", "suggestions"));
            } else {
                parts.push("empty".to_string());
            }
        }
        NodeKind::Word => parts.push("word".to_string()),
    }
    parts.push(format!("{} of {}", visible.pos_in_set, visible.set_size));
    parts.push(format!("level {}", visible.depth + 1));
    parts.join(", ")
}

/// `"a expanded, 2 suggestions"` or `"a collapsed"`.
pub fn describe_expansion(node: &TreeNode, expanded: bool) -> String {
    if expanded {
        format!(
            "{} expanded, {}",
            node.content,
            count(node.children.len(), "suggestion", "suggestions")
        )
    } else {
        format!("{} collapsed", node.content)
    }
}

pub fn describe_activation(node: &TreeNode) -> String {
    format!("Selected {}", node.content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{ExpandedIds, Forest};

    #[test]
    fn prefix_description_counts_children() {
        let forest = Forest::new(vec![
            TreeNode::prefix("a", "a").children([TreeNode::word("apple", "apple"), TreeNode::word("ant", "ant")]),
            TreeNode::word("banana", "banana"),
        ]);
        let visible = forest.flatten_visible(&ExpandedIds::new());
        assert_eq!(
            describe_node(forest.node(&visible[0]), &visible[0]),
            "a, prefix group, collapsed, 2 suggestions, 1 of 2, level 1"
        );
        assert_eq!(
            describe_node(forest.node(&visible[1]), &visible[1]),
            "banana, word, 2 of 2, level 1"
        );
        assert_eq!(describe_expansion(forest.node(&visible[0]), false), "a collapsed");
    }
}
