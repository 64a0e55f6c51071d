use proptest::prelude::*;

use treenav::{ExpandedIds, Forest, TreeNode};

/// Straightforward recursive reference for the visible list.
fn reference(nodes: &[TreeNode], expanded: &ExpandedIds, out: &mut Vec<(String, u16)>) {
    for node in nodes {
        out.push((node.id.clone(), node.depth));
        if expanded.contains(&node.id) {
            reference(&node.children, expanded, out);
        }
    }
}

/// Build a forest from a shape: each entry is the child count of the next
/// node built, consumed in pre-order, stopping at depth 4.
fn build(shape: &[u8], counter: &mut usize, depth: u16, cursor: &mut usize) -> Vec<TreeNode> {
    let width = shape.get(*cursor).copied().unwrap_or(0) as usize;
    *cursor += 1;
    (0..width)
        .map(|_| {
            *counter += 1;
            let id = format!("n{}", counter);
            if depth < 4 {
                let children = build(shape, counter, depth + 1, cursor);
                if children.is_empty() {
                    TreeNode::word(id.clone(), id)
                } else {
                    TreeNode::prefix(id.clone(), id).children(children)
                }
            } else {
                TreeNode::word(id.clone(), id)
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn visible_list_matches_reference_dfs(
        shape in proptest::collection::vec(0u8..4, 1..40),
        picks in proptest::collection::vec(any::<bool>(), 0..200),
    ) {
        let roots = build(&shape, &mut 0, 0, &mut 0);
        let forest = Forest::new(roots);

        let expanded: ExpandedIds = (1..=forest.len())
            .filter(|i| picks.get(*i).copied().unwrap_or(false))
            .map(|i| format!("n{i}"))
            .collect();

        let mut expected = Vec::new();
        reference(forest.roots(), &expanded, &mut expected);

        let actual: Vec<(String, u16)> = forest
            .flatten_visible(&expanded)
            .into_iter()
            .map(|v| (v.id, v.depth))
            .collect();
        prop_assert_eq!(actual, expected);
    }
}
