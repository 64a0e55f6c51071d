use std::collections::HashMap;

use super::{assign_depths, ExpandedIds, TreeNode};

/// Pre-order index entry for one node of the forest.
#[derive(Debug, Clone)]
struct Entry {
    /// Child indices from the root list down to this node.
    path: Box<[u32]>,
    depth: u16,
    /// One past the last pre-order index of this node's subtree.
    subtree_end: usize,
    pos_in_set: usize,
    set_size: usize,
}

/// A node as it appears in the flattened visible list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleNode {
    pub id: String,
    pub depth: u16,
    /// 1-based position among siblings.
    pub pos_in_set: usize,
    pub set_size: usize,
    pub has_children: bool,
    pub expanded: bool,
    entry: usize,
}

/// An owned forest plus an id-keyed pre-order index over all of its nodes.
///
/// Built once per tree replacement; visibility is then derived from the
/// index without walking or copying the nodes again.
#[derive(Debug, Clone, Default)]
pub struct Forest {
    roots: Vec<TreeNode>,
    entries: Vec<Entry>,
    by_id: HashMap<String, usize>,
}

impl Forest {
    pub fn new(mut roots: Vec<TreeNode>) -> Self {
        assign_depths(&mut roots);
        let mut forest = Self {
            roots,
            entries: Vec::new(),
            by_id: HashMap::new(),
        };
        let mut path = Vec::new();
        let mut entries = Vec::new();
        let mut by_id = HashMap::new();
        index_level(&forest.roots, &mut path, &mut entries, &mut by_id);
        forest.entries = entries;
        forest.by_id = by_id;
        forest
    }

    pub fn roots(&self) -> &[TreeNode] {
        &self.roots
    }

    /// Total number of nodes, expanded or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&TreeNode> {
        self.by_id.get(id).map(|&entry| self.node_at(entry))
    }

    /// Resolve a visible node back to the tree node it was flattened from.
    pub fn node(&self, visible: &VisibleNode) -> &TreeNode {
        self.node_at(visible.entry)
    }

    fn node_at(&self, entry: usize) -> &TreeNode {
        let path = &self.entries[entry].path;
        let mut node = &self.roots[path[0] as usize];
        for &i in &path[1..] {
            node = &node.children[i as usize];
        }
        node
    }

    /// Pre-order flattening that descends into a node's children iff its id
    /// is in `expanded`.
    pub fn flatten_visible(&self, expanded: &ExpandedIds) -> Vec<VisibleNode> {
        let mut visible = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            let entry = &self.entries[i];
            let node = self.node_at(i);
            let is_expanded = expanded.contains(&node.id);
            visible.push(VisibleNode {
                id: node.id.clone(),
                depth: entry.depth,
                pos_in_set: entry.pos_in_set,
                set_size: entry.set_size,
                has_children: node.has_children(),
                expanded: is_expanded,
                entry: i,
            });
            i = if is_expanded { i + 1 } else { entry.subtree_end };
        }
        visible
    }
}

fn index_level(
    nodes: &[TreeNode],
    path: &mut Vec<u32>,
    entries: &mut Vec<Entry>,
    by_id: &mut HashMap<String, usize>,
) {
    for (i, node) in nodes.iter().enumerate() {
        path.push(i as u32);
        let index = entries.len();
        entries.push(Entry {
            path: path.clone().into_boxed_slice(),
            depth: node.depth,
            subtree_end: index + 1,
            pos_in_set: i + 1,
            set_size: nodes.len(),
        });
        by_id.insert(node.id.clone(), index);
        index_level(&node.children, path, entries, by_id);
        entries[index].subtree_end = entries.len();
        path.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<TreeNode> {
        vec![
            TreeNode::prefix("a", "a").children([
                TreeNode::prefix("ap", "ap").children([
                    TreeNode::word("apple", "apple"),
                    TreeNode::word("apply", "apply"),
                ]),
                TreeNode::word("ant", "ant"),
            ]),
            TreeNode::word("banana", "banana"),
        ]
    }

    fn ids(visible: &[VisibleNode]) -> Vec<&str> {
        visible.iter().map(|v| v.id.as_str()).collect()
    }

    #[test]
    fn collapsed_forest_shows_roots_only() {
        let forest = Forest::new(sample());
        assert_eq!(ids(&forest.flatten_visible(&ExpandedIds::new())), ["a", "banana"]);
        assert_eq!(forest.len(), 6);
    }

    #[test]
    fn expanded_ancestors_reveal_depth_two() {
        let forest = Forest::new(sample());
        let expanded: ExpandedIds = ["a", "ap"].into_iter().collect();
        let visible = forest.flatten_visible(&expanded);
        assert_eq!(ids(&visible), ["a", "ap", "apple", "apply", "ant", "banana"]);
        assert_eq!(visible[2].depth, 2);
        assert_eq!((visible[3].pos_in_set, visible[3].set_size), (2, 2));
        assert_eq!(forest.node(&visible[4]).content, "ant");
    }

    #[test]
    fn expanded_child_under_collapsed_parent_stays_hidden() {
        let forest = Forest::new(sample());
        let expanded: ExpandedIds = ["ap"].into_iter().collect();
        assert_eq!(ids(&forest.flatten_visible(&expanded)), ["a", "banana"]);
    }
}
