//! Suggestion forest: prefix groups containing word leaves.

mod expansion;
mod forest;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use expansion::ExpandedIds;
pub use forest::{Forest, VisibleNode};

/// Whether a node groups other suggestions or is a concrete term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Prefix,
    Word,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Prefix => "prefix",
            NodeKind::Word => "word",
        }
    }
}

/// Opaque data attached to word nodes. Carried through, never interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<u64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

/// A node of the suggestion forest.
///
/// Ids must be unique across the whole forest. This is the caller's
/// responsibility and is not checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: String,
    pub kind: NodeKind,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
    /// Distance from the root. Recomputed whenever the node is attached.
    #[serde(skip)]
    pub depth: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<WordMeta>,
}

impl TreeNode {
    pub fn prefix(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::Prefix,
            content: content.into(),
            children: Vec::new(),
            depth: 0,
            meta: None,
        }
    }

    pub fn word(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::Word,
            content: content.into(),
            children: Vec::new(),
            depth: 0,
            meta: Some(WordMeta::default()),
        }
    }

    /// Append a child, fixing up depths of the attached subtree.
    pub fn child(mut self, mut child: TreeNode) -> Self {
        child.set_depth(self.depth + 1);
        self.children.push(child);
        self
    }

    pub fn children(self, children: impl IntoIterator<Item = TreeNode>) -> Self {
        children.into_iter().fold(self, |node, c| node.child(c))
    }

    pub fn frequency(mut self, frequency: u64) -> Self {
        self.meta.get_or_insert_with(WordMeta::default).frequency = Some(frequency);
        self
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Only prefix groups with at least one child can be expanded visibly.
    pub fn is_expandable(&self) -> bool {
        self.kind == NodeKind::Prefix && self.has_children()
    }

    pub fn is_word(&self) -> bool {
        self.kind == NodeKind::Word
    }

    fn set_depth(&mut self, depth: u16) {
        self.depth = depth;
        for child in &mut self.children {
            child.set_depth(depth + 1);
        }
    }
}

/// Reset depths so roots are 0 and every child is one deeper than its parent.
pub fn assign_depths(roots: &mut [TreeNode]) {
    for root in roots {
        root.set_depth(0);
    }
}

/// Find a node anywhere in the forest by id.
pub fn find_node<'a>(roots: &'a [TreeNode], id: &str) -> Option<&'a TreeNode> {
    for node in roots {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_node(&node.children, id) {
            return Some(found);
        }
    }
    None
}
