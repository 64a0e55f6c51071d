//! Selection and expansion state over the visible slice of a suggestion forest.
//!
//! The controller owns three pieces of state: the current [`Forest`], the
//! [`ExpandedIds`] snapshot, and the id of the selected node. The flattened
//! visible list is recomputed whenever the forest or the expansion set
//! changes, and the selection is dropped if its node is no longer visible.
//!
//! Operations referring to ids that are not visible (or not in the tree at
//! all) are silently ignored.

mod keys;

use std::collections::HashMap;

use crate::tree::{ExpandedIds, Forest, TreeNode, VisibleNode};

type SelectionFn = Box<dyn FnMut(Option<&str>, Option<&TreeNode>)>;
type ExpansionFn = Box<dyn FnMut(&str, bool)>;
type WordFn = Box<dyn FnMut(&TreeNode)>;

/// Callbacks fired synchronously by [`NavigationController`].
#[derive(Default)]
pub struct NavCallbacks {
    on_selection_change: Option<SelectionFn>,
    on_expansion_change: Option<ExpansionFn>,
    on_word_select: Option<WordFn>,
}

impl NavCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_selection_change(
        mut self,
        f: impl FnMut(Option<&str>, Option<&TreeNode>) + 'static,
    ) -> Self {
        self.on_selection_change = Some(Box::new(f));
        self
    }

    pub fn on_expansion_change(mut self, f: impl FnMut(&str, bool) + 'static) -> Self {
        self.on_expansion_change = Some(Box::new(f));
        self
    }

    pub fn on_word_select(mut self, f: impl FnMut(&TreeNode) + 'static) -> Self {
        self.on_word_select = Some(Box::new(f));
        self
    }

    fn selection(&mut self, forest: &Forest, id: Option<&str>) {
        if let Some(f) = self.on_selection_change.as_mut() {
            f(id, id.and_then(|id| forest.get(id)));
        }
    }

    fn expansion(&mut self, id: &str, expanded: bool) {
        if let Some(f) = self.on_expansion_change.as_mut() {
            f(id, expanded);
        }
    }

    fn word(&mut self, node: &TreeNode) {
        if let Some(f) = self.on_word_select.as_mut() {
            f(node);
        }
    }
}

impl std::fmt::Debug for NavCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavCallbacks")
            .field("on_selection_change", &self.on_selection_change.is_some())
            .field("on_expansion_change", &self.on_expansion_change.is_some())
            .field("on_word_select", &self.on_word_select.is_some())
            .finish()
    }
}

/// State transitions recorded by the controller, in the order they happened.
///
/// Mirrors the callbacks so that an owning view can react (announce, animate,
/// move focus) without wrapping the user's closures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    /// Selection moved to a node, or was dropped because its node left the
    /// visible list.
    SelectionChanged { id: Option<String> },
    /// Escape was pressed. Recorded even when nothing was selected.
    SelectionCleared,
    ExpansionChanged { id: String, expanded: bool },
    WordActivated { id: String },
}

#[derive(Debug, Default)]
pub struct NavigationController {
    forest: Forest,
    expanded: ExpandedIds,
    visible: Vec<VisibleNode>,
    /// Node id -> index into `visible`.
    visible_index: HashMap<String, usize>,
    current: Option<String>,
    callbacks: NavCallbacks,
    events: Vec<NavEvent>,
}

impl NavigationController {
    pub fn new(callbacks: NavCallbacks) -> Self {
        Self {
            callbacks,
            ..Default::default()
        }
    }

    /// Replace the forest and the expansion set.
    pub fn set_tree(&mut self, roots: Vec<TreeNode>, expanded: ExpandedIds) {
        self.forest = Forest::new(roots);
        self.expanded = expanded;
        self.recompute();
    }

    /// Select `id` if it is visible. Anything else is a no-op.
    pub fn select(&mut self, id: &str) {
        if !self.visible_index.contains_key(id) {
            log::trace!("[nav] ignoring select of non-visible node {id}");
            return;
        }
        self.set_current(id.to_string());
    }

    pub fn expand(&mut self, id: &str) {
        self.set_expanded(id, true);
    }

    pub fn collapse(&mut self, id: &str) {
        self.set_expanded(id, false);
    }

    pub fn toggle_expansion(&mut self, id: &str) {
        let expanded = self.expanded.contains(id);
        self.set_expanded(id, !expanded);
    }

    /// Clear everything, without firing callbacks.
    pub fn reset(&mut self) {
        self.forest = Forest::default();
        self.expanded = ExpandedIds::new();
        self.visible.clear();
        self.visible_index.clear();
        self.current = None;
        self.events.clear();
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
            .as_ref()
            .and_then(|id| self.visible_index.get(id).copied())
    }

    pub fn current_node(&self) -> Option<&TreeNode> {
        self.current_index()
            .map(|i| self.forest.node(&self.visible[i]))
    }

    pub fn visible_nodes(&self) -> &[VisibleNode] {
        &self.visible
    }

    pub fn visible_ids(&self) -> Vec<&str> {
        self.visible.iter().map(|v| v.id.as_str()).collect()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.visible_index.get(id).copied()
    }

    pub fn expanded(&self) -> &ExpandedIds {
        &self.expanded
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    /// The tree node a visible entry was flattened from.
    pub fn node(&self, visible: &VisibleNode) -> &TreeNode {
        self.forest.node(visible)
    }

    /// Take the transitions recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<NavEvent> {
        std::mem::take(&mut self.events)
    }

    fn set_current(&mut self, id: String) {
        if self.current.as_deref() == Some(id.as_str()) {
            return;
        }
        log::debug!("[nav] selection {:?} -> {}", self.current, id);
        self.callbacks.selection(&self.forest, Some(&id));
        self.events.push(NavEvent::SelectionChanged {
            id: Some(id.clone()),
        });
        self.current = Some(id);
    }

    fn select_index(&mut self, index: usize) {
        if let Some(node) = self.visible.get(index) {
            let id = node.id.clone();
            self.set_current(id);
        }
    }

    /// Drop the selection. Returns whether anything was selected.
    fn clear_current(&mut self) -> bool {
        let Some(previous) = self.current.take() else {
            return false;
        };
        log::debug!("[nav] selection {previous} -> none");
        self.callbacks.selection(&self.forest, None);
        true
    }

    fn set_expanded(&mut self, id: &str, expanded: bool) {
        if !self.forest.contains(id) {
            log::trace!("[nav] ignoring expansion of unknown node {id}");
            return;
        }
        let next = if expanded {
            self.expanded.with(id)
        } else {
            self.expanded.without(id)
        };
        if next.ptr_eq(&self.expanded) {
            return;
        }
        log::debug!("[nav] {} {id}", if expanded { "expand" } else { "collapse" });
        self.expanded = next;
        self.recompute();
        self.callbacks.expansion(id, expanded);
        self.events.push(NavEvent::ExpansionChanged {
            id: id.to_string(),
            expanded,
        });
    }

    fn recompute(&mut self) {
        self.visible = self.forest.flatten_visible(&self.expanded);
        self.visible_index = self
            .visible
            .iter()
            .enumerate()
            .map(|(i, v)| (v.id.clone(), i))
            .collect();
        log::trace!("[nav] {} visible nodes", self.visible.len());

        let still_visible = self
            .current
            .as_ref()
            .is_none_or(|id| self.visible_index.contains_key(id));
        if !still_visible && self.clear_current() {
            self.events.push(NavEvent::SelectionChanged { id: None });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_ids_are_ignored() {
        let mut nav = NavigationController::default();
        nav.set_tree(vec![TreeNode::word("w", "w")], ExpandedIds::new());
        nav.expand("missing");
        nav.select("missing");
        assert!(nav.expanded().is_empty());
        assert_eq!(nav.current_id(), None);
        assert!(nav.drain_events().is_empty());
    }

    #[test]
    fn childless_prefix_still_enters_the_expansion_set() {
        let mut nav = NavigationController::default();
        nav.set_tree(vec![TreeNode::prefix("p", "p")], ExpandedIds::new());
        nav.expand("p");
        nav.expand("p");
        assert!(nav.expanded().contains("p"));
        assert_eq!(nav.visible_ids(), ["p"]);
        assert_eq!(nav.drain_events().len(), 1);
    }
}
