//! Builds the accessible element tree for the rendered window.
//!
//! UI state (selected, focused, expanded) is looked up per id while
//! rendering instead of being baked into a copy of the forest.

use crate::dom::{Element, Role};
use crate::nav::NavigationController;
use crate::tree::{ExpandedIds, VisibleNode};
use crate::window::VirtualWindow;

/// Per-item UI state resolved at render time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemState {
    pub selected: bool,
    pub focused: bool,
    pub expanded: bool,
}

/// Id-keyed lookup of [`ItemState`] over the live navigation state.
#[derive(Debug, Clone, Copy)]
pub struct ItemStates<'a> {
    pub current: Option<&'a str>,
    pub focused: Option<&'a str>,
    pub expanded: &'a ExpandedIds,
}

impl ItemStates<'_> {
    pub fn get(&self, id: &str) -> ItemState {
        ItemState {
            selected: self.current == Some(id),
            focused: self.focused == Some(id),
            expanded: self.expanded.contains(id),
        }
    }
}

/// Labels for the tree container.
#[derive(Debug, Clone)]
pub struct TreeLabels<'a> {
    pub tree_id: &'a str,
    pub label: &'a str,
    pub instructions: &'a str,
}

/// Element id of the row rendering node `node_id`.
pub fn item_element_id(tree_id: &str, node_id: &str) -> String {
    format!("{tree_id}/item/{node_id}")
}

/// Node id back from an item element id, if it belongs to `tree_id`.
pub fn node_id_of<'a>(tree_id: &str, element_id: &'a str) -> Option<&'a str> {
    element_id
        .strip_prefix(tree_id)
        .and_then(|rest| rest.strip_prefix("/item/"))
}

pub fn instructions_id(tree_id: &str) -> String {
    format!("{tree_id}/instructions")
}

pub fn spacer_id(tree_id: &str) -> String {
    format!("{tree_id}/spacer")
}

pub fn rows_id(tree_id: &str) -> String {
    format!("{tree_id}/rows")
}

/// Render the tree container for the current window.
///
/// Every item starts at `tabIndex = -1`; the focus coordinator decides which
/// ones become tabbable.
pub fn render_tree(
    labels: &TreeLabels<'_>,
    nav: &NavigationController,
    window: &VirtualWindow,
    focused: Option<&str>,
) -> Element {
    let states = ItemStates {
        current: nav.current_id(),
        focused,
        expanded: nav.expanded(),
    };
    let rendered = window.render(nav.visible_nodes(), |visible, index| {
        render_item(labels.tree_id, nav, visible, index, states.get(&visible.id))
    });

    let rows = Element::new(rows_id(labels.tree_id))
        .role(Role::Group)
        .attr("data-offset-y", rendered.offset_y)
        .attr("data-start-index", rendered.start_index)
        .children(rendered.rows);

    Element::new(labels.tree_id)
        .role(Role::Tree)
        .attr("aria-label", labels.label)
        .attr("aria-describedby", instructions_id(labels.tree_id))
        .child(
            Element::new(instructions_id(labels.tree_id))
                .role(Role::Note)
                .hidden(true)
                .text(labels.instructions),
        )
        .child(Element::new(spacer_id(labels.tree_id)).attr("data-height", rendered.total_height))
        .child(rows)
}

fn render_item(
    tree_id: &str,
    nav: &NavigationController,
    visible: &VisibleNode,
    index: usize,
    state: ItemState,
) -> Element {
    let node = nav.node(visible);
    let mut item = Element::new(item_element_id(tree_id, &visible.id))
        .role(Role::TreeItem)
        .tab_index(-1)
        .text(node.content.clone())
        .attr("aria-level", visible.depth + 1)
        .attr("aria-selected", state.selected)
        .attr("aria-setsize", visible.set_size)
        .attr("aria-posinset", visible.pos_in_set)
        .attr("data-node-id", &visible.id)
        .attr("data-kind", node.kind.as_str())
        .attr("data-index", index);
    if visible.has_children {
        item = item.attr("aria-expanded", state.expanded);
    }
    if state.focused {
        item = item.attr("data-focused", true);
    }
    item
}
