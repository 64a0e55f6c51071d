//! Keeps element focus and tab indices in line with the logical selection.
//!
//! In [`InteractionMode::Focus`] the tree uses a roving tab index: one item
//! is tabbable and element focus follows the selection. In
//! [`InteractionMode::Browse`] every item is tabbable so a screen reader's
//! virtual cursor can walk them, and focus is never moved programmatically.

mod trap;

pub use trap::{FocusTrap, TrapOptions};

use crate::aria::item_element_id;
use crate::dom::{collect_with_role, Document, Role};
use crate::event::FocusEvent;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InteractionMode {
    #[default]
    Focus,
    Browse,
}

/// How the interaction mode is chosen.
///
/// There is no reliable platform signal for screen-reader browse mode, so
/// inference is opt-in and embedders that know better should pin the mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModePolicy {
    /// Always use this mode; focus events never change it.
    Fixed(InteractionMode),
    /// Keyboard-marked focus events select focus mode, unmarked ones browse
    /// mode.
    #[default]
    InferFromEvent,
}

#[derive(Debug, Default)]
pub struct FocusCoordinator {
    policy: ModePolicy,
    mode: InteractionMode,
}

impl FocusCoordinator {
    pub fn new(policy: ModePolicy) -> Self {
        let mode = match policy {
            ModePolicy::Fixed(mode) => mode,
            ModePolicy::InferFromEvent => InteractionMode::Focus,
        };
        Self { policy, mode }
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn policy(&self) -> ModePolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: ModePolicy) {
        self.policy = policy;
        if let ModePolicy::Fixed(mode) = policy {
            self.mode = mode;
        }
    }

    /// Classify a focus event. Returns the new mode if it changed.
    pub fn on_focus(&mut self, event: &FocusEvent) -> Option<InteractionMode> {
        if self.policy != ModePolicy::InferFromEvent {
            return None;
        }
        let mode = if event.from_keyboard {
            InteractionMode::Focus
        } else {
            InteractionMode::Browse
        };
        if mode == self.mode {
            return None;
        }
        log::debug!("[focus] mode {:?} -> {:?} (target {})", self.mode, mode, event.target);
        self.mode = mode;
        Some(mode)
    }

    /// Assign tab indices to every tree item under `tree_id`.
    ///
    /// Focus mode: the current item gets 0 and all others -1. With no
    /// current item rendered, the first one gets 0 so the tree stays
    /// reachable with Tab. Browse mode: every item gets 0.
    pub fn apply_tab_indices(&self, doc: &mut Document, tree_id: &str, current: Option<&str>) {
        let Some(tree) = doc.get(tree_id) else {
            return;
        };
        let items = collect_with_role(tree, Role::TreeItem);
        if items.is_empty() {
            return;
        }

        match self.mode {
            InteractionMode::Browse => {
                for id in &items {
                    doc.set_tab_index(id, 0);
                }
            }
            InteractionMode::Focus => {
                let current = current.map(|id| item_element_id(tree_id, id));
                let roving = current
                    .filter(|id| items.contains(id))
                    .unwrap_or_else(|| items[0].clone());
                for id in &items {
                    doc.set_tab_index(id, if *id == roving { 0 } else { -1 });
                }
            }
        }
    }

    /// Move element focus to the current item. Only acts in focus mode.
    ///
    /// Returns true if focus moved. A failure (the element was detached) is
    /// logged and otherwise ignored.
    pub fn sync_focus(&self, doc: &mut Document, tree_id: &str, current: Option<&str>) -> bool {
        if self.mode != InteractionMode::Focus {
            return false;
        }
        let Some(current) = current else {
            return false;
        };
        let target = item_element_id(tree_id, current);
        if doc.active_element() == Some(target.as_str()) {
            return false;
        }
        focus_or_warn(doc, &target)
    }
}

/// Focus `id`, logging instead of failing.
pub(crate) fn focus_or_warn(doc: &mut Document, id: &str) -> bool {
    match doc.focus(id) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("[focus] could not focus {id}: {e}");
            false
        }
    }
}
