//! Headless element tree standing in for the host surface.
//!
//! Embedders mirror this tree onto whatever they draw to (a terminal buffer,
//! a browser DOM). Focus is tracked on the [`Document`], and focusing an
//! element that is no longer attached fails with [`DomError::Detached`].

mod element;

pub use element::{collect_tabbable, collect_with_role, find_element, find_element_mut, Element, Role};

use crate::error::DomError;

/// Tracks which element is currently focused.
#[derive(Debug, Clone, Default)]
pub struct Document {
    root: Element,
    active: Option<String>,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self { root, active: None }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Swap in a freshly rendered tree. Focus survives if its element is
    /// still attached.
    pub fn replace_root(&mut self, root: Element) {
        self.root = root;
        if let Some(active) = &self.active {
            if find_element(&self.root, active).is_none() {
                log::debug!("[dom] focused element {active} detached by render");
                self.active = None;
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        find_element(&self.root, id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        find_element_mut(&mut self.root, id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Get the currently focused element ID.
    pub fn active_element(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Move focus to `id`.
    pub fn focus(&mut self, id: &str) -> Result<(), DomError> {
        let element = self
            .get(id)
            .ok_or_else(|| DomError::Detached(id.to_string()))?;
        if !element.is_focusable() {
            return Err(DomError::NotFocusable(id.to_string()));
        }
        self.active = Some(id.to_string());
        Ok(())
    }

    /// Clear focus.
    /// Returns true if there was something focused.
    pub fn blur(&mut self) -> bool {
        self.active.take().is_some()
    }

    /// Remove an element (and its subtree) from the document.
    pub fn remove(&mut self, id: &str) -> Option<Element> {
        let removed = remove_recursive(&mut self.root, id)?;
        if let Some(active) = &self.active {
            if find_element(&removed, active).is_some() {
                self.active = None;
            }
        }
        Some(removed)
    }

    pub fn set_tab_index(&mut self, id: &str, tab_index: i32) -> bool {
        match self.get_mut(id) {
            Some(el) => {
                el.tab_index = Some(tab_index);
                true
            }
            None => false,
        }
    }

    /// Tabbable descendants of `container` (inclusive), in tree order.
    pub fn tabbable_within(&self, container: &str) -> Vec<String> {
        self.get(container).map(collect_tabbable).unwrap_or_default()
    }

    /// Whether `id` is `container` or one of its descendants.
    pub fn is_within(&self, container: &str, id: &str) -> bool {
        self.get(container)
            .is_some_and(|c| find_element(c, id).is_some())
    }

    /// Focus the next tabbable element (Tab navigation), wrapping at the end.
    /// Returns the newly focused element ID if focus changed.
    pub fn focus_next(&mut self) -> Option<String> {
        self.step_focus(true)
    }

    /// Focus the previous tabbable element (Shift+Tab navigation).
    pub fn focus_prev(&mut self) -> Option<String> {
        self.step_focus(false)
    }

    fn step_focus(&mut self, forward: bool) -> Option<String> {
        let tabbable = collect_tabbable(&self.root);
        if tabbable.is_empty() {
            return None;
        }
        let last = tabbable.len() - 1;
        let position = self
            .active
            .as_ref()
            .and_then(|current| tabbable.iter().position(|id| id == current));
        let next = match (position, forward) {
            (None, true) => 0,
            (None, false) => last,
            (Some(i), true) => (i + 1) % tabbable.len(),
            (Some(0), false) => last,
            (Some(i), false) => i - 1,
        };
        let new_focus = tabbable[next].clone();
        if self.active.as_ref() == Some(&new_focus) {
            return None;
        }
        self.active = Some(new_focus.clone());
        Some(new_focus)
    }
}

fn remove_recursive(element: &mut Element, id: &str) -> Option<Element> {
    if let Some(pos) = element.children.iter().position(|c| c.id == id) {
        return Some(element.children.remove(pos));
    }
    element
        .children
        .iter_mut()
        .find_map(|child| remove_recursive(child, id))
}
