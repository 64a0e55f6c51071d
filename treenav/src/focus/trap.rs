use crate::dom::Document;
use crate::event::{Key, KeyEvent};

use super::focus_or_warn;

/// Behaviour switches for a [`FocusTrap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrapOptions {
    /// Restore the element focused before activation when deactivating.
    pub return_focus_on_deactivate: bool,
    /// Escape deactivates the trap.
    pub escape_deactivates: bool,
    /// Clicks outside the container pass through instead of being swallowed.
    pub allow_outside_click: bool,
}

impl Default for TrapOptions {
    fn default() -> Self {
        Self {
            return_focus_on_deactivate: true,
            escape_deactivates: true,
            allow_outside_click: false,
        }
    }
}

impl TrapOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn return_focus(mut self, enabled: bool) -> Self {
        self.return_focus_on_deactivate = enabled;
        self
    }

    pub fn escape_deactivates(mut self, enabled: bool) -> Self {
        self.escape_deactivates = enabled;
        self
    }

    pub fn allow_outside_click(mut self, enabled: bool) -> Self {
        self.allow_outside_click = enabled;
        self
    }
}

/// Keeps Tab navigation inside a container.
///
/// Tab on the last tabbable descendant wraps to the first, Shift+Tab on the
/// first wraps to the last. Keys the trap does not intercept should get the
/// embedder's default handling.
#[derive(Debug)]
pub struct FocusTrap {
    container: String,
    options: TrapOptions,
    previous_focus: Option<String>,
    active: bool,
}

impl FocusTrap {
    /// Install a trap on `container`, remembering the currently focused
    /// element and moving focus to the first tabbable descendant if focus is
    /// outside. With nothing tabbable inside, the trap is installed but inert.
    pub fn activate(doc: &mut Document, container: impl Into<String>, options: TrapOptions) -> Self {
        let container = container.into();
        let previous_focus = doc.active_element().map(str::to_string);
        log::debug!("[trap] activate on {container} (previous focus {previous_focus:?})");

        let inside = previous_focus
            .as_deref()
            .is_some_and(|id| doc.is_within(&container, id));
        if !inside {
            if let Some(first) = doc.tabbable_within(&container).first() {
                focus_or_warn(doc, first);
            }
        }

        Self {
            container,
            options,
            previous_focus,
            active: true,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn options(&self) -> TrapOptions {
        self.options
    }

    /// Returns true if the key was consumed by the trap.
    pub fn handle_key(&mut self, doc: &mut Document, event: &KeyEvent) -> bool {
        if !self.active {
            return false;
        }

        if event.key == Key::Escape && self.options.escape_deactivates {
            self.deactivate(doc);
            return true;
        }

        let forward = if event.is_forward_tab() {
            true
        } else if event.is_back_tab() {
            false
        } else {
            return false;
        };

        let tabbable = doc.tabbable_within(&self.container);
        let (Some(first), Some(last)) = (tabbable.first(), tabbable.last()) else {
            return false;
        };
        let active = doc.active_element();
        let outside = active.is_none_or(|id| !tabbable.iter().any(|t| t == id));

        let target = if forward && (outside || active == Some(last.as_str())) {
            first
        } else if !forward && (outside || active == Some(first.as_str())) {
            last
        } else {
            return false;
        };
        let target = target.clone();
        focus_or_warn(doc, &target);
        true
    }

    /// Whether a click on `target` should be let through.
    pub fn allows_click(&self, doc: &Document, target: &str) -> bool {
        !self.active || self.options.allow_outside_click || doc.is_within(&self.container, target)
    }

    /// Remove the trap, restoring prior focus if configured. Safe to call
    /// more than once.
    pub fn deactivate(&mut self, doc: &mut Document) {
        if !self.active {
            return;
        }
        self.active = false;
        log::debug!("[trap] deactivate on {}", self.container);
        if self.options.return_focus_on_deactivate {
            if let Some(previous) = self.previous_focus.take() {
                focus_or_warn(doc, &previous);
            }
        }
    }
}
