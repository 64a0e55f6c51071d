//! Tree view configuration.

use std::time::Duration;

use crate::announce::DEFAULT_ANNOUNCE_DELAY;
use crate::focus::ModePolicy;
use crate::transitions::TransitionConfig;
use crate::window::DEFAULT_OVERSCAN;

/// Per-view configuration.
///
/// Item and container heights must be positive; this is not checked.
#[derive(Debug, Clone)]
pub struct TreeViewConfig {
    /// Element id of the tree container; item ids are derived from it.
    pub id: String,
    /// `aria-label` of the tree.
    pub label: String,
    /// Usage text referenced by `aria-describedby`.
    pub instructions: String,
    pub item_height: u32,
    pub container_height: u32,
    pub overscan: usize,
    pub announce_delay: Duration,
    pub mode_policy: ModePolicy,
    pub transition: TransitionConfig,
    pub reduced_motion: bool,
}

impl Default for TreeViewConfig {
    fn default() -> Self {
        Self {
            id: "suggestions".to_string(),
            label: "Search suggestions".to_string(),
            instructions: "Use the arrow keys to move between suggestions. \
                Right expands a group, Left collapses it or moves to the parent group. \
                Enter selects a word. Escape clears the selection."
                .to_string(),
            item_height: 1,
            container_height: 20,
            overscan: DEFAULT_OVERSCAN,
            announce_delay: DEFAULT_ANNOUNCE_DELAY,
            mode_policy: ModePolicy::default(),
            transition: TransitionConfig::default(),
            reduced_motion: false,
        }
    }
}

impl TreeViewConfig {
    /// Create a new config with the given container id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    /// Row height and viewport height, in the same unit (rows, pixels).
    pub fn dimensions(mut self, item_height: u32, container_height: u32) -> Self {
        self.item_height = item_height;
        self.container_height = container_height;
        self
    }

    pub fn overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn announce_delay(mut self, delay: Duration) -> Self {
        self.announce_delay = delay;
        self
    }

    pub fn mode_policy(mut self, policy: ModePolicy) -> Self {
        self.mode_policy = policy;
        self
    }

    pub fn transition(mut self, transition: TransitionConfig) -> Self {
        self.transition = transition;
        self
    }

    pub fn reduced_motion(mut self, enabled: bool) -> Self {
        self.reduced_motion = enabled;
        self
    }
}
