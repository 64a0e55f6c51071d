//! Decorative expand/collapse and highlight animations.
//!
//! Each tree view owns its own [`TransitionManager`]. Animations never gate
//! state: the expansion change is already applied when an animation starts,
//! and an animator failure just means the change shows up instantly.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::error::AnimationError;

/// Configuration for a single transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionConfig {
    pub duration: Duration,
    pub easing: Easing,
}

impl TransitionConfig {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self::new(Duration::from_millis(150), Easing::EaseOut)
    }
}

/// Easing function for transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Apply easing to progress (0.0 to 1.0).
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// What is being animated on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    Expand,
    Collapse,
    Highlight,
}

/// Host hook that actually drives an animation (a terminal effect, a CSS
/// transition). May fail at any time.
pub trait Animator {
    fn begin(
        &mut self,
        node_id: &str,
        kind: TransitionKind,
        config: &TransitionConfig,
    ) -> Result<(), AnimationError>;
}

/// Animator that accepts everything and draws nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAnimator;

impl Animator for NoopAnimator {
    fn begin(&mut self, _: &str, _: TransitionKind, _: &TransitionConfig) -> Result<(), AnimationError> {
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct ActiveTransition {
    start: Instant,
    config: TransitionConfig,
}

pub struct TransitionManager {
    config: TransitionConfig,
    /// Reduced motion flag - when true, transitions complete instantly.
    reduced_motion: bool,
    active: HashMap<(String, TransitionKind), ActiveTransition>,
    animator: Box<dyn Animator>,
}

impl std::fmt::Debug for TransitionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionManager")
            .field("config", &self.config)
            .field("reduced_motion", &self.reduced_motion)
            .field("active", &self.active.len())
            .finish()
    }
}

impl Default for TransitionManager {
    fn default() -> Self {
        Self::new(TransitionConfig::default())
    }
}

impl TransitionManager {
    pub fn new(config: TransitionConfig) -> Self {
        Self {
            config,
            reduced_motion: false,
            active: HashMap::new(),
            animator: Box::new(NoopAnimator),
        }
    }

    pub fn with_animator(mut self, animator: impl Animator + 'static) -> Self {
        self.animator = Box::new(animator);
        self
    }

    pub fn set_animator(&mut self, animator: impl Animator + 'static) {
        self.animator = Box::new(animator);
    }

    /// Enable or disable reduced motion (accessibility).
    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.reduced_motion = enabled;
        if enabled {
            self.active.clear();
        }
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Returns true if any transition is currently active.
    pub fn has_active_transitions(&self) -> bool {
        !self.active.is_empty()
    }

    /// Start animating `kind` on `node_id`. Returns false when the change is
    /// shown instantly instead: reduced motion, zero duration, or the
    /// animator failed.
    pub fn start(&mut self, node_id: &str, kind: TransitionKind, now: Instant) -> bool {
        let key = (node_id.to_string(), kind);
        self.active.remove(&key);
        if self.reduced_motion || self.config.duration.is_zero() {
            return false;
        }
        // expand and collapse of the same node replace each other
        let opposite = match kind {
            TransitionKind::Expand => Some(TransitionKind::Collapse),
            TransitionKind::Collapse => Some(TransitionKind::Expand),
            TransitionKind::Highlight => None,
        };
        if let Some(opposite) = opposite {
            self.active.remove(&(node_id.to_string(), opposite));
        }

        match self.animator.begin(node_id, kind, &self.config) {
            Ok(()) => {
                self.active.insert(
                    key,
                    ActiveTransition {
                        start: now,
                        config: self.config,
                    },
                );
                true
            }
            Err(e) => {
                log::warn!("[transitions] {e}; applying {kind:?} on {node_id} instantly");
                false
            }
        }
    }

    /// Eased progress in `0.0..=1.0` of an in-flight transition, `None` when
    /// nothing is animating (the end state should be drawn).
    pub fn progress(&self, node_id: &str, kind: TransitionKind, now: Instant) -> Option<f32> {
        let active = self.active.get(&(node_id.to_string(), kind))?;
        let elapsed = now.saturating_duration_since(active.start);
        if elapsed >= active.config.duration {
            return None;
        }
        let t = elapsed.as_secs_f32() / active.config.duration.as_secs_f32();
        Some(active.config.easing.apply(t))
    }

    /// Prune completed transitions.
    pub fn tick(&mut self, now: Instant) {
        self.active
            .retain(|_, t| now.saturating_duration_since(t.start) < t.config.duration);
    }

    pub fn cancel_all(&mut self) {
        self.active.clear();
    }
}
