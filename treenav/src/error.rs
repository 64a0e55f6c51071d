use thiserror::Error;

/// Failures from the headless element tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// The element was removed from (or never attached to) the document.
    #[error("element '{0}' is not attached to the document")]
    Detached(String),

    /// The element exists but has no tab index or is disabled.
    #[error("element '{0}' cannot receive focus")]
    NotFocusable(String),
}

/// Failures reported by an [`Animator`](crate::transitions::Animator).
///
/// Always recovered from: the state change is applied without animation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnimationError {
    #[error("animation for '{id}' was rejected: {reason}")]
    Rejected { id: String, reason: String },

    #[error("animation target '{0}' is gone")]
    TargetMissing(String),
}
