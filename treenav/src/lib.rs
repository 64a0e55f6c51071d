//! Keyboard-navigable, virtualized, accessible tree of search suggestions.
//!
//! The crate is headless: it keeps the navigation state machine, the
//! virtual-scroll window and the focus/ARIA bookkeeping consistent, and
//! exposes an element tree ([`dom::Document`]) for the host to mirror.

pub mod announce;
pub mod aria;
pub mod config;
pub mod dom;
pub mod error;
pub mod event;
pub mod focus;
pub mod nav;
pub mod transitions;
pub mod tree;
pub mod view;
pub mod window;

pub use announce::{DebouncedAnnouncer, LiveRegion, RecordingRegion};
pub use config::TreeViewConfig;
pub use dom::{Document, Element, Role};
pub use error::{AnimationError, DomError};
pub use event::{FocusEvent, Key, KeyEvent, Modifiers};
pub use focus::{FocusCoordinator, FocusTrap, InteractionMode, ModePolicy, TrapOptions};
pub use nav::{NavCallbacks, NavEvent, NavigationController};
pub use transitions::{Animator, Easing, TransitionConfig, TransitionKind, TransitionManager};
pub use tree::{ExpandedIds, Forest, NodeKind, TreeNode, VisibleNode, WordMeta};
pub use view::{Row, TreeView};
pub use window::{RenderedWindow, VirtualWindow};
