//! One tree view: navigation, windowing, focus and announcements wired
//! together.
//!
//! Every input is applied synchronously: the controller transitions, the
//! visible list is re-derived, the window follows the selection, the
//! element tree is re-rendered, focus is synced, and an announcement is
//! scheduled. Only the announcement delivery and decorative transitions are
//! time based; drive them with [`TreeView::poll`].

use std::time::Instant;

use crate::announce::message::{describe_activation, describe_expansion, describe_node, SELECTION_CLEARED};
use crate::announce::{DebouncedAnnouncer, LiveRegion};
use crate::aria::{self, ItemState, ItemStates, TreeLabels};
use crate::config::TreeViewConfig;
use crate::dom::Document;
use crate::event::{FocusEvent, Key, KeyEvent};
use crate::focus::{FocusCoordinator, FocusTrap, TrapOptions};
use crate::nav::{NavCallbacks, NavEvent, NavigationController};
use crate::transitions::{Animator, TransitionKind, TransitionManager};
use crate::tree::{ExpandedIds, TreeNode, VisibleNode};
use crate::window::VirtualWindow;

/// A rendered row of the current window.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    /// Absolute index in the visible list.
    pub index: usize,
    pub visible: &'a VisibleNode,
    pub node: &'a TreeNode,
    pub state: ItemState,
}

#[derive(Debug)]
pub struct TreeView<R: LiveRegion> {
    config: TreeViewConfig,
    nav: NavigationController,
    window: VirtualWindow,
    focus: FocusCoordinator,
    trap: Option<FocusTrap>,
    announcer: DebouncedAnnouncer<R>,
    transitions: TransitionManager,
    document: Document,
    mounted: bool,
}

impl<R: LiveRegion> TreeView<R> {
    pub fn new(config: TreeViewConfig, callbacks: NavCallbacks, region: R) -> Self {
        let window = VirtualWindow::new(config.item_height, config.container_height)
            .with_overscan(config.overscan);
        let mut transitions = TransitionManager::new(config.transition);
        transitions.set_reduced_motion(config.reduced_motion);

        let mut view = Self {
            nav: NavigationController::new(callbacks),
            window,
            focus: FocusCoordinator::new(config.mode_policy),
            trap: None,
            announcer: DebouncedAnnouncer::new(region, config.announce_delay),
            transitions,
            document: Document::default(),
            mounted: true,
            config,
        };
        view.render();
        view
    }

    pub fn with_animator(mut self, animator: impl Animator + 'static) -> Self {
        self.transitions.set_animator(animator);
        self
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    pub fn set_tree(&mut self, roots: Vec<TreeNode>, expanded: ExpandedIds, now: Instant) {
        if !self.mounted {
            return;
        }
        self.nav.set_tree(roots, expanded);
        self.after_update(now);
    }

    /// Returns true if the key was consumed.
    pub fn handle_key(&mut self, event: &KeyEvent, now: Instant) -> bool {
        if !self.mounted {
            return false;
        }
        let mut trapped = false;
        if let Some(trap) = self.trap.as_mut() {
            trapped = trap.handle_key(&mut self.document, event);
            if !trap.is_active() {
                self.trap = None;
            }
            // Tab wraps stop here; Escape still reaches the tree
            if trapped && event.key != Key::Escape {
                return true;
            }
        }
        let consumed = self.nav.handle_key(event);
        if consumed {
            self.after_update(now);
        }
        consumed || trapped
    }

    pub fn select(&mut self, id: &str, now: Instant) {
        self.nav.select(id);
        self.after_update(now);
    }

    pub fn expand(&mut self, id: &str, now: Instant) {
        self.nav.expand(id);
        self.after_update(now);
    }

    pub fn collapse(&mut self, id: &str, now: Instant) {
        self.nav.collapse(id);
        self.after_update(now);
    }

    pub fn toggle_expansion(&mut self, id: &str, now: Instant) {
        self.nav.toggle_expansion(id);
        self.after_update(now);
    }

    /// Scroll event from the host.
    pub fn scroll_to(&mut self, scroll_top: u32) {
        self.window.scroll_to(scroll_top);
        self.render();
    }

    pub fn resize(&mut self, container_height: u32) {
        self.window.set_container_height(container_height);
        self.render();
    }

    /// Focus landed on `event.target`. Updates the interaction mode and, if
    /// the target is one of this tree's items, moves the selection there.
    pub fn handle_focus_event(&mut self, event: &FocusEvent, now: Instant) {
        if !self.mounted {
            return;
        }
        self.focus.on_focus(event);
        if let Err(e) = self.document.focus(&event.target) {
            log::warn!("[view] focus event for unusable element: {e}");
        }
        let node_id = aria::node_id_of(&self.config.id, &event.target).map(str::to_string);
        if let Some(node_id) = node_id {
            self.nav.select(&node_id);
        }
        self.after_update(now);
    }

    /// Click on `target`. Returns true if it selected a tree item.
    pub fn handle_click(&mut self, target: &str, now: Instant) -> bool {
        if !self.mounted {
            return false;
        }
        if let Some(trap) = &self.trap {
            if !trap.allows_click(&self.document, target) {
                log::debug!("[view] click on {target} blocked by focus trap");
                return false;
            }
        }
        let Some(node_id) = aria::node_id_of(&self.config.id, target).map(str::to_string) else {
            return false;
        };
        self.nav.select(&node_id);
        self.after_update(now);
        true
    }

    /// Trap Tab navigation inside the tree container.
    pub fn activate_trap(&mut self, options: TrapOptions) {
        if let Some(mut previous) = self.trap.take() {
            previous.deactivate(&mut self.document);
        }
        self.trap = Some(FocusTrap::activate(
            &mut self.document,
            self.config.id.clone(),
            options,
        ));
    }

    pub fn deactivate_trap(&mut self) {
        if let Some(mut trap) = self.trap.take() {
            trap.deactivate(&mut self.document);
        }
    }

    /// Deliver due announcements and prune finished transitions.
    /// Returns true if something was announced.
    pub fn poll(&mut self, now: Instant) -> bool {
        self.transitions.tick(now);
        self.announcer.flush_due(now)
    }

    /// Earliest instant at which [`TreeView::poll`] has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.announcer.next_deadline()
    }

    /// Tear down: reset navigation, release the trap, drop pending work.
    /// Runs once; later calls (including the one from `Drop`) do nothing.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        log::debug!("[view] unmount {}", self.config.id);
        self.nav.reset();
        self.deactivate_trap();
        self.announcer.cancel();
        self.transitions.cancel_all();
        self.document.blur();
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn config(&self) -> &TreeViewConfig {
        &self.config
    }

    pub fn nav(&self) -> &NavigationController {
        &self.nav
    }

    pub fn window(&self) -> &VirtualWindow {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn focus(&self) -> &FocusCoordinator {
        &self.focus
    }

    pub fn trap(&self) -> Option<&FocusTrap> {
        self.trap.as_ref()
    }

    pub fn announcer(&self) -> &DebouncedAnnouncer<R> {
        &self.announcer
    }

    pub fn region(&self) -> &R {
        self.announcer.region()
    }

    pub fn transitions(&self) -> &TransitionManager {
        &self.transitions
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Rows of the current window with their resolved UI state.
    pub fn rows(&self) -> Vec<Row<'_>> {
        let Some(range) = self.window.range() else {
            return Vec::new();
        };
        let states = ItemStates {
            current: self.nav.current_id(),
            focused: self
                .document
                .active_element()
                .and_then(|id| aria::node_id_of(&self.config.id, id)),
            expanded: self.nav.expanded(),
        };
        let visible = self.nav.visible_nodes();
        range
            .filter_map(|index| {
                let v = visible.get(index)?;
                Some(Row {
                    index,
                    visible: v,
                    node: self.nav.node(v),
                    state: states.get(&v.id),
                })
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn after_update(&mut self, now: Instant) {
        for event in self.nav.drain_events() {
            if let Some(message) = self.react(&event, now) {
                self.announcer.request(message, now);
            }
        }

        self.window.set_len(self.nav.visible_nodes().len());
        if let Some(index) = self.nav.current_index() {
            self.window.ensure_visible(index);
        }
        self.render();
    }

    /// Start transitions for `event` and compose its announcement.
    fn react(&mut self, event: &NavEvent, now: Instant) -> Option<String> {
        match event {
            NavEvent::SelectionChanged { id: Some(id) } => {
                self.transitions.start(id, TransitionKind::Highlight, now);
                let index = self.nav.index_of(id)?;
                let visible = &self.nav.visible_nodes()[index];
                Some(describe_node(self.nav.node(visible), visible))
            }
            NavEvent::SelectionChanged { id: None } | NavEvent::SelectionCleared => {
                Some(SELECTION_CLEARED.to_string())
            }
            NavEvent::ExpansionChanged { id, expanded } => {
                let kind = if *expanded {
                    TransitionKind::Expand
                } else {
                    TransitionKind::Collapse
                };
                self.transitions.start(id, kind, now);
                let node = self.nav.forest().get(id)?;
                Some(describe_expansion(node, *expanded))
            }
            NavEvent::WordActivated { id } => {
                let node = self.nav.forest().get(id)?;
                Some(describe_activation(node))
            }
        }
    }

    fn render(&mut self) {
        let labels = TreeLabels {
            tree_id: &self.config.id,
            label: &self.config.label,
            instructions: &self.config.instructions,
        };
        let focused = self
            .document
            .active_element()
            .and_then(|id| aria::node_id_of(&self.config.id, id))
            .map(str::to_string);
        let root = aria::render_tree(&labels, &self.nav, &self.window, focused.as_deref());
        self.document.replace_root(root);

        let current = self.nav.current_id();
        self.focus
            .apply_tab_indices(&mut self.document, &self.config.id, current);
        self.focus
            .sync_focus(&mut self.document, &self.config.id, current);
    }
}

impl<R: LiveRegion> Drop for TreeView<R> {
    fn drop(&mut self) {
        self.unmount();
    }
}
