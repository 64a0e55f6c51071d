use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use treenav::aria::item_element_id;
use treenav::{
    AnimationError, Animator, ExpandedIds, FocusEvent, InteractionMode, Key, KeyEvent, NavCallbacks,
    RecordingRegion, Role, TransitionConfig, TransitionKind, TrapOptions, TreeNode, TreeView,
    TreeViewConfig,
};

fn tree() -> Vec<TreeNode> {
    vec![
        TreeNode::prefix("a", "a").children([
            TreeNode::word("apple", "apple").frequency(40),
            TreeNode::word("ant", "ant"),
        ]),
        TreeNode::word("banana", "banana"),
    ]
}

fn view(now: Instant) -> TreeView<RecordingRegion> {
    let config = TreeViewConfig::new("t").dimensions(1, 3).overscan(0);
    let mut view = TreeView::new(config, NavCallbacks::new(), RecordingRegion::default());
    view.set_tree(tree(), ExpandedIds::new(), now);
    view
}

fn press(view: &mut TreeView<RecordingRegion>, key: Key, now: Instant) -> bool {
    view.handle_key(&KeyEvent::new(key), now)
}

fn after(now: Instant, ms: u64) -> Instant {
    now + Duration::from_millis(ms)
}

#[test]
fn test_tree_container_attributes() {
    let now = Instant::now();
    let view = view(now);
    let root = view.document().root();
    assert_eq!(root.role, Some(Role::Tree));
    assert_eq!(root.get_attr("aria-label"), Some("Search suggestions"));
    let described_by = root.get_attr("aria-describedby").unwrap();
    let instructions = view.document().get(described_by).unwrap();
    assert!(instructions.hidden);
    assert!(instructions.text.is_some());
}

#[test]
fn test_item_attributes() {
    let now = Instant::now();
    let mut view = view(now);
    view.expand("a", now);
    view.select("ant", now);

    let a = view.document().get(&item_element_id("t", "a")).unwrap();
    assert_eq!(a.role, Some(Role::TreeItem));
    assert_eq!(a.get_attr("aria-level"), Some("1"));
    assert_eq!(a.get_attr("aria-expanded"), Some("true"));
    assert_eq!(a.get_attr("aria-selected"), Some("false"));
    assert_eq!(a.get_attr("aria-posinset"), Some("1"));
    assert_eq!(a.get_attr("aria-setsize"), Some("2"));

    let ant = view.document().get(&item_element_id("t", "ant")).unwrap();
    assert_eq!(ant.get_attr("aria-level"), Some("2"));
    assert_eq!(ant.get_attr("aria-expanded"), None);
    assert_eq!(ant.get_attr("aria-selected"), Some("true"));
    assert_eq!(ant.get_attr("aria-posinset"), Some("2"));
    assert_eq!(ant.tab_index, Some(0));
    assert_eq!(view.document().active_element(), Some(item_element_id("t", "ant").as_str()));
}

#[test]
fn test_keys_drive_selection_focus_and_window() {
    let now = Instant::now();
    let mut view = view(now);
    assert!(press(&mut view, Key::Home, now));
    assert!(press(&mut view, Key::Right, now));
    assert_eq!(view.nav().visible_ids(), ["a", "apple", "ant", "banana"]);
    assert_eq!(view.window().range(), Some(0..=3));
    assert_eq!(view.window().scroll_top(), 0);

    assert!(press(&mut view, Key::End, now));
    assert_eq!(view.nav().current_id(), Some("banana"));
    // selection left the 3-row viewport, so the window followed it
    assert_eq!(view.window().scroll_top(), 1);
    assert_eq!(view.window().range(), Some(1..=3));
    assert_eq!(
        view.document().active_element(),
        Some(item_element_id("t", "banana").as_str())
    );
    let rows: Vec<&str> = view.rows().iter().map(|r| r.node.id.as_str()).collect();
    assert_eq!(rows, ["apple", "ant", "banana"]);
    assert!(view.rows()[2].state.selected);
}

#[test]
fn test_rapid_keys_announce_only_final_state() {
    let now = Instant::now();
    let mut view = view(now);
    press(&mut view, Key::Down, now);
    press(&mut view, Key::Down, after(now, 10));
    assert!(!view.poll(after(now, 40)));
    assert!(view.poll(after(now, 80)));
    assert_eq!(
        view.region().messages,
        ["banana, word, 2 of 2, level 1"]
    );
}

#[test]
fn test_expansion_activation_and_clear_announcements() {
    let now = Instant::now();
    let mut view = view(now);
    press(&mut view, Key::Home, now);
    press(&mut view, Key::Right, now);
    view.poll(after(now, 100));

    press(&mut view, Key::Right, after(now, 200));
    press(&mut view, Key::Enter, after(now, 200));
    view.poll(after(now, 300));

    press(&mut view, Key::Escape, after(now, 400));
    view.poll(after(now, 500));
    press(&mut view, Key::Escape, after(now, 600));
    view.poll(after(now, 700));

    assert_eq!(
        view.region().messages,
        [
            "a expanded, 2 suggestions",
            "Selected apple",
            "Selection cleared",
            "Selection cleared",
        ]
    );
}

#[test]
fn test_focus_event_selects_item_and_switches_mode() {
    let now = Instant::now();
    let mut view = view(now);
    let banana = item_element_id("t", "banana");
    view.handle_focus_event(&FocusEvent::virtual_cursor(banana.clone()), now);

    assert_eq!(view.focus().mode(), InteractionMode::Browse);
    assert_eq!(view.nav().current_id(), Some("banana"));
    let tab_indices: Vec<_> = view
        .rows()
        .iter()
        .map(|r| view.document().get(&item_element_id("t", &r.node.id)).unwrap().tab_index)
        .collect();
    assert_eq!(tab_indices, [Some(0), Some(0)]);

    view.handle_focus_event(&FocusEvent::keyboard(banana), now);
    assert_eq!(view.focus().mode(), InteractionMode::Focus);
    let a = view.document().get(&item_element_id("t", "a")).unwrap();
    assert_eq!(a.tab_index, Some(-1));
}

#[test]
fn test_click_selects_item() {
    let now = Instant::now();
    let mut view = view(now);
    assert!(view.handle_click(&item_element_id("t", "banana"), now));
    assert_eq!(view.nav().current_id(), Some("banana"));
    assert!(!view.handle_click("elsewhere", now));
}

#[test]
fn test_escape_releases_trap_and_clears_selection() {
    let now = Instant::now();
    let mut view = view(now);
    view.select("banana", now);
    view.activate_trap(TrapOptions::default());
    assert!(press(&mut view, Key::Escape, now));
    assert!(view.trap().is_none());
    assert_eq!(view.nav().current_id(), None);
    view.poll(after(now, 100));
    assert_eq!(view.region().messages.last().map(String::as_str), Some("Selection cleared"));
}

#[test]
fn test_trap_keeps_escape_when_not_deactivating() {
    let now = Instant::now();
    let mut view = view(now);
    view.select("banana", now);
    view.activate_trap(TrapOptions::default().escape_deactivates(false));
    assert!(press(&mut view, Key::Escape, now));
    assert!(view.trap().is_some());
    assert_eq!(view.nav().current_id(), None);
}

#[test]
fn test_collapse_after_scrolling_still_renders_rows() {
    let now = Instant::now();
    let group = TreeNode::prefix("g", "g")
        .children((0..100).map(|i| TreeNode::word(format!("w{i}"), format!("w{i}"))));
    let roots = vec![group, TreeNode::word("z", "z")];
    let config = TreeViewConfig::new("t").dimensions(1, 3).overscan(0);
    let mut view = TreeView::new(config, NavCallbacks::new(), RecordingRegion::default());
    view.set_tree(roots, ExpandedIds::new(), now);

    view.expand("g", now);
    view.scroll_to(90);
    assert_eq!(view.window().scroll_top(), 90);
    view.collapse("g", now);

    assert_eq!(view.nav().visible_ids(), ["g", "z"]);
    assert_eq!(view.window().scroll_top(), 0);
    let rows: Vec<&str> = view.rows().iter().map(|r| r.node.id.as_str()).collect();
    assert_eq!(rows, ["g", "z"]);

    view.scroll_to(u32::MAX);
    assert_eq!(view.window().scroll_top(), 0);
}

#[test]
fn test_hidden_selection_is_announced() {
    let now = Instant::now();
    let mut view = view(now);
    view.expand("a", now);
    view.select("apple", now);
    view.poll(after(now, 100));

    view.set_tree(vec![TreeNode::word("banana", "banana")], ExpandedIds::new(), after(now, 200));
    assert_eq!(view.nav().current_id(), None);
    view.poll(after(now, 300));
    assert_eq!(view.region().messages.last().map(String::as_str), Some("Selection cleared"));
}

#[test]
fn test_unmount_runs_once() {
    let now = Instant::now();
    let selections = Rc::new(RefCell::new(0));
    let counter = selections.clone();
    let callbacks = NavCallbacks::new().on_selection_change(move |_, _| *counter.borrow_mut() += 1);
    let mut view = TreeView::new(TreeViewConfig::new("t"), callbacks, RecordingRegion::default());
    view.set_tree(tree(), ExpandedIds::new(), now);
    view.select("a", now);
    view.activate_trap(TrapOptions::default());

    view.unmount();
    assert!(!view.is_mounted());
    assert!(view.nav().visible_nodes().is_empty());
    assert!(view.trap().is_none());
    assert!(view.announcer().pending_message().is_none());
    view.unmount();
    assert!(!press(&mut view, Key::Down, now));
    assert_eq!(*selections.borrow(), 1);
}

struct FailingAnimator {
    calls: Rc<RefCell<u32>>,
}

impl Animator for FailingAnimator {
    fn begin(&mut self, node_id: &str, _: TransitionKind, _: &TransitionConfig) -> Result<(), AnimationError> {
        *self.calls.borrow_mut() += 1;
        Err(AnimationError::Rejected {
            id: node_id.to_string(),
            reason: "compositor unavailable".to_string(),
        })
    }
}

#[test]
fn test_failed_animation_still_expands() {
    let now = Instant::now();
    let calls = Rc::new(RefCell::new(0));
    let mut view = view(now).with_animator(FailingAnimator { calls: calls.clone() });
    view.expand("a", now);
    assert!(*calls.borrow() > 0);
    assert_eq!(view.nav().visible_ids(), ["a", "apple", "ant", "banana"]);
    assert!(!view.transitions().has_active_transitions());
}

#[test]
fn test_expand_animation_progresses_and_finishes() {
    let now = Instant::now();
    let mut view = view(now);
    view.expand("a", now);
    let mid = view
        .transitions()
        .progress("a", TransitionKind::Expand, after(now, 75))
        .unwrap();
    assert!(mid > 0.0 && mid < 1.0);
    view.poll(after(now, 500));
    assert!(!view.transitions().has_active_transitions());
}
