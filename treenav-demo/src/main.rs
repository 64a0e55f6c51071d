mod error;
mod paths;
mod sample;
mod terminal;

use std::cell::RefCell;
use std::fs::File;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEventKind, MouseEventKind};
use simplelog::{Config, LevelFilter, WriteLogger};
use treenav::{ExpandedIds, Key, KeyEvent, NavCallbacks, TreeView, TreeViewConfig};

use crate::error::DemoError;
use crate::terminal::{Terminal, CHROME_ROWS};

const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> Result<(), DemoError> {
    let level = std::env::var("TREENAV_LOG")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(LevelFilter::Debug);
    let log_file = File::create(paths::log_file())?;
    WriteLogger::init(level, Config::default(), log_file)?;

    let roots = match std::env::args_os().nth(1) {
        Some(path) => sample::load(&PathBuf::from(path))?,
        None => sample::builtin(),
    };
    log::info!("loaded {} root suggestions", roots.len());

    let mut term = Terminal::new()?;
    let result = run(&mut term, roots);
    drop(term);
    if let Err(e) = &result {
        log::error!("demo failed: {e}");
    }
    result
}

fn run(term: &mut Terminal, roots: Vec<treenav::TreeNode>) -> Result<(), DemoError> {
    let (_, height) = term.size()?;
    let viewport = height.saturating_sub(CHROME_ROWS) as u32;

    let status = Rc::new(RefCell::new(String::from("Arrow keys navigate, q quits")));
    let chosen: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));

    let chosen_sink = chosen.clone();
    let callbacks = NavCallbacks::new()
        .on_word_select(move |node| *chosen_sink.borrow_mut() = Some(node.content.clone()))
        .on_expansion_change(|id, expanded| log::debug!("expansion {id} -> {expanded}"));

    let status_sink = status.clone();
    let region = move |message: &str| *status_sink.borrow_mut() = message.to_string();

    let config = TreeViewConfig::new("suggestions").dimensions(1, viewport.max(1));
    let mut view = TreeView::new(config, callbacks, region);
    view.set_tree(roots, ExpandedIds::new(), Instant::now());

    loop {
        let now = Instant::now();
        let timeout = view
            .next_deadline()
            .map(|due| due.saturating_duration_since(now))
            .unwrap_or(IDLE_POLL);

        for event in term.poll(timeout)? {
            match event {
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    if key.code == KeyCode::Char('q') {
                        view.unmount();
                        return Ok(());
                    }
                    let event = KeyEvent::from(key);
                    if !view.handle_key(&event, Instant::now()) {
                        page(&mut view, event.key);
                    }
                }
                CrosstermEvent::Mouse(mouse) => {
                    let top = view.window().scroll_top();
                    match mouse.kind {
                        MouseEventKind::ScrollDown => view.scroll_to(top.saturating_add(1)),
                        MouseEventKind::ScrollUp => view.scroll_to(top.saturating_sub(1)),
                        _ => {}
                    }
                }
                CrosstermEvent::Resize(_, height) => {
                    let viewport = height.saturating_sub(CHROME_ROWS) as u32;
                    view.resize(viewport.max(1));
                }
                _ => {}
            }
        }

        view.poll(Instant::now());
        term.draw(&view, &status.borrow(), chosen.borrow().as_deref())?;
    }
}

/// PageUp/PageDown are left to the host: scroll by one viewport.
fn page<R: treenav::LiveRegion>(view: &mut TreeView<R>, key: Key) {
    let window = view.window();
    let step = window.container_height();
    let top = window.scroll_top();
    match key {
        Key::PageDown => view.scroll_to(top.saturating_add(step)),
        Key::PageUp => view.scroll_to(top.saturating_sub(step)),
        _ => {}
    }
}
