use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event as CrosstermEvent},
    queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, ClearType},
};
use treenav::{LiveRegion, TransitionKind, TreeView};
use unicode_width::UnicodeWidthChar;

/// Rows taken by the header and status lines.
pub const CHROME_ROWS: u16 = 2;

pub struct Terminal {
    stdout: io::Stdout,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        crossterm::execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture
        )?;

        Ok(Self { stdout })
    }

    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    pub fn poll(&self, timeout: Duration) -> io::Result<Vec<CrosstermEvent>> {
        let mut events = Vec::new();
        if event::poll(timeout)? {
            events.push(event::read()?);
            // Drain any additional pending events
            while event::poll(Duration::ZERO)? {
                events.push(event::read()?);
            }
        }
        Ok(events)
    }

    /// Draw the header, the rendered window and the status line.
    pub fn draw<R: LiveRegion>(
        &mut self,
        view: &TreeView<R>,
        status: &str,
        chosen: Option<&str>,
    ) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        let viewport = height.saturating_sub(CHROME_ROWS) as u64;
        let now = Instant::now();
        queue!(self.stdout, terminal::Clear(ClearType::All))?;

        let window = view.window();
        let header = format!(
            "{} | {} visible | scroll {}/{} | chosen: {}",
            view.config().label,
            window.len(),
            window.scroll_top(),
            window.total_height(),
            chosen.unwrap_or("-"),
        );
        queue!(
            self.stdout,
            cursor::MoveTo(0, 0),
            SetAttribute(Attribute::Bold),
            Print(truncate(&header, width)),
            SetAttribute(Attribute::Reset)
        )?;

        let item_height = window.item_height().max(1) as u64;
        for row in view.rows() {
            let top = row.index as u64 * item_height;
            let Some(y) = top.checked_sub(window.scroll_top() as u64) else {
                continue;
            };
            if y >= viewport {
                continue;
            }

            let icon = if !row.node.is_expandable() {
                "  "
            } else if row.state.expanded {
                "▾ "
            } else {
                "▸ "
            };
            let indent = "  ".repeat(row.visible.depth as usize);
            let line = format!("{indent}{icon}{}", row.node.content);

            queue!(self.stdout, cursor::MoveTo(0, y as u16 + 1))?;
            if row.state.selected {
                queue!(self.stdout, SetAttribute(Attribute::Reverse))?;
                let highlighting = view
                    .transitions()
                    .progress(&row.node.id, TransitionKind::Highlight, now)
                    .is_some();
                if highlighting {
                    queue!(self.stdout, SetAttribute(Attribute::Bold))?;
                }
            }
            queue!(
                self.stdout,
                Print(truncate(&line, width)),
                SetAttribute(Attribute::Reset)
            )?;
        }

        queue!(
            self.stdout,
            cursor::MoveTo(0, height.saturating_sub(1)),
            SetAttribute(Attribute::Dim),
            Print(truncate(status, width)),
            SetAttribute(Attribute::Reset)
        )?;
        self.stdout.flush()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = crossterm::execute!(
            self.stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Cut `text` to at most `width` terminal columns.
fn truncate(text: &str, width: u16) -> String {
    let mut used = 0usize;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width as usize {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}
