/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    F(u8),
    /// A key with no mapping here (media keys, lone modifiers, ...).
    Unknown,
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Default::default()
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }

    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Default::default()
        }
    }

    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

/// A key press delivered to a tree view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::new(),
        }
    }

    pub fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Shift+Tab arrives as `BackTab` from some terminals and as `Tab` with
    /// shift held from others.
    pub fn is_back_tab(&self) -> bool {
        self.key == Key::BackTab || (self.key == Key::Tab && self.modifiers.shift)
    }

    pub fn is_forward_tab(&self) -> bool {
        self.key == Key::Tab && !self.modifiers.shift
    }
}

impl From<Key> for KeyEvent {
    fn from(key: Key) -> Self {
        Self::new(key)
    }
}

/// An element gained focus.
///
/// `from_keyboard` is the "came from keyboard activation" marker. Focus that
/// arrives without it is assumed to come from an assistive-technology
/// virtual cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusEvent {
    pub target: String,
    pub from_keyboard: bool,
}

impl FocusEvent {
    pub fn keyboard(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            from_keyboard: true,
        }
    }

    pub fn virtual_cursor(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            from_keyboard: false,
        }
    }
}

// Conversion from crossterm types
impl From<crossterm::event::KeyCode> for Key {
    fn from(code: crossterm::event::KeyCode) -> Self {
        use crossterm::event::KeyCode;
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Insert => Key::Insert,
            KeyCode::F(n) => Key::F(n),
            _ => Key::Unknown,
        }
    }
}

impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(mods: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers;
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}

impl From<crossterm::event::KeyEvent> for KeyEvent {
    fn from(event: crossterm::event::KeyEvent) -> Self {
        Self {
            key: event.code.into(),
            modifiers: event.modifiers.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventKind, KeyEventState, KeyModifiers, MediaKeyCode};

    #[test]
    fn unmapped_crossterm_keys_are_unknown() {
        assert_eq!(Key::from(KeyCode::Media(MediaKeyCode::Play)), Key::Unknown);
        assert_eq!(Key::from(KeyCode::CapsLock), Key::Unknown);
        assert_eq!(Key::from(KeyCode::Null), Key::Unknown);
    }

    #[test]
    fn crossterm_back_tab_with_shift() {
        let event = KeyEvent::from(crossterm::event::KeyEvent {
            code: KeyCode::Tab,
            modifiers: KeyModifiers::SHIFT,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        });
        assert!(event.is_back_tab());
        assert!(!event.is_forward_tab());
    }
}
