//! Key handling for the navigation controller.

use crate::event::{Key, KeyEvent};

use super::{NavEvent, NavigationController};

impl NavigationController {
    /// Apply a key press. Returns true if the key was consumed, in which case
    /// the caller should suppress its default handling.
    pub fn handle_key(&mut self, event: &KeyEvent) -> bool {
        if event.modifiers.ctrl || event.modifiers.alt {
            return false;
        }
        if self.visible.is_empty() {
            return false;
        }

        match event.key {
            Key::Down => self.move_by(1),
            Key::Up => self.move_by(-1),
            Key::Right => self.key_right(),
            Key::Left => self.key_left(),
            Key::Enter => self.key_enter(),
            Key::Escape => {
                self.clear_current();
                self.events.push(NavEvent::SelectionCleared);
                true
            }
            Key::Home => {
                self.select_index(0);
                true
            }
            Key::End => {
                self.select_index(self.visible.len() - 1);
                true
            }
            _ => false,
        }
    }

    /// Move the selection with wrap-around. With nothing selected, Down lands
    /// on the first node and Up on the last.
    fn move_by(&mut self, delta: isize) -> bool {
        let len = self.visible.len() as isize;
        let next = match self.current_index() {
            Some(i) => (i as isize + delta).rem_euclid(len),
            None if delta > 0 => 0,
            None => len - 1,
        };
        self.select_index(next as usize);
        true
    }

    fn key_right(&mut self) -> bool {
        let Some(index) = self.current_index() else {
            return false;
        };
        let node = &self.visible[index];
        if !node.has_children || !self.forest.node(node).is_expandable() {
            return false;
        }
        if node.expanded {
            // first child immediately follows its expanded parent
            self.select_index(index + 1);
        } else {
            let id = node.id.clone();
            self.expand(&id);
        }
        true
    }

    fn key_left(&mut self) -> bool {
        let Some(index) = self.current_index() else {
            return false;
        };
        let node = &self.visible[index];
        if node.expanded && self.forest.node(node).is_expandable() {
            let id = node.id.clone();
            self.collapse(&id);
            return true;
        }
        match self.ancestor_index(index) {
            Some(parent) => {
                self.select_index(parent);
                true
            }
            None => false,
        }
    }

    /// Scan backward for the first node one level up. Stops if the scan
    /// reaches a shallower node first.
    fn ancestor_index(&self, index: usize) -> Option<usize> {
        let target = self.visible[index].depth.checked_sub(1)?;
        for i in (0..index).rev() {
            let depth = self.visible[i].depth;
            if depth == target {
                return Some(i);
            }
            if depth < target {
                return None;
            }
        }
        None
    }

    fn key_enter(&mut self) -> bool {
        let Some(index) = self.current_index() else {
            return false;
        };
        let id = self.visible[index].id.clone();
        let node = self.forest.node(&self.visible[index]);
        if node.is_word() {
            log::debug!("[nav] activate word {id}");
            self.callbacks.word(node);
            self.events.push(NavEvent::WordActivated { id });
        } else {
            self.toggle_expansion(&id);
        }
        true
    }
}
