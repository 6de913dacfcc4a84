//! Keyboard state for the play screen.
//!
//! Terminals report key presses, and only some report releases. `Keyboard`
//! turns the crossterm event stream into a per-frame `TickInput`: presses are
//! edge-triggered, and a key counts as held until its release arrives or, on
//! terminals without release events, for `KEY_HOLD_MS` after its last press
//! or auto-repeat.

use crate::constants::KEY_HOLD_MS;
use crate::movement::TickInput;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

/// Logical keys the game reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Jump,
    Reset,
    Close,
}

/// Map a terminal key event to a game key. Arrows and WASD both steer.
pub fn map_key(event: &KeyEvent) -> Option<Key> {
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        return match event.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(Key::Close),
            _ => None,
        };
    }

    match event.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Key::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::Down),
        KeyCode::Char(' ') => Some(Key::Jump),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Key::Reset),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Key::Close),
        _ => None,
    }
}

#[derive(Debug, Default)]
pub struct Keyboard {
    /// Time of the last press or repeat for each key still considered held.
    held: HashMap<Key, Instant>,
    /// Keys newly pressed since the last `take_input`.
    pressed: HashSet<Key>,
    /// Set once the terminal has sent a release event.
    reports_release: bool,
    close_requested: bool,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_event(&mut self, event: KeyEvent, now: Instant) {
        if event.kind == KeyEventKind::Release {
            self.reports_release = true;
        }
        let Some(key) = map_key(&event) else {
            return;
        };

        match event.kind {
            KeyEventKind::Press => {
                if key == Key::Close {
                    self.close_requested = true;
                }
                self.pressed.insert(key);
                self.held.insert(key, now);
            }
            KeyEventKind::Repeat => {
                self.held.insert(key, now);
            }
            KeyEventKind::Release => {
                self.held.remove(&key);
            }
        }
    }

    pub fn is_down(&self, key: Key, now: Instant) -> bool {
        match self.held.get(&key) {
            Some(_) if self.reports_release => true,
            Some(last) => now.saturating_duration_since(*last) < Duration::from_millis(KEY_HOLD_MS),
            None => false,
        }
    }

    pub fn close_requested(&self) -> bool {
        self.close_requested
    }

    /// Snapshot the input for one frame and clear the press edges.
    pub fn take_input(&mut self, now: Instant) -> TickInput {
        let right = self.is_down(Key::Right, now);
        let left = self.is_down(Key::Left, now);
        let axis = match (left, right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };

        let input = TickInput {
            right_pressed: self.pressed.contains(&Key::Right),
            left_pressed: self.pressed.contains(&Key::Left),
            up_pressed: self.pressed.contains(&Key::Up),
            down_pressed: self.pressed.contains(&Key::Down),
            jump_pressed: self.pressed.contains(&Key::Jump),
            reset_pressed: self.pressed.contains(&Key::Reset),
            axis,
        };
        self.pressed.clear();
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
    }

    #[test]
    fn test_map_key_arrows_and_wasd() {
        assert_eq!(map_key(&press(KeyCode::Left)), Some(Key::Left));
        assert_eq!(map_key(&press(KeyCode::Char('a'))), Some(Key::Left));
        assert_eq!(map_key(&press(KeyCode::Char('D'))), Some(Key::Right));
        assert_eq!(map_key(&press(KeyCode::Char('w'))), Some(Key::Up));
        assert_eq!(map_key(&press(KeyCode::Down)), Some(Key::Down));
        assert_eq!(map_key(&press(KeyCode::Char(' '))), Some(Key::Jump));
        assert_eq!(map_key(&press(KeyCode::Char('r'))), Some(Key::Reset));
        assert_eq!(map_key(&press(KeyCode::Esc)), Some(Key::Close));
        assert_eq!(map_key(&press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_ctrl_c_closes() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(&ctrl_c), Some(Key::Close));

        let mut keyboard = Keyboard::new();
        keyboard.handle_event(ctrl_c, Instant::now());
        assert!(keyboard.close_requested());
    }

    #[test]
    fn test_presses_are_edges() {
        let mut keyboard = Keyboard::new();
        let now = Instant::now();
        keyboard.handle_event(press(KeyCode::Right), now);
        keyboard.handle_event(press(KeyCode::Up), now);

        let input = keyboard.take_input(now);
        assert!(input.right_pressed);
        assert!(input.up_pressed);
        assert!(!input.left_pressed);

        let input = keyboard.take_input(now);
        assert!(!input.right_pressed);
        assert!(!input.up_pressed);
    }

    #[test]
    fn test_hold_expires_without_release_events() {
        let mut keyboard = Keyboard::new();
        let start = Instant::now();
        keyboard.handle_event(press(KeyCode::Left), start);

        assert!(keyboard.is_down(Key::Left, start + Duration::from_millis(KEY_HOLD_MS - 1)));
        assert!(!keyboard.is_down(Key::Left, start + Duration::from_millis(KEY_HOLD_MS)));

        // Auto-repeat keeps it alive
        let repeat = KeyEvent::new_with_kind(KeyCode::Left, KeyModifiers::NONE, KeyEventKind::Repeat);
        keyboard.handle_event(repeat, start + Duration::from_millis(100));
        assert!(keyboard.is_down(Key::Left, start + Duration::from_millis(KEY_HOLD_MS + 50)));
    }

    #[test]
    fn test_release_ends_hold() {
        let mut keyboard = Keyboard::new();
        let start = Instant::now();
        keyboard.handle_event(press(KeyCode::Right), start);
        keyboard.handle_event(release(KeyCode::Char('x')), start);

        // Once releases are reported, holds no longer time out
        let later = start + Duration::from_secs(5);
        assert!(keyboard.is_down(Key::Right, later));
        assert_eq!(keyboard.take_input(later).axis, 1.0);

        keyboard.handle_event(release(KeyCode::Right), later);
        assert!(!keyboard.is_down(Key::Right, later));
        assert_eq!(keyboard.take_input(later).axis, 0.0);
    }

    #[test]
    fn test_opposite_holds_cancel() {
        let mut keyboard = Keyboard::new();
        let now = Instant::now();
        keyboard.handle_event(press(KeyCode::Left), now);
        keyboard.handle_event(press(KeyCode::Right), now);
        let input = keyboard.take_input(now);
        assert_eq!(input.axis, 0.0);
        assert_eq!(input.direction(), Some(crate::movement::Direction::Right));
    }
}
