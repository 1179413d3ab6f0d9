use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::game::Input;

/// Without release events a key counts as held for this long after its
/// last press or repeat. Terminal auto-repeat refreshes it well within that.
pub const HOLD_WINDOW_MS: u64 = 140;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Control {
    Left,
    Right,
    Fire,
}

impl Control {
    fn from_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Control::Left),
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Control::Right),
            KeyCode::Char(' ') | KeyCode::Up => Some(Control::Fire),
            _ => None,
        }
    }
}

/// Turns a stream of key events into a per-tick snapshot of held keys.
#[derive(Debug)]
pub struct InputTracker {
    held: HashMap<Control, u64>,
    /// True when the terminal reports key releases.
    releases: bool,
    restart: bool,
}

impl InputTracker {
    pub fn new(releases: bool) -> Self {
        Self {
            held: HashMap::new(),
            releases,
            restart: false,
        }
    }

    pub fn key_event(&mut self, key: KeyEvent, now: u64) {
        if matches!(
            key.code,
            KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R')
        ) {
            if key.kind == KeyEventKind::Press {
                self.restart = true;
            }
            return;
        }

        let Some(control) = Control::from_code(key.code) else {
            return;
        };
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.held.insert(control, now);
            }
            KeyEventKind::Release => {
                self.held.remove(&control);
            }
        }
    }

    fn is_held(&self, control: Control, now: u64) -> bool {
        match self.held.get(&control) {
            Some(_) if self.releases => true,
            Some(&last) => now.saturating_sub(last) <= HOLD_WINDOW_MS,
            None => false,
        }
    }

    /// Held keys at `now`. Restart is a one-shot and is cleared by this call.
    pub fn snapshot(&mut self, now: u64) -> Input {
        Input {
            left: self.is_held(Control::Left, now),
            right: self.is_held(Control::Right, now),
            fire: self.is_held(Control::Fire, now),
            restart: std::mem::take(&mut self.restart),
        }
    }

    pub fn clear(&mut self) {
        self.held.clear();
        self.restart = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers};

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn presses_expire_without_release_events() {
        let mut tracker = InputTracker::new(false);
        tracker.key_event(key(KeyCode::Left, KeyEventKind::Press), 1_000);
        assert!(tracker.snapshot(1_100).left);
        assert!(tracker.snapshot(1_140).left);
        assert!(!tracker.snapshot(1_141).left);
    }

    #[test]
    fn repeats_keep_a_key_held() {
        let mut tracker = InputTracker::new(false);
        tracker.key_event(key(KeyCode::Char(' '), KeyEventKind::Press), 0);
        tracker.key_event(key(KeyCode::Char(' '), KeyEventKind::Repeat), 100);
        assert!(tracker.snapshot(200).fire);
    }

    #[test]
    fn release_events_end_the_hold() {
        let mut tracker = InputTracker::new(true);
        tracker.key_event(key(KeyCode::Char('d'), KeyEventKind::Press), 0);
        assert!(tracker.snapshot(5_000).right);
        tracker.key_event(key(KeyCode::Char('d'), KeyEventKind::Release), 5_001);
        assert!(!tracker.snapshot(5_002).right);
    }

    #[test]
    fn restart_fires_once() {
        let mut tracker = InputTracker::new(false);
        tracker.key_event(key(KeyCode::Enter, KeyEventKind::Press), 0);
        tracker.key_event(key(KeyCode::Enter, KeyEventKind::Release), 1);
        assert!(tracker.snapshot(2).restart);
        assert!(!tracker.snapshot(3).restart);
    }

    #[test]
    fn unrelated_keys_are_ignored() {
        let mut tracker = InputTracker::new(false);
        tracker.key_event(key(KeyCode::Char('x'), KeyEventKind::Press), 0);
        assert_eq!(tracker.snapshot(1), Input::default());
    }
}
