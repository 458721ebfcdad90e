//! Keyboard state sampling.
//!
//! Instead of acting on each key event individually, the tracker records
//! the time of the last press/repeat for every key.  A loop samples it once
//! per tick, so several events between ticks coalesce to the latest state.
//!
//! Works on two classes of terminal:
//! * **Keyboard-enhancement capable** (kitty protocol): proper `Press` /
//!   `Repeat` / `Release` events, so a key stays held until its release
//!   arrives.  See [`KeyTracker::reporting_releases`].
//! * **Classic terminals**: only `Press` events (OS key-repeat shows up as
//!   repeated presses).  Keys expire after `hold_window_ms` of silence.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::fight::entities::FightInput;
use crate::snake::entities::Direction;

/// Covers the usual OS key-repeat interval with some slack.
pub const DEFAULT_HOLD_WINDOW_MS: u64 = 120;

#[derive(Debug, Clone)]
pub struct KeyTracker {
    last_seen: HashMap<KeyCode, u64>,
    hold_window_ms: u64,
    releases: bool,
}

impl Default for KeyTracker {
    fn default() -> Self {
        Self::new(DEFAULT_HOLD_WINDOW_MS)
    }
}

/// Letters are tracked case-insensitively so Shift or Caps Lock don't
/// drop a held key.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

impl KeyTracker {
    pub fn new(hold_window_ms: u64) -> Self {
        Self {
            last_seen: HashMap::new(),
            hold_window_ms,
            releases: false,
        }
    }

    /// Tracker for a terminal that reports key releases.  Held keys never
    /// time out; only a `Release` event lets go of them.
    pub fn reporting_releases() -> Self {
        Self {
            releases: true,
            ..Self::default()
        }
    }

    /// Fold one key event into the tracker.  `now` is in milliseconds.
    pub fn record(&mut self, event: &KeyEvent, now: u64) {
        let code = normalize(event.code);
        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.last_seen.insert(code, now);
            }
            KeyEventKind::Release => {
                self.last_seen.remove(&code);
            }
        }
    }

    pub fn is_held(&self, code: KeyCode, now: u64) -> bool {
        self.last_seen
            .get(&normalize(code))
            .is_some_and(|&last| self.releases || now.saturating_sub(last) <= self.hold_window_ms)
    }

    pub fn any_held(&self, codes: &[KeyCode], now: u64) -> bool {
        codes.iter().any(|&code| self.is_held(code, now))
    }

    pub fn clear(&mut self) {
        self.last_seen.clear();
    }
}

// ── Key maps ──────────────────────────────────────────────────────────────────

const LEFT_KEYS: [KeyCode; 2] = [KeyCode::Left, KeyCode::Char('a')];
const RIGHT_KEYS: [KeyCode; 2] = [KeyCode::Right, KeyCode::Char('d')];
const JUMP_KEYS: [KeyCode; 3] = [KeyCode::Up, KeyCode::Char('w'), KeyCode::Char(' ')];
const BLOCK_KEYS: [KeyCode; 2] = [KeyCode::Down, KeyCode::Char('s')];
const PUNCH_KEYS: [KeyCode; 1] = [KeyCode::Char('j')];
const KICK_KEYS: [KeyCode; 1] = [KeyCode::Char('k')];

/// Sample the fight controls.  Unmapped keys never show up here.
pub fn fight_input(keys: &KeyTracker, now: u64) -> FightInput {
    FightInput {
        left: keys.any_held(&LEFT_KEYS, now),
        right: keys.any_held(&RIGHT_KEYS, now),
        jump: keys.any_held(&JUMP_KEYS, now),
        block: keys.any_held(&BLOCK_KEYS, now),
        punch: keys.any_held(&PUNCH_KEYS, now),
        kick: keys.any_held(&KICK_KEYS, now),
    }
}

/// Snake turn for a key, if it is one.
pub fn snake_direction(code: KeyCode) -> Option<Direction> {
    match normalize(code) {
        KeyCode::Up | KeyCode::Char('w') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') => Some(Direction::Right),
        _ => None,
    }
}
