use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use neon_arcade::fight::entities::FightInput;
use neon_arcade::input::*;
use neon_arcade::snake::entities::Direction;

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
}

fn release(code: KeyCode) -> KeyEvent {
    KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
}

fn repeat(code: KeyCode) -> KeyEvent {
    KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Repeat)
}

#[test]
fn pressed_key_is_held_within_window() {
    let mut keys = KeyTracker::new(120);
    keys.record(&press(KeyCode::Char('a')), 1000);
    assert!(keys.is_held(KeyCode::Char('a'), 1000));
    assert!(keys.is_held(KeyCode::Char('a'), 1120));
    assert!(!keys.is_held(KeyCode::Char('a'), 1121));
}

#[test]
fn repeat_refreshes_the_window() {
    let mut keys = KeyTracker::new(120);
    keys.record(&press(KeyCode::Left), 1000);
    keys.record(&repeat(KeyCode::Left), 1100);
    assert!(keys.is_held(KeyCode::Left, 1200));
}

#[test]
fn release_drops_key_immediately() {
    let mut keys = KeyTracker::new(120);
    keys.record(&press(KeyCode::Char('j')), 1000);
    keys.record(&release(KeyCode::Char('j')), 1010);
    assert!(!keys.is_held(KeyCode::Char('j'), 1010));
}

#[test]
fn letters_are_case_insensitive() {
    let mut keys = KeyTracker::default();
    keys.record(&press(KeyCode::Char('D')), 0);
    assert!(keys.is_held(KeyCode::Char('d'), 10));
    keys.record(&release(KeyCode::Char('d')), 20);
    assert!(!keys.is_held(KeyCode::Char('D'), 20));
}

#[test]
fn latest_state_wins_between_samples() {
    let mut keys = KeyTracker::default();
    keys.record(&press(KeyCode::Char('k')), 0);
    keys.record(&release(KeyCode::Char('k')), 5);
    keys.record(&press(KeyCode::Char('k')), 8);
    assert!(fight_input(&keys, 16).kick);
}

#[test]
fn fight_keys_map_to_controls() {
    let mut keys = KeyTracker::default();
    for code in [
        KeyCode::Right,
        KeyCode::Char(' '),
        KeyCode::Down,
        KeyCode::Char('j'),
    ] {
        keys.record(&press(code), 0);
    }
    let input = fight_input(&keys, 16);
    assert!(input.right);
    assert!(input.jump);
    assert!(input.block);
    assert!(input.punch);
    assert!(!input.left);
    assert!(!input.kick);
}

#[test]
fn unmapped_keys_are_ignored() {
    let mut keys = KeyTracker::default();
    keys.record(&press(KeyCode::Char('x')), 0);
    keys.record(&press(KeyCode::F(5)), 0);
    assert_eq!(fight_input(&keys, 16), FightInput::default());
    assert_eq!(snake_direction(KeyCode::Char('x')), None);
}

#[test]
fn snake_keys_map_to_directions() {
    assert_eq!(snake_direction(KeyCode::Up), Some(Direction::Up));
    assert_eq!(snake_direction(KeyCode::Down), Some(Direction::Down));
    assert_eq!(snake_direction(KeyCode::Char('A')), Some(Direction::Left));
    assert_eq!(snake_direction(KeyCode::Right), Some(Direction::Right));
    assert_eq!(snake_direction(KeyCode::Enter), None);
}

#[test]
fn release_reporting_keeps_keys_until_release() {
    let mut keys = KeyTracker::reporting_releases();
    keys.record(&press(KeyCode::Char('s')), 0);
    for now in [16, 100, 200, 300, 400, 2000] {
        assert!(fight_input(&keys, now).block, "block dropped at {now} ms");
    }
    keys.record(&release(KeyCode::Char('s')), 2010);
    assert!(!fight_input(&keys, 2016).block);
}

#[test]
fn classic_tracker_still_expires_silent_keys() {
    let mut keys = KeyTracker::default();
    keys.record(&press(KeyCode::Char('s')), 0);
    assert!(fight_input(&keys, 100).block);
    assert!(!fight_input(&keys, 200).block);
}
