use std::fs;

use neon_arcade::prefs::*;

#[test]
fn missing_file_gives_default_theme() {
    let dir = tempfile::tempdir().unwrap();
    let store = PrefStore::new(dir.path());
    assert_eq!(store.load(), Theme::Green);
}

#[test]
fn saved_theme_is_read_back() {
    let dir = tempfile::tempdir().unwrap();
    let store = PrefStore::new(dir.path());
    store.save(Theme::Purple).unwrap();
    assert_eq!(store.load(), Theme::Purple);

    store.save(Theme::Teal).unwrap();
    assert_eq!(PrefStore::new(dir.path()).load(), Theme::Teal);
}

#[test]
fn file_holds_a_single_theme_key() {
    let dir = tempfile::tempdir().unwrap();
    let store = PrefStore::new(dir.path());
    store.save(Theme::Blue).unwrap();

    let raw = fs::read_to_string(store.path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json, serde_json::json!({ "app-theme": "theme-blue" }));
}

#[test]
fn corrupt_or_unknown_values_fall_back() {
    let dir = tempfile::tempdir().unwrap();
    let store = PrefStore::new(dir.path());

    fs::write(store.path(), "{ not json").unwrap();
    assert_eq!(store.load(), Theme::Green);

    fs::write(store.path(), r#"{ "app-theme": "theme-plaid" }"#).unwrap();
    assert_eq!(store.load(), Theme::Green);

    fs::write(store.path(), "{}").unwrap();
    assert_eq!(store.load(), Theme::Green);
}

#[test]
fn save_creates_missing_directories() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    let store = PrefStore::new(&nested);
    store.save(Theme::Orange).unwrap();
    assert_eq!(store.load(), Theme::Orange);
}

#[test]
fn themes_cycle_in_order() {
    assert_eq!(Theme::Green.next(), Theme::Blue);
    assert_eq!(Theme::Red.next(), Theme::Teal);
    assert_eq!(Theme::Teal.next(), Theme::Green);
}
