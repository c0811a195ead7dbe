use wplace_hotkeys::hotkey::KeyCode;
use wplace_hotkeys::settings::{Settings, DEFAULT_CLOSE_ICON_PATH};

#[test]
fn defaults_match_page_controls() {
    let s = Settings::default();
    assert_eq!(s.paint_hotkey().key, KeyCode::from("KeyQ"));
    assert_eq!(s.close_hotkey().key, KeyCode::from("KeyW"));
    assert_eq!(s.paint_label, "Paint");
    assert_eq!(s.close_icon_path, DEFAULT_CLOSE_ICON_PATH);

    let remap = s.key_remap();
    assert_eq!(remap.len(), 1);
    assert_eq!(remap.get(&KeyCode::from("KeyR")), Some(&KeyCode::from("KeyI")));
}

#[test]
fn empty_override_yields_defaults() {
    assert_eq!(Settings::load(None).unwrap(), Settings::default());
    assert_eq!(Settings::load(Some("  ")).unwrap(), Settings::default());
}

#[test]
fn partial_override_keeps_other_defaults() {
    let s = Settings::load(Some(r#"{ "paint_hotkey": "E", "key_remap": { "T": "KeyI" } }"#)).unwrap();
    assert_eq!(s.paint_hotkey().key, KeyCode::from("KeyE"));
    assert_eq!(s.close_hotkey().key, KeyCode::from("KeyW"));
    assert_eq!(s.key_remap().get(&KeyCode::from("KeyT")), Some(&KeyCode::from("KeyI")));
    assert!(s.key_remap().get(&KeyCode::from("KeyR")).is_none());
}

#[test]
fn malformed_override_falls_back() {
    assert!(Settings::load(Some("{ not json")).is_err());
    assert_eq!(Settings::load_or_default(Some("{ not json")), Settings::default());
}

#[test]
fn invalid_hotkey_uses_default() {
    let s = Settings {
        close_hotkey: "Ctrl+Nope".into(),
        ..Settings::default()
    };
    assert_eq!(s.close_hotkey().key, KeyCode::from("KeyW"));
    assert!(!s.close_hotkey().ctrl);
}

#[test]
fn serialized_settings_load_back() {
    let s = Settings {
        debug_logging: true,
        ..Settings::default()
    };
    let json = s.to_json().unwrap();
    assert_eq!(Settings::load(Some(&json)).unwrap(), s);
}

#[test]
fn url_matching_is_exact_except_fragment() {
    let s = Settings::default();
    assert!(s.matches_url("https://wplace.live/"));
    assert!(s.matches_url("https://wplace.live/#x"));
    assert!(!s.matches_url("https://wplace.live/?lat=1&lng=2"));
    assert!(s.matches_url("https://wplace.live:443/"));
    assert!(!s.matches_url("http://wplace.live/"));
    assert!(!s.matches_url("https://wplace.live/other"));
    assert!(!s.matches_url("https://example.com/"));
    assert!(!s.matches_url("not a url"));
}
