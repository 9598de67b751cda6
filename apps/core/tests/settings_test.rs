use glint_core::settings;

#[test]
fn validates_and_canonicalizes_hotkey() {
    let canonical = settings::validate_hotkey(" shift + ctrl + p ").unwrap();
    assert_eq!(canonical, "Ctrl+Shift+P");
}

#[test]
fn rejects_base_key_less_hotkey() {
    assert!(settings::validate_hotkey("Ctrl+Alt").is_err());
    assert!(settings::validate_hotkey("").is_err());
}

#[test]
fn validates_numeric_ranges() {
    assert!(settings::validate_max_results(5).is_ok());
    assert!(settings::validate_max_results(100).is_ok());
    assert!(settings::validate_max_results(4).is_err());
    assert!(settings::validate_max_results(101).is_err());

    assert!(settings::validate_window_opacity(20).is_ok());
    assert!(settings::validate_window_opacity(19).is_err());

    assert!(settings::validate_search_delay(0).is_ok());
    assert!(settings::validate_search_delay(2_001).is_err());
}
