use glint_core::hotkey::HotkeyCombination;

#[test]
fn parses_default_hotkey() {
    let parsed = HotkeyCombination::parse("Ctrl+Space").unwrap();
    assert_eq!(parsed.primary_base_key(), "Space");
    assert!(parsed.modifiers.ctrl);
    assert_eq!(parsed.canonical(), "Ctrl+Space");
}

#[test]
fn canonical_string_is_stable_for_equivalent_inputs() {
    let variants = ["ctrl+shift+a", "Shift + Ctrl + A", "CONTROL+SHIFT+a"];
    for variant in variants {
        let parsed = HotkeyCombination::parse(variant).unwrap();
        assert_eq!(parsed.canonical(), "Ctrl+Shift+A");
    }
}

#[test]
fn multi_key_chord_keeps_all_base_keys_in_the_string() {
    let parsed = HotkeyCombination::parse("Q+Space").unwrap();
    assert_eq!(parsed.canonical(), "Q+Space");
    assert_eq!(parsed.base_keys().len(), 2);
    // Only the primary key is ever encoded for OS registration.
    assert_eq!(parsed.primary_base_key(), "Q");
}

#[test]
fn media_and_numpad_keys_are_in_the_vocabulary() {
    assert!(HotkeyCombination::parse("Ctrl+VolumeUp").is_ok());
    assert!(HotkeyCombination::parse("Alt+Numpad5").is_ok());
    assert!(HotkeyCombination::parse("Ctrl+BrowserHome").is_ok());
}
