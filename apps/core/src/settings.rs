//! Settings draft validation and the recording flow's last step.
//!
//! Any combination with at least one base key is accepted, including one
//! that collides with a binding owned by another application; the collision
//! shows up later as a registration failure, which is reported and
//! non-fatal. This mirrors the recorder's accept-anything policy.

use crate::config::Config;
use crate::hotkey::HotkeyCombination;
use crate::recorder::RecordingSession;

pub const SAFE_HOTKEY_PRESETS: [&str; 6] = [
    "Ctrl+Shift+Space",
    "Ctrl+Alt+Space",
    "Alt+Shift+Space",
    "Ctrl+Shift+P",
    "Ctrl+Alt+P",
    "Ctrl+Shift+O",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsDraft {
    pub hotkey_toggle: String,
    pub search_delay_ms: u32,
    pub max_results: u16,
    pub window_opacity: u8,
    pub launch_at_startup: bool,
}

impl SettingsDraft {
    pub fn from_config(config: &Config) -> Self {
        Self {
            hotkey_toggle: config.hotkey_toggle.clone(),
            search_delay_ms: config.search_delay_ms,
            max_results: config.max_results,
            window_opacity: config.window_opacity,
            launch_at_startup: config.launch_at_startup,
        }
    }
}

pub fn validate_hotkey(input: &str) -> Result<String, String> {
    let combination = HotkeyCombination::parse(input)
        .map_err(|error| format!("Invalid hotkey: {error}."))?;
    Ok(combination.canonical())
}

pub fn validate_max_results(value: u16) -> Result<(), String> {
    if (5..=100).contains(&value) {
        Ok(())
    } else {
        Err("Max results must be between 5 and 100.".to_string())
    }
}

pub fn validate_window_opacity(value: u8) -> Result<(), String> {
    if (20..=100).contains(&value) {
        Ok(())
    } else {
        Err("Window opacity must be between 20 and 100.".to_string())
    }
}

pub fn validate_search_delay(value: u32) -> Result<(), String> {
    if value <= 2_000 {
        Ok(())
    } else {
        Err("Search delay must be at most 2000 ms.".to_string())
    }
}

/// Validate every field and write the draft into the config. The hotkey is
/// stored in canonical form.
pub fn apply_draft(config: &mut Config, draft: &SettingsDraft) -> Result<(), String> {
    let canonical = validate_hotkey(&draft.hotkey_toggle)?;
    validate_max_results(draft.max_results)?;
    validate_window_opacity(draft.window_opacity)?;
    validate_search_delay(draft.search_delay_ms)?;

    config.hotkey_toggle = canonical;
    config.search_delay_ms = draft.search_delay_ms;
    config.max_results = draft.max_results;
    config.window_opacity = draft.window_opacity;
    config.launch_at_startup = draft.launch_at_startup;
    Ok(())
}

/// Finish a recording session: the canonical string to persist, or `None`
/// when the session never resolved a base key (the recording control stays
/// open in that case).
pub fn finalize_recording(session: RecordingSession) -> Option<String> {
    session.finalize().map(|combination| combination.canonical())
}

#[cfg(test)]
mod tests {
    use super::{
        apply_draft, finalize_recording, validate_hotkey, SettingsDraft, SAFE_HOTKEY_PRESETS,
    };
    use crate::config::Config;
    use crate::hotkey::Modifiers;
    use crate::recorder::RecordingSession;
    use std::time::Instant;

    #[test]
    fn canonicalizes_hotkey_input() {
        assert_eq!(validate_hotkey(" shift + ctrl + p ").unwrap(), "Ctrl+Shift+P");
    }

    #[test]
    fn accepts_any_combination_with_a_base_key() {
        // Deliberate policy: even a bare key or a modifier-less chord is
        // accepted; only base-key-less input is rejected.
        assert_eq!(validate_hotkey("Q").unwrap(), "Q");
        assert_eq!(validate_hotkey("Q+Space").unwrap(), "Q+Space");
        assert!(validate_hotkey("Ctrl+Shift").is_err());
    }

    #[test]
    fn presets_all_validate() {
        for preset in SAFE_HOTKEY_PRESETS {
            assert_eq!(validate_hotkey(preset).unwrap(), preset);
        }
    }

    #[test]
    fn apply_draft_round_trips_through_config() {
        let mut config = Config::default();
        let mut draft = SettingsDraft::from_config(&config);
        draft.hotkey_toggle = "alt+shift+g".to_string();
        draft.max_results = 30;
        apply_draft(&mut config, &draft).unwrap();
        assert_eq!(config.hotkey_toggle, "Alt+Shift+G");
        assert_eq!(config.max_results, 30);

        draft.max_results = 0;
        assert!(apply_draft(&mut config, &draft).is_err());
        // Failed apply leaves the previous value intact.
        assert_eq!(config.max_results, 30);
    }

    #[test]
    fn recording_with_base_key_persists_canonical_string() {
        let mut session = RecordingSession::new();
        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::default()
        };
        let start = Instant::now();
        session.on_key_down(0x11, ctrl, start).unwrap();
        session.on_key_down(0x51, ctrl, start).unwrap();
        assert_eq!(finalize_recording(session).as_deref(), Some("Ctrl+Q"));
    }

    #[test]
    fn modifier_only_recording_is_discarded() {
        let mut session = RecordingSession::new();
        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::default()
        };
        session.on_key_down(0x11, ctrl, Instant::now()).unwrap();
        assert!(finalize_recording(session).is_none());
    }
}
