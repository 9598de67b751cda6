//! Interactive hotkey recording.
//!
//! A [`RecordingSession`] turns raw key-press/key-release events into a
//! stable combination string. Timers are modeled as deadlines against a
//! caller-supplied `Instant`, so the owning event loop drives finalization
//! by polling [`RecordingSession::finalize_due`] and the whole flow is
//! deterministic under test. The settings flow keeps at most one session
//! alive per process.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use crate::hotkey::{HotkeyCombination, Modifiers};
use crate::keymap::{self, KeymapError};

/// Delay after the most recent change before a still-held combination is
/// frozen. Long enough to finish a multi-key chord.
pub const QUIESCENCE_TIMEOUT: Duration = Duration::from_millis(2000);

/// Shorter delay used once every key has been released.
pub const RELEASE_TIMEOUT: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
struct Snapshot {
    modifiers: Modifiers,
    base_keys: Vec<&'static str>,
}

#[derive(Debug, Default)]
pub struct RecordingSession {
    held: BTreeSet<u32>,
    resolved: BTreeSet<&'static str>,
    snapshot: Option<Snapshot>,
    deadline: Option<Instant>,
}

impl RecordingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a key-press event. Auto-repeat duplicates are ignored. Modifier
    /// keys only affect the modifier state, never the base-key set. Returns
    /// an error for keys outside the key table; the key still participates
    /// in held-set tracking so its release is observed.
    pub fn on_key_down(
        &mut self,
        vk: u32,
        modifiers: Modifiers,
        now: Instant,
    ) -> Result<(), KeymapError> {
        if !self.held.insert(vk) {
            return Ok(());
        }

        let mut unsupported = None;
        if !keymap::is_modifier_code(vk) {
            match keymap::key_name(vk) {
                Ok(name) => {
                    self.resolved.insert(name);
                }
                Err(error) => unsupported = Some(error),
            }
        }

        self.snapshot = Some(Snapshot {
            modifiers,
            base_keys: self.resolved.iter().copied().collect(),
        });
        self.deadline = Some(now + QUIESCENCE_TIMEOUT);

        match unsupported {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Feed a key-release event. Once the held set drains, the shorter
    /// release timer replaces the quiescence timer. The frozen combination
    /// is the one captured at the last press, so releases never shrink it.
    pub fn on_key_up(&mut self, vk: u32, _modifiers: Modifiers, now: Instant) {
        self.held.remove(&vk);
        if !keymap::is_modifier_code(vk) {
            if let Ok(name) = keymap::key_name(vk) {
                self.resolved.remove(name);
            }
        }

        self.deadline = Some(if self.held.is_empty() {
            now + RELEASE_TIMEOUT
        } else {
            now + QUIESCENCE_TIMEOUT
        });
    }

    pub fn held_count(&self) -> usize {
        self.held.len()
    }

    /// The live combination string shown while recording, empty before the
    /// first press.
    pub fn current_combination(&self) -> String {
        match &self.snapshot {
            Some(snapshot) => {
                let mut parts = snapshot.modifiers.canonical_parts();
                parts.extend(snapshot.base_keys.iter().copied());
                parts.join("+")
            }
            None => String::new(),
        }
    }

    /// True once a timer deadline has elapsed with no further input.
    pub fn finalize_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }

    /// Freeze the session. Returns `None` when no base key was ever
    /// resolved (modifier-only input never produces a binding). Collisions
    /// with existing bindings are deliberately not rejected here.
    pub fn finalize(self) -> Option<HotkeyCombination> {
        let snapshot = self.snapshot?;
        if snapshot.base_keys.is_empty() {
            return None;
        }
        HotkeyCombination::new(snapshot.modifiers, snapshot.base_keys).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::{RecordingSession, QUIESCENCE_TIMEOUT, RELEASE_TIMEOUT};
    use crate::hotkey::Modifiers;
    use std::time::{Duration, Instant};

    const VK_CONTROL: u32 = 0x11;
    const VK_Q: u32 = 0x51;

    fn ctrl() -> Modifiers {
        Modifiers {
            ctrl: true,
            ..Modifiers::default()
        }
    }

    #[test]
    fn auto_repeat_presses_are_ignored() {
        let mut session = RecordingSession::new();
        let start = Instant::now();
        session.on_key_down(VK_Q, Modifiers::default(), start).unwrap();
        session
            .on_key_down(VK_Q, Modifiers::default(), start + Duration::from_millis(30))
            .unwrap();
        assert_eq!(session.held_count(), 1);
        assert_eq!(session.current_combination(), "Q");
    }

    #[test]
    fn release_switches_to_short_timer() {
        let mut session = RecordingSession::new();
        let start = Instant::now();
        session.on_key_down(VK_CONTROL, ctrl(), start).unwrap();
        session
            .on_key_down(VK_Q, ctrl(), start + Duration::from_millis(100))
            .unwrap();
        session.on_key_up(VK_Q, ctrl(), start + Duration::from_millis(200));
        session.on_key_up(VK_CONTROL, Modifiers::default(), start + Duration::from_millis(250));

        let release_deadline = start + Duration::from_millis(250) + RELEASE_TIMEOUT;
        assert!(!session.finalize_due(release_deadline - Duration::from_millis(1)));
        assert!(session.finalize_due(release_deadline));

        let combination = session.finalize().unwrap();
        assert_eq!(combination.canonical(), "Ctrl+Q");
    }

    #[test]
    fn quiescence_timer_restarts_on_every_press() {
        let mut session = RecordingSession::new();
        let start = Instant::now();
        session.on_key_down(VK_Q, Modifiers::default(), start).unwrap();
        let second_press = start + Duration::from_millis(1500);
        session.on_key_down(0x20, Modifiers::default(), second_press).unwrap();

        assert!(!session.finalize_due(start + QUIESCENCE_TIMEOUT));
        assert!(session.finalize_due(second_press + QUIESCENCE_TIMEOUT));
        assert_eq!(session.current_combination(), "Q+Space");
    }

    #[test]
    fn modifier_only_session_finalizes_to_nothing() {
        let mut session = RecordingSession::new();
        let start = Instant::now();
        session.on_key_down(VK_CONTROL, ctrl(), start).unwrap();
        session.on_key_up(VK_CONTROL, Modifiers::default(), start + Duration::from_millis(80));
        assert_eq!(session.current_combination(), "Ctrl");
        assert!(session.finalize().is_none());
    }

    #[test]
    fn unsupported_key_is_reported_but_tracked_for_release() {
        let mut session = RecordingSession::new();
        let start = Instant::now();
        assert!(session.on_key_down(0xE8, Modifiers::default(), start).is_err());
        assert_eq!(session.held_count(), 1);
        assert_eq!(session.current_combination(), "");
        session.on_key_up(0xE8, Modifiers::default(), start + Duration::from_millis(40));
        assert_eq!(session.held_count(), 0);
    }
}
