use std::fmt::{Display, Formatter};

use crate::keymap::{self, KeymapError};

/// Modifier flags in their canonical display order: Ctrl, Alt, Shift, Win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub win: bool,
}

impl Modifiers {
    pub fn is_empty(&self) -> bool {
        !(self.ctrl || self.alt || self.shift || self.win)
    }

    pub fn canonical_parts(&self) -> Vec<&'static str> {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.alt {
            parts.push("Alt");
        }
        if self.shift {
            parts.push("Shift");
        }
        if self.win {
            parts.push("Win");
        }
        parts
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HotkeyParseError {
    Empty,
    NoBaseKey,
    UnknownKey(KeymapError),
}

impl Display for HotkeyParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "hotkey is empty"),
            Self::NoBaseKey => write!(f, "hotkey has no base key"),
            Self::UnknownKey(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for HotkeyParseError {}

impl From<KeymapError> for HotkeyParseError {
    fn from(value: KeymapError) -> Self {
        Self::UnknownKey(value)
    }
}

/// A modifier set plus one or more base keys, held in canonical form:
/// base keys are table spellings, alphabetically sorted, deduplicated.
///
/// Only the first base key can ever reach the OS registration layer; the
/// remaining ones survive in the display/persisted string only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotkeyCombination {
    pub modifiers: Modifiers,
    base_keys: Vec<&'static str>,
}

impl HotkeyCombination {
    pub fn new<I, S>(modifiers: Modifiers, base_keys: I) -> Result<Self, HotkeyParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut resolved = Vec::new();
        for key in base_keys {
            let canonical = keymap::canonical_name(key.as_ref())?;
            if !resolved.contains(&canonical) {
                resolved.push(canonical);
            }
        }
        if resolved.is_empty() {
            return Err(HotkeyParseError::NoBaseKey);
        }
        resolved.sort_unstable();
        Ok(Self {
            modifiers,
            base_keys: resolved,
        })
    }

    /// Parse a `+`-separated combination. Modifier aliases (control, meta,
    /// super, windows) and arbitrary case/whitespace are accepted; the
    /// result is always canonical.
    pub fn parse(input: &str) -> Result<Self, HotkeyParseError> {
        let parts: Vec<&str> = input
            .split('+')
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect();
        if parts.is_empty() {
            return Err(HotkeyParseError::Empty);
        }

        let mut modifiers = Modifiers::default();
        let mut base_keys = Vec::new();
        for part in parts {
            match parse_modifier(part) {
                Some(ModifierToken::Ctrl) => modifiers.ctrl = true,
                Some(ModifierToken::Alt) => modifiers.alt = true,
                Some(ModifierToken::Shift) => modifiers.shift = true,
                Some(ModifierToken::Win) => modifiers.win = true,
                None => base_keys.push(part),
            }
        }

        Self::new(modifiers, base_keys)
    }

    pub fn base_keys(&self) -> &[&'static str] {
        &self.base_keys
    }

    /// The single base key the OS registration layer will see.
    pub fn primary_base_key(&self) -> &'static str {
        self.base_keys[0]
    }

    pub fn primary_vk_code(&self) -> u32 {
        keymap::vk_code(self.base_keys[0]).expect("canonical base keys always resolve")
    }

    pub fn canonical(&self) -> String {
        let mut parts = self.modifiers.canonical_parts();
        parts.extend(self.base_keys.iter().copied());
        parts.join("+")
    }
}

impl Display for HotkeyCombination {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

enum ModifierToken {
    Ctrl,
    Alt,
    Shift,
    Win,
}

fn parse_modifier(part: &str) -> Option<ModifierToken> {
    match part.to_ascii_lowercase().as_str() {
        "ctrl" | "control" => Some(ModifierToken::Ctrl),
        "alt" => Some(ModifierToken::Alt),
        "shift" => Some(ModifierToken::Shift),
        "win" | "windows" | "meta" | "super" => Some(ModifierToken::Win),
        _ => None,
    }
}
