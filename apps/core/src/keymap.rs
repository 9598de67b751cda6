//! Key-name to virtual-key-code table.
//!
//! Every key Glint can record or register is listed here explicitly. An
//! unrecognized name is an error; there is no synthesized fallback code, so
//! a persisted combination resolves to the same codes on every run.

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeymapError {
    UnsupportedKey(String),
    UnsupportedCode(u32),
}

impl Display for KeymapError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedKey(name) => write!(f, "unsupported key: {name}"),
            Self::UnsupportedCode(code) => write!(f, "unsupported virtual-key code: {code:#04x}"),
        }
    }
}

impl std::error::Error for KeymapError {}

/// Canonical name / virtual-key code pairs. Codes are unique so the
/// name function round-trips: `key_name(vk_code(n)) == n` for every entry.
const KEY_TABLE: &[(&str, u32)] = &[
    // Letters
    ("A", 0x41),
    ("B", 0x42),
    ("C", 0x43),
    ("D", 0x44),
    ("E", 0x45),
    ("F", 0x46),
    ("G", 0x47),
    ("H", 0x48),
    ("I", 0x49),
    ("J", 0x4A),
    ("K", 0x4B),
    ("L", 0x4C),
    ("M", 0x4D),
    ("N", 0x4E),
    ("O", 0x4F),
    ("P", 0x50),
    ("Q", 0x51),
    ("R", 0x52),
    ("S", 0x53),
    ("T", 0x54),
    ("U", 0x55),
    ("V", 0x56),
    ("W", 0x57),
    ("X", 0x58),
    ("Y", 0x59),
    ("Z", 0x5A),
    // Digits
    ("0", 0x30),
    ("1", 0x31),
    ("2", 0x32),
    ("3", 0x33),
    ("4", 0x34),
    ("5", 0x35),
    ("6", 0x36),
    ("7", 0x37),
    ("8", 0x38),
    ("9", 0x39),
    // Function keys
    ("F1", 0x70),
    ("F2", 0x71),
    ("F3", 0x72),
    ("F4", 0x73),
    ("F5", 0x74),
    ("F6", 0x75),
    ("F7", 0x76),
    ("F8", 0x77),
    ("F9", 0x78),
    ("F10", 0x79),
    ("F11", 0x7A),
    ("F12", 0x7B),
    ("F13", 0x7C),
    ("F14", 0x7D),
    ("F15", 0x7E),
    ("F16", 0x7F),
    ("F17", 0x80),
    ("F18", 0x81),
    ("F19", 0x82),
    ("F20", 0x83),
    ("F21", 0x84),
    ("F22", 0x85),
    ("F23", 0x86),
    ("F24", 0x87),
    // Control and navigation keys
    ("Space", 0x20),
    ("Tab", 0x09),
    ("Enter", 0x0D),
    ("Escape", 0x1B),
    ("Backspace", 0x08),
    ("Delete", 0x2E),
    ("Insert", 0x2D),
    ("Home", 0x24),
    ("End", 0x23),
    ("PageUp", 0x21),
    ("PageDown", 0x22),
    ("Left", 0x25),
    ("Up", 0x26),
    ("Right", 0x27),
    ("Down", 0x28),
    ("CapsLock", 0x14),
    ("NumLock", 0x90),
    ("ScrollLock", 0x91),
    ("PrintScreen", 0x2C),
    ("Pause", 0x13),
    ("Menu", 0x5D),
    // Punctuation (US layout positions)
    (";", 0xBA),
    ("=", 0xBB),
    (",", 0xBC),
    ("-", 0xBD),
    (".", 0xBE),
    ("/", 0xBF),
    ("`", 0xC0),
    ("[", 0xDB),
    ("\\", 0xDC),
    ("]", 0xDD),
    ("'", 0xDE),
    // Numpad
    ("Numpad0", 0x60),
    ("Numpad1", 0x61),
    ("Numpad2", 0x62),
    ("Numpad3", 0x63),
    ("Numpad4", 0x64),
    ("Numpad5", 0x65),
    ("Numpad6", 0x66),
    ("Numpad7", 0x67),
    ("Numpad8", 0x68),
    ("Numpad9", 0x69),
    ("NumpadAdd", 0x6B),
    ("NumpadSubtract", 0x6D),
    ("NumpadMultiply", 0x6A),
    ("NumpadDivide", 0x6F),
    ("NumpadDecimal", 0x6E),
    // Media keys
    ("VolumeUp", 0xAF),
    ("VolumeDown", 0xAE),
    ("VolumeMute", 0xAD),
    ("MediaNext", 0xB0),
    ("MediaPrev", 0xB1),
    ("MediaStop", 0xB2),
    ("MediaPlay", 0xB3),
    // Browser keys
    ("BrowserBack", 0xA6),
    ("BrowserForward", 0xA7),
    ("BrowserRefresh", 0xA8),
    ("BrowserStop", 0xA9),
    ("BrowserSearch", 0xAA),
    ("BrowserFavorites", 0xAB),
    ("BrowserHome", 0xAC),
    // Misc
    ("Sleep", 0x5F),
    ("Clear", 0x0C),
    ("Select", 0x29),
    ("Help", 0x2F),
];

// Left/right variants report distinct codes on key events even though
// registration only ever sees the generic modifier bitmask.
const MODIFIER_CODES: &[u32] = &[
    0x10, // Shift
    0x11, // Control
    0x12, // Alt
    0x5B, // left Win
    0x5C, // right Win
    0xA0, 0xA1, // left/right Shift
    0xA2, 0xA3, // left/right Control
    0xA4, 0xA5, // left/right Alt
];

/// Resolve a key name to its canonical table spelling, case-insensitively.
pub fn canonical_name(name: &str) -> Result<&'static str, KeymapError> {
    let trimmed = name.trim();
    KEY_TABLE
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(trimmed))
        .map(|(candidate, _)| *candidate)
        .ok_or_else(|| KeymapError::UnsupportedKey(trimmed.to_string()))
}

pub fn vk_code(name: &str) -> Result<u32, KeymapError> {
    let trimmed = name.trim();
    KEY_TABLE
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(trimmed))
        .map(|(_, code)| *code)
        .ok_or_else(|| KeymapError::UnsupportedKey(trimmed.to_string()))
}

pub fn key_name(code: u32) -> Result<&'static str, KeymapError> {
    KEY_TABLE
        .iter()
        .find(|(_, candidate)| *candidate == code)
        .map(|(name, _)| *name)
        .ok_or(KeymapError::UnsupportedCode(code))
}

pub fn is_modifier_code(code: u32) -> bool {
    MODIFIER_CODES.contains(&code)
}
