//! Typed configuration with a fixed key schema.
//!
//! Every setting is a named field with a documented default; values are
//! validated at load time. Unknown keys in the file are ignored and missing
//! keys fall back to their defaults, so older or hand-edited files keep
//! loading.

use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::hotkey::HotkeyCombination;

pub const DEFAULT_HOTKEY: &str = "Ctrl+Space";
pub const DEFAULT_SEARCH_DELAY_MS: u32 = 140;
pub const DEFAULT_MAX_RESULTS: u16 = 50;
pub const DEFAULT_WINDOW_OPACITY: u8 = 95;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    Info,
    Debug,
}

impl Default for Verbosity {
    fn default() -> Self {
        Self::Info
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub hotkey_toggle: String,
    pub search_delay_ms: u32,
    pub max_results: u16,
    pub window_opacity: u8,
    pub launch_at_startup: bool,
    pub verbosity: Verbosity,
    pub search_roots: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hotkey_toggle: DEFAULT_HOTKEY.to_string(),
            search_delay_ms: DEFAULT_SEARCH_DELAY_MS,
            max_results: DEFAULT_MAX_RESULTS,
            window_opacity: DEFAULT_WINDOW_OPACITY,
            launch_at_startup: true,
            verbosity: Verbosity::default(),
            search_roots: default_search_roots(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(error) => write!(f, "io error: {error}"),
            Self::Parse(error) => write!(f, "config parse error: {error}"),
            Self::Serialize(error) => write!(f, "config serialize error: {error}"),
            Self::Invalid(detail) => write!(f, "invalid config: {detail}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

pub fn stable_app_data_dir() -> PathBuf {
    if let Some(local) = std::env::var_os("LOCALAPPDATA") {
        return PathBuf::from(local).join("Glint");
    }
    if let Some(home) = std::env::var_os("HOME") {
        return PathBuf::from(home).join(".local").join("share").join("glint");
    }
    std::env::temp_dir().join("glint")
}

pub fn default_config_path() -> PathBuf {
    stable_app_data_dir().join("config.toml")
}

pub fn default_usage_db_path() -> PathBuf {
    stable_app_data_dir().join("usage.sqlite3")
}

fn default_search_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();
    let profile = std::env::var_os("USERPROFILE")
        .or_else(|| std::env::var_os("HOME"))
        .map(PathBuf::from);
    if let Some(profile) = profile {
        for folder in ["Desktop", "Downloads", "Documents"] {
            roots.push(profile.join(folder));
        }
        roots.push(profile.join("OneDrive").join("Desktop"));
        roots.push(profile.join("OneDrive").join("Documents"));
    }
    if cfg!(target_os = "windows") {
        roots.push(PathBuf::from("C:\\Program Files"));
        roots.push(PathBuf::from("C:\\Program Files (x86)"));
        roots.push(PathBuf::from("C:\\Users\\Public\\Desktop"));
    }
    roots
}

/// Load from `path`, or the default location when `None`. A missing file
/// yields the defaults.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    let config = match std::fs::read_to_string(&path) {
        Ok(raw) => toml::from_str(&raw).map_err(ConfigError::Parse)?,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Config::default(),
        Err(error) => return Err(ConfigError::Io(error)),
    };
    validate(&config)?;
    Ok(config)
}

pub fn save(config: &Config, path: &Path) -> Result<(), ConfigError> {
    validate(config)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let rendered = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;
    std::fs::write(path, rendered)?;
    Ok(())
}

pub fn validate(config: &Config) -> Result<(), ConfigError> {
    HotkeyCombination::parse(&config.hotkey_toggle)
        .map_err(|error| ConfigError::Invalid(format!("hotkey_toggle: {error}")))?;
    if !(5..=100).contains(&config.max_results) {
        return Err(ConfigError::Invalid(
            "max_results must be between 5 and 100".to_string(),
        ));
    }
    if !(20..=100).contains(&config.window_opacity) {
        return Err(ConfigError::Invalid(
            "window_opacity must be between 20 and 100".to_string(),
        ));
    }
    if config.search_delay_ms > 2_000 {
        return Err(ConfigError::Invalid(
            "search_delay_ms must be at most 2000".to_string(),
        ));
    }
    Ok(())
}
