//! System command table and `volume <0-100>` parsing.

use std::fmt::{Display, Formatter};

pub struct SystemCommand {
    pub keyword: &'static str,
    pub title: &'static str,
    pub command: &'static str,
}

pub const COMMANDS: [SystemCommand; 13] = [
    SystemCommand {
        keyword: "shutdown",
        title: "Shutdown Computer",
        command: "shutdown /s /t 1",
    },
    SystemCommand {
        keyword: "restart",
        title: "Restart Computer",
        command: "shutdown /r /t 1",
    },
    SystemCommand {
        keyword: "sleep",
        title: "Sleep Mode",
        command: "rundll32.exe powrprof.dll,SetSuspendState 0,1,0",
    },
    SystemCommand {
        keyword: "lock",
        title: "Lock Computer",
        command: "rundll32.exe user32.dll,LockWorkStation",
    },
    SystemCommand {
        keyword: "logout",
        title: "Log Out",
        command: "shutdown /l",
    },
    SystemCommand {
        keyword: "taskmanager",
        title: "Task Manager",
        command: "taskmgr",
    },
    SystemCommand {
        keyword: "cmd",
        title: "Command Prompt",
        command: "cmd",
    },
    SystemCommand {
        keyword: "powershell",
        title: "PowerShell",
        command: "powershell",
    },
    SystemCommand {
        keyword: "control",
        title: "Control Panel",
        command: "control",
    },
    SystemCommand {
        keyword: "calculator",
        title: "Calculator",
        command: "calc",
    },
    SystemCommand {
        keyword: "notepad",
        title: "Notepad",
        command: "notepad",
    },
    SystemCommand {
        keyword: "paint",
        title: "Paint",
        command: "mspaint",
    },
    SystemCommand {
        keyword: "explorer",
        title: "File Explorer",
        command: "explorer",
    },
];

#[derive(Debug)]
pub enum SystemCommandError {
    Spawn(std::io::Error),
    UnsupportedPlatform,
}

impl Display for SystemCommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Spawn(error) => write!(f, "failed to start command: {error}"),
            Self::UnsupportedPlatform => write!(f, "system commands unsupported on this platform"),
        }
    }
}

impl std::error::Error for SystemCommandError {}

pub fn lookup(query: &str) -> Option<&'static SystemCommand> {
    let keyword = query.trim().to_ascii_lowercase();
    COMMANDS.iter().find(|command| command.keyword == keyword)
}

/// `volume 40` -> (title, nircmd invocation). The scale factor maps 0-100
/// onto the mixer's 0-65535 range.
pub fn parse_volume(query: &str) -> Option<(String, String)> {
    let rest = query.trim().to_ascii_lowercase();
    let rest = rest.strip_prefix("volume")?.trim();
    let level: u32 = rest.parse().ok()?;
    if level > 100 {
        return None;
    }
    let scaled = (level as f64 * 655.35) as u32;
    Some((
        format!("Volume level {level}%"),
        format!("nircmd.exe setsysvolume {scaled}"),
    ))
}

#[cfg(target_os = "windows")]
pub fn execute(command: &str) -> Result<(), SystemCommandError> {
    std::process::Command::new("cmd")
        .args(["/C", command])
        .spawn()
        .map(|_| ())
        .map_err(SystemCommandError::Spawn)
}

#[cfg(not(target_os = "windows"))]
pub fn execute(_command: &str) -> Result<(), SystemCommandError> {
    Err(SystemCommandError::UnsupportedPlatform)
}

#[cfg(test)]
mod tests {
    use super::{lookup, parse_volume};

    #[test]
    fn looks_up_commands_case_insensitively() {
        assert_eq!(lookup("Lock").unwrap().title, "Lock Computer");
        assert_eq!(lookup(" taskmanager ").unwrap().command, "taskmgr");
        assert!(lookup("fly").is_none());
    }

    #[test]
    fn parses_volume_levels_in_range() {
        let (title, command) = parse_volume("volume 40").unwrap();
        assert_eq!(title, "Volume level 40%");
        assert_eq!(command, "nircmd.exe setsysvolume 26214");
        assert!(parse_volume("volume 101").is_none());
        assert!(parse_volume("volume loud").is_none());
        assert!(parse_volume("mute").is_none());
    }
}
