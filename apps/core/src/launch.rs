use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchError {
    EmptyPath,
    MissingPath(PathBuf),
    ShellOpen { path: PathBuf, code: usize },
}

impl Display for LaunchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPath => write!(f, "empty path"),
            Self::MissingPath(path) => write!(f, "path does not exist: {}", path.display()),
            Self::ShellOpen { path, code } => {
                write!(f, "shell open failed for {} (code {code})", path.display())
            }
        }
    }
}

impl std::error::Error for LaunchError {}

/// Open a file or program through the platform shell. `.lnk` shortcuts are
/// resolved by the shell itself. On non-Windows builds only the validation
/// half runs, which keeps the call path testable everywhere.
pub fn open_path(path: &str) -> Result<(), LaunchError> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return Err(LaunchError::EmptyPath);
    }

    let candidate = Path::new(trimmed);
    if !candidate.exists() {
        return Err(LaunchError::MissingPath(candidate.to_path_buf()));
    }

    shell_open(candidate)
}

#[cfg(target_os = "windows")]
fn shell_open(path: &Path) -> Result<(), LaunchError> {
    use windows_sys::Win32::UI::Shell::ShellExecuteW;
    use windows_sys::Win32::UI::WindowsAndMessaging::SW_SHOWNORMAL;

    let operation = to_wide("open");
    let target = to_wide(&path.to_string_lossy());
    let result = unsafe {
        ShellExecuteW(
            std::ptr::null_mut(),
            operation.as_ptr(),
            target.as_ptr(),
            std::ptr::null(),
            std::ptr::null(),
            SW_SHOWNORMAL,
        )
    };

    // Per ShellExecute contract, values <= 32 are error codes.
    let code = result as usize;
    if code <= 32 {
        return Err(LaunchError::ShellOpen {
            path: path.to_path_buf(),
            code,
        });
    }
    Ok(())
}

#[cfg(not(target_os = "windows"))]
fn shell_open(_path: &Path) -> Result<(), LaunchError> {
    Ok(())
}

#[cfg(target_os = "windows")]
fn to_wide(value: &str) -> Vec<u16> {
    value.encode_utf16().chain(std::iter::once(0)).collect()
}

#[cfg(test)]
mod tests {
    use super::{open_path, LaunchError};

    #[test]
    fn rejects_empty_and_missing_paths() {
        assert_eq!(open_path("   "), Err(LaunchError::EmptyPath));
        assert!(matches!(
            open_path("/definitely/not/here.exe"),
            Err(LaunchError::MissingPath(_))
        ));
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn validates_existing_path_off_windows() {
        let path = std::env::temp_dir().join(format!("glint-launch-{}.tmp", std::process::id()));
        std::fs::write(&path, b"ok").unwrap();
        assert!(open_path(path.to_string_lossy().as_ref()).is_ok());
        std::fs::remove_file(path).unwrap();
    }
}
