//! Run-at-login entry under the per-user Run key. All three operations are
//! idempotent: enabling twice, disabling an absent entry, and querying an
//! absent key are all fine.

use std::fmt::{Display, Formatter};
use std::path::Path;

#[derive(Debug)]
pub enum StartupError {
    InvalidExecutable(String),
    Registry { action: &'static str, code: u32 },
    UnsupportedPlatform,
}

impl Display for StartupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidExecutable(detail) => write!(f, "invalid executable: {detail}"),
            Self::Registry { action, code } => {
                write!(f, "registry {action} failed with code {code}")
            }
            Self::UnsupportedPlatform => write!(f, "startup entries unsupported on this platform"),
        }
    }
}

impl std::error::Error for StartupError {}

#[cfg(target_os = "windows")]
const RUN_SUBKEY: &str = r"Software\Microsoft\Windows\CurrentVersion\Run";
/// Fixed value name keying Glint's single startup entry.
pub const STARTUP_VALUE_NAME: &str = "Glint";
pub const STARTUP_ARG: &str = "--background";

/// The command line stored in the Run value: quoted executable path plus
/// the background flag so a login start skips straight to the tray loop.
pub fn startup_command(executable_path: &Path) -> Result<String, StartupError> {
    if executable_path.as_os_str().is_empty() {
        return Err(StartupError::InvalidExecutable(
            "executable path is empty".to_string(),
        ));
    }
    if !executable_path.is_file() {
        return Err(StartupError::InvalidExecutable(format!(
            "not a file: {}",
            executable_path.display()
        )));
    }

    Ok(format!(
        "\"{}\" {}",
        executable_path.to_string_lossy(),
        STARTUP_ARG
    ))
}

#[cfg(target_os = "windows")]
mod imp {
    use super::{startup_command, StartupError, RUN_SUBKEY, STARTUP_VALUE_NAME};
    use std::path::Path;

    use windows_sys::Win32::Foundation::{ERROR_FILE_NOT_FOUND, ERROR_SUCCESS};
    use windows_sys::Win32::System::Registry::{
        RegCloseKey, RegCreateKeyExW, RegDeleteValueW, RegOpenKeyExW, RegQueryValueExW,
        RegSetValueExW, HKEY, HKEY_CURRENT_USER, KEY_QUERY_VALUE, KEY_SET_VALUE, REG_SZ,
    };

    struct RunKey(HKEY);

    impl Drop for RunKey {
        fn drop(&mut self) {
            unsafe {
                RegCloseKey(self.0);
            }
        }
    }

    fn open_run_key(access: u32, create: bool) -> Result<Option<RunKey>, StartupError> {
        let subkey = to_wide(RUN_SUBKEY);
        let mut key = std::ptr::null_mut();
        let status = if create {
            unsafe {
                RegCreateKeyExW(
                    HKEY_CURRENT_USER,
                    subkey.as_ptr(),
                    0,
                    std::ptr::null(),
                    0,
                    access,
                    std::ptr::null(),
                    &mut key,
                    std::ptr::null_mut(),
                )
            }
        } else {
            unsafe { RegOpenKeyExW(HKEY_CURRENT_USER, subkey.as_ptr(), 0, access, &mut key) }
        };

        if status == ERROR_FILE_NOT_FOUND {
            return Ok(None);
        }
        if status != ERROR_SUCCESS {
            return Err(StartupError::Registry {
                action: "open run key",
                code: status,
            });
        }
        Ok(Some(RunKey(key)))
    }

    pub fn is_enabled() -> Result<bool, StartupError> {
        let Some(key) = open_run_key(KEY_QUERY_VALUE, false)? else {
            return Ok(false);
        };

        let value_name = to_wide(STARTUP_VALUE_NAME);
        let mut value_type = 0_u32;
        let mut size = 0_u32;
        let status = unsafe {
            RegQueryValueExW(
                key.0,
                value_name.as_ptr(),
                std::ptr::null(),
                &mut value_type,
                std::ptr::null_mut(),
                &mut size,
            )
        };

        if status == ERROR_FILE_NOT_FOUND {
            return Ok(false);
        }
        if status != ERROR_SUCCESS {
            return Err(StartupError::Registry {
                action: "query run value",
                code: status,
            });
        }
        Ok(true)
    }

    pub fn set_enabled(enabled: bool, executable_path: &Path) -> Result<(), StartupError> {
        if enabled {
            let command = startup_command(executable_path)?;
            let key = open_run_key(KEY_SET_VALUE, true)?.ok_or(StartupError::Registry {
                action: "create run key",
                code: ERROR_FILE_NOT_FOUND,
            })?;

            let value_name = to_wide(STARTUP_VALUE_NAME);
            let value = to_wide(&command);
            let status = unsafe {
                RegSetValueExW(
                    key.0,
                    value_name.as_ptr(),
                    0,
                    REG_SZ,
                    value.as_ptr() as *const u8,
                    (value.len() * std::mem::size_of::<u16>()) as u32,
                )
            };
            if status != ERROR_SUCCESS {
                return Err(StartupError::Registry {
                    action: "set run value",
                    code: status,
                });
            }
            return Ok(());
        }

        let Some(key) = open_run_key(KEY_SET_VALUE, false)? else {
            return Ok(());
        };
        let value_name = to_wide(STARTUP_VALUE_NAME);
        let status = unsafe { RegDeleteValueW(key.0, value_name.as_ptr()) };
        if status == ERROR_SUCCESS || status == ERROR_FILE_NOT_FOUND {
            return Ok(());
        }
        Err(StartupError::Registry {
            action: "delete run value",
            code: status,
        })
    }

    fn to_wide(value: &str) -> Vec<u16> {
        value.encode_utf16().chain(std::iter::once(0)).collect()
    }
}

#[cfg(target_os = "windows")]
pub use imp::{is_enabled, set_enabled};

#[cfg(not(target_os = "windows"))]
pub fn is_enabled() -> Result<bool, StartupError> {
    Err(StartupError::UnsupportedPlatform)
}

#[cfg(not(target_os = "windows"))]
pub fn set_enabled(_enabled: bool, _executable_path: &Path) -> Result<(), StartupError> {
    Err(StartupError::UnsupportedPlatform)
}

/// Bring the OS entry in line with `launch_at_startup`. Returns whether a
/// registry write happened. Non-fatal at the call site; the runtime logs
/// and continues on error.
pub fn sync_with_config(
    launch_at_startup: bool,
    executable_path: &Path,
) -> Result<bool, StartupError> {
    let currently = is_enabled()?;
    if currently == launch_at_startup {
        return Ok(false);
    }
    set_enabled(launch_at_startup, executable_path)?;
    Ok(true)
}
