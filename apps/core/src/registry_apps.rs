//! Installed-program lookup through the Windows registry App Paths keys.
//!
//! Supplements the filesystem walk when it finds few matches. Read-only;
//! failures degrade to an empty result set.

#[cfg(target_os = "windows")]
use crate::model::{normalize_for_match, EntryKind};
use crate::model::ResultEntry;

#[cfg(target_os = "windows")]
pub fn scan_installed_apps(query: &str, limit: usize) -> Vec<ResultEntry> {
    use windows_sys::Win32::Foundation::ERROR_SUCCESS;
    use windows_sys::Win32::System::Registry::{
        RegCloseKey, RegEnumKeyExW, RegOpenKeyExW, HKEY, HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE,
        KEY_ENUMERATE_SUB_KEYS, KEY_QUERY_VALUE, KEY_READ,
    };

    const APP_PATHS_SUBKEY: &str = r"SOFTWARE\Microsoft\Windows\CurrentVersion\App Paths";
    const ROOTS: [HKEY; 2] = [HKEY_LOCAL_MACHINE, HKEY_CURRENT_USER];

    let needle = normalize_for_match(query);
    if needle.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut results = Vec::new();
    let subkey_wide = to_wide(APP_PATHS_SUBKEY);

    for root in ROOTS {
        let mut key = std::ptr::null_mut();
        let status = unsafe {
            RegOpenKeyExW(
                root,
                subkey_wide.as_ptr(),
                0,
                KEY_READ | KEY_ENUMERATE_SUB_KEYS,
                &mut key,
            )
        };
        if status != ERROR_SUCCESS {
            continue;
        }

        let mut index = 0;
        loop {
            let mut name_buffer = [0_u16; 256];
            let mut name_len = name_buffer.len() as u32;
            let status = unsafe {
                RegEnumKeyExW(
                    key,
                    index,
                    name_buffer.as_mut_ptr(),
                    &mut name_len,
                    std::ptr::null(),
                    std::ptr::null_mut(),
                    std::ptr::null_mut(),
                    std::ptr::null_mut(),
                )
            };
            if status != ERROR_SUCCESS {
                break;
            }
            index += 1;

            let entry_name = String::from_utf16_lossy(&name_buffer[..name_len as usize]);
            let display_name = entry_name
                .strip_suffix(".exe")
                .or_else(|| entry_name.strip_suffix(".EXE"))
                .unwrap_or(&entry_name)
                .to_string();
            if !normalize_for_match(&display_name).contains(&needle) {
                continue;
            }

            let mut subkey = std::ptr::null_mut();
            let entry_wide = to_wide(&entry_name);
            let status = unsafe {
                RegOpenKeyExW(key, entry_wide.as_ptr(), 0, KEY_QUERY_VALUE, &mut subkey)
            };
            if status != ERROR_SUCCESS {
                continue;
            }

            if let Some(path) = read_default_string_value(subkey) {
                if std::path::Path::new(&path).exists() {
                    results.push(ResultEntry::from_owned(display_name, path, EntryKind::App));
                }
            }
            unsafe {
                RegCloseKey(subkey);
            }

            if results.len() >= limit {
                break;
            }
        }

        unsafe {
            RegCloseKey(key);
        }
        if results.len() >= limit {
            break;
        }
    }

    results
}

#[cfg(target_os = "windows")]
fn read_default_string_value(key: windows_sys::Win32::System::Registry::HKEY) -> Option<String> {
    use windows_sys::Win32::Foundation::ERROR_SUCCESS;
    use windows_sys::Win32::System::Registry::{RegQueryValueExW, REG_EXPAND_SZ, REG_SZ};

    let mut value_type = 0_u32;
    let mut size = 0_u32;
    let status = unsafe {
        RegQueryValueExW(
            key,
            std::ptr::null(),
            std::ptr::null(),
            &mut value_type,
            std::ptr::null_mut(),
            &mut size,
        )
    };
    if status != ERROR_SUCCESS || size == 0 {
        return None;
    }
    if value_type != REG_SZ && value_type != REG_EXPAND_SZ {
        return None;
    }

    let mut buffer = vec![0_u16; (size as usize).div_ceil(2)];
    let status = unsafe {
        RegQueryValueExW(
            key,
            std::ptr::null(),
            std::ptr::null(),
            &mut value_type,
            buffer.as_mut_ptr() as *mut u8,
            &mut size,
        )
    };
    if status != ERROR_SUCCESS {
        return None;
    }

    let end = buffer.iter().position(|&c| c == 0).unwrap_or(buffer.len());
    let value = String::from_utf16_lossy(&buffer[..end]);
    let trimmed = value.trim().trim_matches('"').to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(target_os = "windows")]
fn to_wide(value: &str) -> Vec<u16> {
    value.encode_utf16().chain(std::iter::once(0)).collect()
}

#[cfg(not(target_os = "windows"))]
pub fn scan_installed_apps(_query: &str, _limit: usize) -> Vec<ResultEntry> {
    Vec::new()
}
