use log::debug;

/// One auto-start program entry read from the OS store.
///
/// `enabled` is a placeholder: the store is read-only here and per-entry
/// disable state is not implemented, so every entry reports true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupEntry {
    pub name: String,
    pub command: String,
    pub enabled: bool,
}

/// Read the user's auto-start entries, sorted by name. An absent store is
/// normal and yields an empty list; this call never fails.
#[cfg(windows)]
pub fn list_entries() -> Vec<StartupEntry> {
    let mut entries = read_run_key();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}

/// Read the user's auto-start entries, sorted by name. An absent store is
/// normal and yields an empty list; this call never fails.
#[cfg(not(windows))]
pub fn list_entries() -> Vec<StartupEntry> {
    let Some(dir) = dirs::config_dir().map(|d| d.join("autostart")) else {
        debug!("no config directory; reporting no startup entries");
        return Vec::new();
    };
    read_autostart_dir(&dir)
}

/// Enumerate string values of the per-user Run registry key. Value name is
/// the entry name, value data the launch command.
#[cfg(windows)]
fn read_run_key() -> Vec<StartupEntry> {
    use std::os::windows::ffi::OsStrExt;
    use windows_sys::Win32::Foundation::{ERROR_NO_MORE_ITEMS, ERROR_SUCCESS};
    use windows_sys::Win32::System::Registry::{
        RegCloseKey, RegEnumValueW, RegOpenKeyExW, HKEY, HKEY_CURRENT_USER, KEY_READ,
        REG_EXPAND_SZ, REG_SZ,
    };

    let subkey: Vec<u16> = std::ffi::OsStr::new(r"Software\Microsoft\Windows\CurrentVersion\Run")
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();

    let mut hkey: HKEY = std::ptr::null_mut();
    let status = unsafe { RegOpenKeyExW(HKEY_CURRENT_USER, subkey.as_ptr(), 0, KEY_READ, &mut hkey) };
    if status != ERROR_SUCCESS {
        debug!("Run key not readable (status {status}); reporting no startup entries");
        return Vec::new();
    }

    let mut entries = Vec::new();
    let mut index = 0u32;
    loop {
        let mut name_buf = [0u16; 256];
        let mut name_len = name_buf.len() as u32;
        let mut value_type = 0u32;
        let mut data_buf = [0u8; 4096];
        let mut data_len = data_buf.len() as u32;
        let status = unsafe {
            RegEnumValueW(
                hkey,
                index,
                name_buf.as_mut_ptr(),
                &mut name_len,
                std::ptr::null_mut(),
                &mut value_type,
                data_buf.as_mut_ptr(),
                &mut data_len,
            )
        };
        if status == ERROR_NO_MORE_ITEMS {
            break;
        }
        index += 1;
        if status != ERROR_SUCCESS {
            // Oversized or concurrently changed value: skip it.
            continue;
        }
        if value_type != REG_SZ && value_type != REG_EXPAND_SZ {
            continue;
        }
        let name = String::from_utf16_lossy(&name_buf[..name_len as usize]);
        let data: Vec<u16> = data_buf[..data_len as usize]
            .chunks_exact(2)
            .map(|c| u16::from_le_bytes([c[0], c[1]]))
            .collect();
        let command = String::from_utf16_lossy(&data)
            .trim_end_matches('\0')
            .to_string();
        entries.push(StartupEntry {
            name,
            command,
            enabled: true,
        });
    }
    unsafe { RegCloseKey(hkey) };
    entries
}

/// One entry per readable `*.desktop` file. Files that cannot be read or
/// carry no launch command are skipped individually.
#[cfg(not(windows))]
fn read_autostart_dir(dir: &std::path::Path) -> Vec<StartupEntry> {
    let Ok(read_dir) = std::fs::read_dir(dir) else {
        debug!("autostart store absent at {}", dir.display());
        return Vec::new();
    };

    let mut entries = Vec::new();
    for entry in read_dir.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("desktop") {
            continue;
        }
        let Ok(text) = std::fs::read_to_string(&path) else {
            debug!("skipping unreadable autostart file {}", path.display());
            continue;
        };
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        if let Some(parsed) = parse_desktop_entry(&text, &stem) {
            entries.push(parsed);
        }
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}

/// Pull `Name=` and `Exec=` out of the `[Desktop Entry]` section. `Exec=` is
/// required; the name falls back to the file stem.
#[cfg(not(windows))]
fn parse_desktop_entry(text: &str, fallback_name: &str) -> Option<StartupEntry> {
    let mut name: Option<String> = None;
    let mut command: Option<String> = None;
    let mut in_entry_section = false;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('[') {
            in_entry_section = line == "[Desktop Entry]";
            continue;
        }
        if !in_entry_section {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            match key.trim() {
                "Name" if name.is_none() => name = Some(value.trim().to_string()),
                "Exec" if command.is_none() => command = Some(value.trim().to_string()),
                _ => {}
            }
        }
    }

    Some(StartupEntry {
        name: name.unwrap_or_else(|| fallback_name.to_string()),
        command: command?,
        enabled: true,
    })
}
