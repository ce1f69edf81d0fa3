use std::path::Path;

pub struct DiskInfo {
    pub total: u64,
    pub available: u64,
    pub used: u64,
}

impl DiskInfo {
    /// Used fraction of the volume, 0.0 to 1.0.
    pub fn usage_percent(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        self.used as f32 / self.total as f32
    }
}

/// Usage of the volume holding the OS root. None when the query fails.
pub fn get_disk_info() -> Option<DiskInfo> {
    volume_info(&root_volume())
}

#[cfg(unix)]
fn root_volume() -> std::path::PathBuf {
    std::path::PathBuf::from("/")
}

#[cfg(windows)]
fn root_volume() -> std::path::PathBuf {
    let drive = std::env::var("SystemDrive").unwrap_or_else(|_| "C:".to_string());
    std::path::PathBuf::from(format!("{drive}\\"))
}

#[cfg(unix)]
fn volume_info(path: &Path) -> Option<DiskInfo> {
    use std::ffi::CString;
    use std::mem::MaybeUninit;
    use std::os::unix::ffi::OsStrExt;

    let c_path = CString::new(path.as_os_str().as_bytes()).ok()?;
    let mut stat = MaybeUninit::<libc::statvfs>::uninit();
    let ret = unsafe { libc::statvfs(c_path.as_ptr(), stat.as_mut_ptr()) };
    if ret != 0 {
        return None;
    }
    let stat = unsafe { stat.assume_init() };
    let block_size = stat.f_frsize as u64;
    let total = stat.f_blocks as u64 * block_size;
    let available = stat.f_bavail as u64 * block_size;
    let used = total.saturating_sub(available);
    Some(DiskInfo {
        total,
        available,
        used,
    })
}

#[cfg(windows)]
fn volume_info(path: &Path) -> Option<DiskInfo> {
    use std::os::windows::ffi::OsStrExt;
    use windows_sys::Win32::Storage::FileSystem::GetDiskFreeSpaceExW;

    let wide: Vec<u16> = path
        .as_os_str()
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();
    let mut available = 0u64;
    let mut total = 0u64;
    let mut total_free = 0u64;
    let ok = unsafe {
        GetDiskFreeSpaceExW(wide.as_ptr(), &mut available, &mut total, &mut total_free)
    };
    if ok == 0 || total == 0 {
        return None;
    }
    Some(DiskInfo {
        total,
        available,
        used: total.saturating_sub(available),
    })
}
