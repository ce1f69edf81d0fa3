/// Whether the process runs with elevated rights. Advisory only: nothing is
/// gated on it, but protected items will fail removal per-item without it.
#[cfg(unix)]
pub fn is_elevated() -> bool {
    unsafe { libc::geteuid() == 0 }
}

/// Whether the process token belongs to the builtin Administrators group.
#[cfg(windows)]
pub fn is_elevated() -> bool {
    use windows_sys::Win32::Security::{
        CheckTokenMembership, CreateWellKnownSid, WinBuiltinAdministratorsSid,
        SECURITY_MAX_SID_SIZE,
    };

    unsafe {
        let mut sid = [0u8; SECURITY_MAX_SID_SIZE as usize];
        let mut sid_size = SECURITY_MAX_SID_SIZE;
        if CreateWellKnownSid(
            WinBuiltinAdministratorsSid,
            std::ptr::null_mut(),
            sid.as_mut_ptr().cast(),
            &mut sid_size,
        ) == 0
        {
            return false;
        }
        let mut is_member = 0i32;
        if CheckTokenMembership(std::ptr::null_mut(), sid.as_mut_ptr().cast(), &mut is_member) == 0
        {
            return false;
        }
        is_member != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_answers_without_panicking() {
        // The answer depends on how the test process runs; only the call
        // itself is under test.
        let _ = is_elevated();
    }
}
