//! OS user, group and ownership lookups.

use std::ffi::CString;
use std::io;
use std::path::Path;

/// Seam over the system user/group databases and ownership changes, so the
/// engine can be exercised in tests without root.
pub trait SystemUsers: Send + Sync {
    /// Numeric uid for a login name, if the user exists.
    fn resolve_uid(&self, name: &str) -> Option<u32>;

    /// Numeric gid for a group name, if the group exists.
    fn resolve_gid(&self, group: &str) -> Option<u32>;

    /// Change ownership of `path`.
    fn chown(&self, path: &Path, uid: u32, gid: u32) -> io::Result<()>;
}

/// `SystemUsers` backed by the real passwd and group databases.
pub struct OsUsers;

impl SystemUsers for OsUsers {
    fn resolve_uid(&self, name: &str) -> Option<u32> {
        let name = CString::new(name).ok()?;
        // getpwnam's static buffer is fine here: all lookups happen from
        // the single reconciliation thread.
        let entry = unsafe { libc::getpwnam(name.as_ptr()) };
        if entry.is_null() {
            None
        } else {
            Some(unsafe { (*entry).pw_uid })
        }
    }

    fn resolve_gid(&self, group: &str) -> Option<u32> {
        let group = CString::new(group).ok()?;
        let entry = unsafe { libc::getgrnam(group.as_ptr()) };
        if entry.is_null() {
            None
        } else {
            Some(unsafe { (*entry).gr_gid })
        }
    }

    fn chown(&self, path: &Path, uid: u32, gid: u32) -> io::Result<()> {
        std::os::unix::fs::chown(path, Some(uid), Some(gid))
    }
}
