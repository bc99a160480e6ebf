//! Elevated-privilege detection.
//!
//! A privileged process must never load plugins from a user-writable
//! location, so discovery asks this before scanning the personal directory.

/// Reports whether the process started with special privileges.
pub trait PrivilegeCheck {
    /// Returns `true` if the process runs (or ran) with elevated privileges.
    fn started_with_special_privs(&self) -> bool;
}

/// Inspects the real and effective ids of the current process.
#[derive(Debug, Clone, Copy)]
pub struct ProcessPrivileges {
    started_privileged: bool,
}

impl ProcessPrivileges {
    /// Captures the privilege state of the current process.
    ///
    /// Call early, before any privilege is dropped.
    pub fn capture() -> Self {
        Self {
            started_privileged: Self::detect(),
        }
    }

    #[cfg(unix)]
    fn detect() -> bool {
        // SAFETY: these calls have no preconditions and cannot fail.
        let (ruid, euid, rgid, egid) =
            unsafe { (libc::getuid(), libc::geteuid(), libc::getgid(), libc::getegid()) };
        ruid != euid || rgid != egid || ruid == 0 || rgid == 0
    }

    #[cfg(not(unix))]
    fn detect() -> bool {
        false
    }
}

impl PrivilegeCheck for ProcessPrivileges {
    fn started_with_special_privs(&self) -> bool {
        self.started_privileged
    }
}

/// A fixed answer, for hosts that track privileges themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPrivileges(pub bool);

impl PrivilegeCheck for FixedPrivileges {
    fn started_with_special_privs(&self) -> bool {
        self.0
    }
}
