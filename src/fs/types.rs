use crate::ListDirError;
#[cfg(any(target_os = "linux", target_os = "android"))]
use crate::fs::BUFFER_SIZE;

///Generic result type for directory listing operations
pub type Result<T> = core::result::Result<T, ListDirError>;

/// A buffer used to hold the bytes sent from the OS for `getdents` calls
#[cfg(any(target_os = "linux", target_os = "android"))]
pub type SyscallBuffer = crate::fs::AlignedBuffer<BUFFER_SIZE>;

/// A thin wrapper around a raw file descriptor for internal IO
///
/// Closing is left to the owner (`GetDents` closes on drop).
#[derive(Debug)]
#[repr(transparent)]
pub struct FileDes(pub(crate) i32);

impl FileDes {
    /// Returns the underlying file descriptor.
    #[must_use]
    #[inline]
    pub const fn as_raw(&self) -> i32 {
        self.0
    }

    /// Checks if the file descriptor is currently open
    #[must_use]
    #[inline]
    pub fn is_open(&self) -> bool {
        // fcntl(F_GETFD) fails with EBADF once the fd is closed
        //SAFETY:  Always safe
        unsafe { libc::fcntl(self.0, libc::F_GETFD) != -1 }
    }
}
