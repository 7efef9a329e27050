use crate::dirent64;
#[cfg(any(target_os = "linux", target_os = "android"))]
use core::ffi::c_char;
use core::ffi::CStr;
use std::{ffi::OsStr, os::unix::ffi::OsStrExt as _, path::PathBuf};

#[cfg(any(
    target_os = "linux",
    target_os = "emscripten",
    target_os = "fuchsia",
    target_os = "hurd",
    target_os = "redox"
))]
use libc::__errno_location as errno_location;

#[cfg(any(target_os = "android", target_os = "netbsd", target_os = "openbsd"))]
use libc::__errno as errno_location;

#[cfg(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "tvos",
    target_os = "watchos",
    target_os = "visionos",
    target_os = "freebsd"
))]
use libc::__error as errno_location;

#[cfg(any(target_os = "solaris", target_os = "illumos"))]
use libc::___errno as errno_location;

/// Reads the calling thread's `errno`
#[inline]
pub(crate) fn errno() -> i32 {
    // SAFETY: the location is thread local and valid for the lifetime of the thread
    unsafe { *errno_location() }
}

/// Overwrites the calling thread's `errno`
#[inline]
pub(crate) fn set_errno(value: i32) {
    // SAFETY: as above
    unsafe { *errno_location() = value };
}

/**
  Wrapper for direct getdents syscalls


 # Arguments
 - `fd`: Open directory file descriptor
 - `buffer_ptr`: Raw pointer to output buffer
 - `buffer_size`: Size of output buffer in bytes

 # Safety
 - Requires valid open directory descriptor
 - Buffer must be valid for writes of `buffer_size` bytes

 # Returns
 - Positive: Number of bytes read
 - 0: End of directory
 - Negative: Error (check errno)
*/
#[inline]
#[cfg(any(target_os = "linux", target_os = "android"))]
#[expect(clippy::cast_possible_truncation, reason = "clong is isize on Unix")]
pub unsafe fn getdents(fd: i32, buffer_ptr: *mut c_char, buffer_size: usize) -> isize {
    // SAFETY: Syscall has no other implicit safety requirements beyond pointer validity
    unsafe { libc::syscall(libc::SYS_getdents64, fd, buffer_ptr, buffer_size) as _ }
}

/**
 Returns the length of `dirent64` / `dirent` `d_name` without the trailing null byte.

 - Where the record carries `d_namlen` (macOS/BSD) that is the answer.
 - Otherwise, when `d_reclen` exists, the name is scanned for its terminator but never
   past the end of the record.
 - Failing both, `strlen`.

 # Safety
 - `drnt` must be a valid, non-null pointer to a `dirent` / `dirent64` whose `d_name`
   field is properly null-terminated within the record.
 - The pointer must remain valid for the duration of the call.
*/
#[inline]
#[must_use]
pub unsafe fn dirent_name_length(drnt: *const dirent64) -> usize {
    debug_assert!(!drnt.is_null(), "dirent is null in name length calculation");

    #[cfg(has_d_namlen)] //Generated by cc build script.
    // SAFETY: `drnt` is valid by precondition
    return unsafe { access_dirent!(drnt, d_namlen) };

    #[cfg(all(not(has_d_namlen), has_d_reclen))]
    {
        const NAME_OFFSET: usize = core::mem::offset_of!(dirent64, d_name);
        // SAFETY: `drnt` is valid by precondition
        let reclen: usize = unsafe { access_dirent!(drnt, d_reclen) };
        let max_len = reclen.saturating_sub(NAME_OFFSET);
        // SAFETY: `drnt` is valid by precondition
        let name_ptr: *const u8 = unsafe { access_dirent!(drnt, d_name) };
        // SAFETY: the record is `reclen` bytes long, so the name can't run past it
        let name = unsafe { core::slice::from_raw_parts(name_ptr, max_len) };
        name.iter().position(|&byte| byte == 0).unwrap_or(max_len)
    }

    #[cfg(not(any(has_d_namlen, has_d_reclen)))]
    {
        // SAFETY: `drnt` is valid and d_name is null terminated by precondition
        unsafe { libc::strlen(access_dirent!(drnt, d_name)) }
    }
}

/// Converts a C path back into an owned `PathBuf` for error reporting
#[inline]
#[must_use]
pub fn cstr_to_path(path: &CStr) -> PathBuf {
    PathBuf::from(OsStr::from_bytes(path.to_bytes()))
}
