#![allow(clippy::must_use_candidate)]

#[cfg(any(target_os = "linux", target_os = "android"))]
use crate::fs::FileDes;
use crate::fs::Result;
use crate::util::{dirent_name_length, errno, set_errno};
use crate::{ListDirError, dirent64, readdir64};
use core::ffi::CStr;
use core::ptr::NonNull;
use libc::DIR;
use std::ffi::CString;

/**
 An open directory that hands out the raw names of its entries one at a time.

 End of stream and read failure are two separate outcomes: `Ok(None)` is the
 end, `Err(ListDirError::ReadFailed { .. })` is a failure. Once either has been
 returned the stream is finished and keeps answering `Ok(None)`.

 The underlying handle is released when the stream is dropped.
*/
pub trait DirStream {
    /**
    Advances the stream and returns a pointer to the next raw record.

    IMPORTANT: This returns ALL directory entries, including "." and "..".
    The pointer is only valid until the next call.
    */
    fn get_next_entry(&mut self) -> Result<Option<NonNull<dirent64>>>;

    /// The path this stream was opened with
    fn path(&self) -> &CStr;

    /**
    Returns the next entry name as raw bytes, skipping "." and "..".

    The slice is exactly the length the platform reported for the name, without
    the terminating NUL.
    */
    #[inline]
    fn next_name(&mut self) -> Result<Option<&[u8]>> {
        while let Some(drnt) = self.get_next_entry()? {
            // SAFETY: the record came from the OS and stays valid until the next advance
            let name: &[u8] = unsafe {
                let len = dirent_name_length(drnt.as_ptr());
                let name_ptr: *const u8 = access_dirent!(drnt.as_ptr(), d_name);
                core::slice::from_raw_parts(name_ptr, len)
            };
            skip_dot_or_dot_dot_entries!(name, continue);
            return Ok(Some(name));
        }
        Ok(None)
    }
}

/**
 POSIX-compliant directory stream using libc's `opendir`/`readdir`

 `readdir` reports both the end of the directory and a failure as a null
 pointer. `errno` is cleared right before each call and read right after a null
 result, so the two come out as distinct values.

 # Examples
 ```
 use listdir::fs::{DirStream, ReadDir};

 let dir = std::env::temp_dir().join("listdir_readdir_doc");
 let _ = std::fs::remove_dir_all(&dir);
 std::fs::create_dir(&dir).unwrap();
 std::fs::File::create(dir.join("file.txt")).unwrap();

 let mut stream = ReadDir::open(&dir).unwrap();
 assert_eq!(stream.next_name().unwrap(), Some(&b"file.txt"[..]));
 assert_eq!(stream.next_name().unwrap(), None);
 assert_eq!(stream.next_name().unwrap(), None);

 std::fs::remove_dir_all(&dir).unwrap();
 ```
*/
#[derive(Debug)]
pub struct ReadDir {
    /// Raw directory pointer from libc's `opendir() wrapped in a nonnull`
    pub(crate) dir: NonNull<DIR>,
    /// The path as handed to `opendir`, kept for error reporting
    pub(crate) path: CString,
    /// Set once the stream has reported its end or an error
    pub(crate) end_of_stream: bool,
}

impl ReadDir {
    /**
     Opens `path` for reading.

     # Errors
     - `InvalidPath` if the path contains a NUL byte
     - `OpenFailed` if `opendir` fails (missing, not a directory, permission denied, ...)
    */
    #[inline]
    pub fn open<P: AsRef<std::ffi::OsStr>>(path: P) -> Result<Self> {
        use std::os::unix::ffi::OsStrExt as _;
        Self::from_cstring(CString::new(path.as_ref().as_bytes())?)
    }

    #[inline]
    pub(crate) fn from_cstring(path: CString) -> Result<Self> {
        // SAFETY: we are passing a null terminated directory to opendir
        let dir = unsafe { libc::opendir(path.as_ptr()) };

        let Some(dir) = NonNull::new(dir) else {
            return Err(last_os_error!(open_failed, &path));
        };
        log::debug!("opened {} with opendir", path.to_string_lossy());

        Ok(Self {
            dir,
            path,
            end_of_stream: false,
        })
    }
}

impl DirStream for ReadDir {
    #[inline]
    fn get_next_entry(&mut self) -> Result<Option<NonNull<dirent64>>> {
        if self.end_of_stream {
            return Ok(None);
        }

        set_errno(0);
        // SAFETY: `self.dir` is a valid directory pointer maintained by the stream
        let dirent_ptr = unsafe { readdir64(self.dir.as_ptr()) };

        if let Some(drnt) = NonNull::new(dirent_ptr) {
            return Ok(Some(drnt));
        }

        self.end_of_stream = true;
        match errno() {
            0 => Ok(None),
            code => Err(ListDirError::read_failed(
                crate::util::cstr_to_path(&self.path),
                std::io::Error::from_raw_os_error(code),
            )),
        }
    }

    #[inline]
    fn path(&self) -> &CStr {
        &self.path
    }
}

impl Drop for ReadDir {
    #[inline]
    fn drop(&mut self) {
        // SAFETY: the pointer came from opendir and is only closed here
        unsafe { libc::closedir(self.dir.as_ptr()) };
        log::debug!("closed {}", self.path.to_string_lossy());
    }
}

/**
Linux/Android-specific directory stream using the `getdents64` system call.

Reads records in batches into an aligned buffer. A negative return from the
system call is a read failure, zero is the end of the directory.
*/
#[cfg(any(target_os = "linux", target_os = "android"))]
#[derive(Debug)]
pub struct GetDents {
    /// File descriptor of the open directory, closed on drop
    pub(crate) fd: FileDes,
    /// The path as handed to `open`, kept for error reporting
    pub(crate) path: CString,
    /// Kernel buffer for batch reading directory entries
    pub(crate) syscall_buffer: crate::fs::types::SyscallBuffer,
    /// Current read position within the buffer
    pub(crate) offset: usize,
    /// Number of valid bytes written by the last system call
    pub(crate) remaining_bytes: usize,
    /// Set once the descriptor has given its last record or failed
    pub(crate) end_of_stream: bool,
}

#[cfg(any(target_os = "linux", target_os = "android"))]
impl GetDents {
    /**
     Opens `path` for reading.

     # Errors
     - `InvalidPath` if the path contains a NUL byte
     - `OpenFailed` if `open(O_DIRECTORY)` fails
    */
    #[inline]
    pub fn open<P: AsRef<std::ffi::OsStr>>(path: P) -> Result<Self> {
        use std::os::unix::ffi::OsStrExt as _;
        Self::from_cstring(CString::new(path.as_ref().as_bytes())?)
    }

    #[inline]
    pub(crate) fn from_cstring(path: CString) -> Result<Self> {
        const FLAGS: i32 = libc::O_RDONLY | libc::O_CLOEXEC | libc::O_DIRECTORY | libc::O_NONBLOCK;
        // SAFETY: the pointer is null terminated
        let fd = unsafe { libc::open(path.as_ptr(), FLAGS) };

        if fd < 0 {
            return Err(last_os_error!(open_failed, &path));
        }
        log::debug!("opened {} for getdents", path.to_string_lossy());

        Ok(Self {
            fd: FileDes(fd),
            path,
            syscall_buffer: crate::fs::types::SyscallBuffer::new(),
            offset: 0,
            remaining_bytes: 0,
            end_of_stream: false,
        })
    }

    /// Returns the file descriptor for this directory.
    #[inline]
    pub const fn dirfd(&self) -> &FileDes {
        &self.fd
    }

    /// Number of bytes in the current batch that haven't been handed out yet
    #[inline]
    pub const fn remaining_bytes(&self) -> usize {
        self.remaining_bytes - self.offset
    }

    /// Refills the buffer, `Ok(false)` means the directory is exhausted
    #[inline]
    #[expect(clippy::cast_sign_loss, reason = "checked non-negative above")]
    pub(crate) fn fill_buffer(&mut self) -> Result<bool> {
        if self.end_of_stream {
            return Ok(false);
        }

        let read = self.syscall_buffer.getdents(&self.fd);
        self.offset = 0;

        if read < 0 {
            self.end_of_stream = true;
            self.remaining_bytes = 0;
            let code = errno();
            // an unlinked directory reads as empty, the same as readdir reports it
            if code == libc::ENOENT {
                log::debug!("{} was removed while open", self.path.to_string_lossy());
                return Ok(false);
            }
            return Err(ListDirError::read_failed(
                crate::util::cstr_to_path(&self.path),
                std::io::Error::from_raw_os_error(code),
            ));
        }

        self.remaining_bytes = read as usize;
        self.end_of_stream = read == 0;
        Ok(!self.end_of_stream)
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
impl DirStream for GetDents {
    #[inline]
    #[allow(clippy::cast_ptr_alignment)]
    fn get_next_entry(&mut self) -> Result<Option<NonNull<dirent64>>> {
        loop {
            if self.offset < self.remaining_bytes {
                // SAFETY: offset is within the bytes the kernel just wrote
                let d: *mut dirent64 =
                    unsafe { self.syscall_buffer.as_ptr().add(self.offset) as _ };

                debug_assert!(
                    (d as usize).is_multiple_of(8),
                    "the memory address of the dirent SHOULD be aligned to 8 bytes"
                );
                // SAFETY: d points at a whole record inside the buffer
                let reclen = unsafe { access_dirent!(d, d_reclen) };
                self.offset += reclen;

                return Ok(NonNull::new(d));
            }

            if !self.fill_buffer()? {
                return Ok(None);
            }
        }
    }

    #[inline]
    fn path(&self) -> &CStr {
        &self.path
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
impl Drop for GetDents {
    #[inline]
    fn drop(&mut self) {
        debug_assert!(
            self.fd.is_open(),
            "We expect the file descriptor to be open before closing"
        );
        // SAFETY: only closing HERE
        unsafe { libc::close(self.fd.as_raw()) };
        log::debug!("closed {}", self.path.to_string_lossy());
    }
}

// Owned names, fused after the end or the first error.
macro_rules! impl_iterator_for_stream {
    ($type:ty) => {
        impl Iterator for $type {
            type Item = Result<Vec<u8>>;

            #[inline]
            fn next(&mut self) -> Option<Self::Item> {
                self.next_name().transpose().map(|name| name.map(<[u8]>::to_vec))
            }
        }

        impl core::iter::FusedIterator for $type {}
    };
}

impl_iterator_for_stream!(ReadDir);
#[cfg(any(target_os = "linux", target_os = "android"))]
impl_iterator_for_stream!(GetDents);
