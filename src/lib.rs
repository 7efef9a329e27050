/*!
 List the immediate entries of a directory.

 - `.` and `..` are never returned
 - names come back in the order the OS produced them, not sorted
 - names can be decoded strictly under a filesystem encoding; any name that
   doesn't decode is returned as raw bytes instead of failing the listing
 - the directory handle is closed exactly once on every path out

 Open and read failures carry the OS error code and the path.

 # Examples
 ```
 use listdir::{ListDirError, listdir, list_directory};
 use std::fs;

 let dir = std::env::temp_dir().join("listdir_crate_doc");
 let _ = fs::remove_dir_all(&dir);
 fs::create_dir(&dir).unwrap();
 fs::File::create(dir.join("a")).unwrap();
 fs::create_dir(dir.join("b")).unwrap();

 // A `Path` asks for text
 let mut names = listdir(&dir).unwrap();
 names.sort();
 assert_eq!(names, ["a", "b"]);

 // The flag decides explicitly
 let raw = list_directory(&dir, false).unwrap();
 assert!(raw.iter().all(|name| !name.is_text()));

 // Errors carry the path and the OS error
 match list_directory(dir.join("missing"), true) {
     Err(ListDirError::OpenFailed { path, source }) => {
         assert_eq!(path, dir.join("missing"));
         assert_eq!(source.raw_os_error(), Some(libc::ENOENT));
     }
     other => panic!("expected OpenFailed, got {other:?}"),
 }

 fs::remove_dir_all(&dir).unwrap();
 ```
*/

#[macro_use]
mod macros;

mod error;
pub mod fs;
mod lister;
mod name;
mod path;
pub mod util;

pub use error::ListDirError;
pub use fs::Result;
pub use lister::{Backend, Lister};
pub use name::{DecodeError, EntryName, FsEncoding, UnknownEncoding};
pub use path::ListPath;

#[cfg(any(target_os = "linux", target_os = "android"))]
pub(crate) use libc::{dirent64, readdir64};

#[cfg(not(any(target_os = "linux", target_os = "android")))]
pub(crate) use libc::{dirent as dirent64, readdir as readdir64};

use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt as _;

/**
 Lists the entries of `path`.

 When `want_text_result` is set each name is decoded strictly as UTF-8 and kept
 as raw bytes if that fails; otherwise every name is raw bytes.

 # Errors
 - `OpenFailed` when the path can't be opened as a directory
 - `ReadFailed` when reading fails part way
 - `AllocationFailed` when the result can't grow
 - `InvalidPath` when the path contains a NUL byte
*/
#[inline]
pub fn list_directory<P: AsRef<OsStr>>(path: P, want_text_result: bool) -> Result<Vec<EntryName>> {
    Lister::new().list_raw(path.as_ref().as_bytes(), want_text_result)
}

/**
 Lists the entries of `path`, decoding names when the path was given as text.

 See [`ListPath`] for which types count as text.

 # Errors
 As [`list_directory`].
*/
#[inline]
pub fn listdir<P: ListPath + ?Sized>(path: &P) -> Result<Vec<EntryName>> {
    Lister::new().list(path)
}
