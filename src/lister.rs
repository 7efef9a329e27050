use crate::fs::{DirStream, ReadDir, Result};
use crate::{EntryName, FsEncoding, ListPath};
use core::fmt;
use core::str::FromStr;

/// Which system interface reads the directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Backend {
    /// `opendir`/`readdir`/`closedir`, available on every Unix
    #[default]
    ReadDir,
    /// The `getdents64` system call with a batch buffer
    #[cfg(any(target_os = "linux", target_os = "android"))]
    GetDents,
}

impl Backend {
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ReadDir => "readdir",
            #[cfg(any(target_os = "linux", target_os = "android"))]
            Self::GetDents => "getdents",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(label: &str) -> core::result::Result<Self, Self::Err> {
        match label {
            "readdir" => Ok(Self::ReadDir),
            #[cfg(any(target_os = "linux", target_os = "android"))]
            "getdents" => Ok(Self::GetDents),
            other => Err(format!("unsupported backend '{other}'")),
        }
    }
}

/**
 Lists the immediate entries of a directory.

 Every call opens the directory, reads it to the end and closes it again
 before returning, whether it succeeded or not. Names come back in the order the
 OS produced them, `.` and `..` are never included.

 # Examples
 ```
 use listdir::{Backend, EntryName, FsEncoding, Lister};
 use std::fs;

 let dir = std::env::temp_dir().join("listdir_lister_doc");
 let _ = fs::remove_dir_all(&dir);
 fs::create_dir(&dir).unwrap();
 fs::File::create(dir.join("a")).unwrap();

 let names = Lister::new()
     .encoding(FsEncoding::Utf8)
     .backend(Backend::ReadDir)
     .list(&dir)
     .unwrap();
 assert_eq!(names, vec![EntryName::Text("a".into())]);

 // Force raw bytes whatever the path type says
 let raw = Lister::new().text(Some(false)).list(&dir).unwrap();
 assert_eq!(raw, vec![EntryName::Bytes(b"a".to_vec())]);

 fs::remove_dir_all(&dir).unwrap();
 ```
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lister {
    pub(crate) encoding: FsEncoding,
    pub(crate) backend: Backend,
    pub(crate) text: Option<bool>,
}

impl Lister {
    /// Creates a lister with UTF-8 names, the `readdir` backend and the representation taken from the path type
    #[must_use]
    pub const fn new() -> Self {
        Self {
            encoding: FsEncoding::Utf8,
            backend: Backend::ReadDir,
            text: None,
        }
    }

    /// Set the encoding names are decoded with, defaults to UTF-8
    #[must_use]
    pub const fn encoding(mut self, encoding: FsEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set the backend, defaults to `readdir`
    #[must_use]
    pub const fn backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Force text (`Some(true)`) or raw bytes (`Some(false)`); `None` asks the path type
    #[must_use]
    pub const fn text(mut self, text: Option<bool>) -> Self {
        self.text = text;
        self
    }

    /**
     Lists `path`, decoding names when configured to or when the path type asks for text.

     # Errors
     - `InvalidPath` if the path contains a NUL byte
     - `OpenFailed` if the directory can't be opened
     - `ReadFailed` if reading fails part way
     - `AllocationFailed` if the result can't grow
    */
    #[inline]
    pub fn list<P: ListPath + ?Sized>(&self, path: &P) -> Result<Vec<EntryName>> {
        let want_text = self.text.unwrap_or_else(|| path.wants_text());
        self.list_raw(path.path_bytes(), want_text)
    }

    /**
     Lists the directory named by the raw bytes `path`.

     `want_text` decides whether names are decoded; the configured `text`
     override is not consulted here.

     # Errors
     As [`Lister::list`].
    */
    #[inline]
    pub fn list_raw(&self, path: &[u8], want_text: bool) -> Result<Vec<EntryName>> {
        let path = path.to_cstring()?;
        let encoding = want_text.then_some(self.encoding);
        log::debug!(
            "listing {} with {} (decode: {:?})",
            path.to_string_lossy(),
            self.backend,
            encoding
        );

        match self.backend {
            Backend::ReadDir => collect_names(ReadDir::from_cstring(path)?, encoding),
            #[cfg(any(target_os = "linux", target_os = "android"))]
            Backend::GetDents => {
                collect_names(crate::fs::GetDents::from_cstring(path)?, encoding)
            }
        }
    }
}

/**
 Drains `stream` into a vector of names.

 The stream is owned here and dropped on every way out, which closes the
 directory exactly once.
*/
pub(crate) fn collect_names<S: DirStream>(
    mut stream: S,
    encoding: Option<FsEncoding>,
) -> Result<Vec<EntryName>> {
    let mut names: Vec<EntryName> = Vec::new();

    while let Some(raw) = stream.next_name()? {
        let mut owned: Vec<u8> = Vec::new();
        owned.try_reserve_exact(raw.len())?;
        owned.extend_from_slice(raw);

        names.try_reserve(1)?;
        names.push(EntryName::from_raw(owned, encoding));
    }

    log::debug!(
        "read {} entries from {}",
        names.len(),
        stream.path().to_string_lossy()
    );
    Ok(names)
}
