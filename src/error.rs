use std::collections::TryReserveError;
use std::ffi::NulError;
use std::path::{Path, PathBuf};
use std::{fmt, io};

#[derive(Debug)]
/// An error type for directory listing operations.
///
/// Open and read failures carry the OS error and the path that was being listed.
/// Names that fail to decode are never reported here, they fall back to raw bytes.
pub enum ListDirError {
    /// The path could not be opened as a directory (missing, not a directory, permission denied, ...)
    OpenFailed { path: PathBuf, source: io::Error },
    /// Advancing the directory stream failed part way through
    ReadFailed { path: PathBuf, source: io::Error },
    /// Growing the result or copying a name failed, partial results are dropped
    AllocationFailed(TryReserveError),
    /// The path contains an interior NUL byte and can't be handed to the OS
    InvalidPath(NulError),
}

impl ListDirError {
    #[inline]
    pub(crate) fn open_failed<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        Self::OpenFailed {
            path: path.into(),
            source,
        }
    }

    #[inline]
    pub(crate) fn read_failed<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        Self::ReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Returns the OS error code behind an open or read failure.
    #[inline]
    #[must_use]
    #[allow(clippy::pattern_type_mismatch)]
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            Self::OpenFailed { source, .. } | Self::ReadFailed { source, .. } => {
                source.raw_os_error()
            }
            Self::AllocationFailed(_) | Self::InvalidPath(_) => None,
        }
    }

    /// Returns the path being listed when the error happened, if there is one.
    #[inline]
    #[must_use]
    #[allow(clippy::pattern_type_mismatch)]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::OpenFailed { path, .. } | Self::ReadFailed { path, .. } => Some(path),
            Self::AllocationFailed(_) | Self::InvalidPath(_) => None,
        }
    }

    /// Returns the `io::ErrorKind` of an open or read failure.
    #[inline]
    #[must_use]
    #[allow(clippy::pattern_type_mismatch)]
    pub fn kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::OpenFailed { source, .. } | Self::ReadFailed { source, .. } => {
                Some(source.kind())
            }
            Self::AllocationFailed(_) | Self::InvalidPath(_) => None,
        }
    }
}

impl From<TryReserveError> for ListDirError {
    fn from(e: TryReserveError) -> Self {
        Self::AllocationFailed(e)
    }
}

impl From<NulError> for ListDirError {
    fn from(e: NulError) -> Self {
        Self::InvalidPath(e)
    }
}

#[allow(clippy::pattern_type_mismatch)]
impl fmt::Display for ListDirError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenFailed { path, source } => {
                write!(f, "cannot open directory '{}': {source}", path.display())
            }
            Self::ReadFailed { path, source } => {
                write!(f, "error reading directory '{}': {source}", path.display())
            }
            Self::AllocationFailed(e) => write!(f, "Allocation failed: {e}"),
            Self::InvalidPath(e) => write!(f, "Invalid path: {e}"),
        }
    }
}

#[allow(clippy::pattern_type_mismatch)]
impl std::error::Error for ListDirError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::OpenFailed { source, .. } | Self::ReadFailed { source, .. } => Some(source),
            Self::AllocationFailed(e) => Some(e),
            Self::InvalidPath(e) => Some(e),
        }
    }
}
