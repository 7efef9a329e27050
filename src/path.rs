use std::ffi::{CString, OsStr, OsString};
use std::os::unix::ffi::OsStrExt as _;
use std::path::{Path, PathBuf};

/**
 A value that can name a directory to list.

 Besides the bytes of the path, the type decides the default representation of
 the names that come back: textual path types (`str`, `String`, `Path`,
 `PathBuf`) ask for decoded names, byte-like types (`[u8]`, `Vec<u8>`, `OsStr`,
 `OsString`) ask for raw bytes.

 # Examples
 ```
 use listdir::ListPath;
 use std::ffi::OsStr;

 assert!("/tmp".wants_text());
 assert!(!b"/tmp".wants_text());
 assert!(!OsStr::new("/tmp").wants_text());
 assert_eq!("/tmp".path_bytes(), b"/tmp");
 ```
*/
pub trait ListPath {
    /// The path as raw bytes, without a terminator
    fn path_bytes(&self) -> &[u8];

    /// Whether names should be decoded to text by default
    fn wants_text(&self) -> bool;

    /**
     Copies the path into a NUL terminated C string.

     # Errors
     Returns `InvalidPath` when the path contains an interior NUL byte.
    */
    #[inline]
    fn to_cstring(&self) -> crate::Result<CString> {
        Ok(CString::new(self.path_bytes())?)
    }
}

// Simple repetition avoider
macro_rules! impl_list_path {
    ($type:ty, $wants_text:expr, |$this:ident| $bytes:expr) => {
        impl ListPath for $type {
            #[inline]
            fn path_bytes(&self) -> &[u8] {
                let $this = self;
                $bytes
            }

            #[inline]
            fn wants_text(&self) -> bool {
                $wants_text
            }
        }
    };
}

impl_list_path!(str, true, |this| this.as_bytes());
impl_list_path!(String, true, |this| this.as_bytes());
impl_list_path!(Path, true, |this| this.as_os_str().as_bytes());
impl_list_path!(PathBuf, true, |this| this.as_os_str().as_bytes());
impl_list_path!(OsStr, false, |this| this.as_bytes());
impl_list_path!(OsString, false, |this| this.as_os_str().as_bytes());
impl_list_path!([u8], false, |this| this);
impl_list_path!(Vec<u8>, false, |this| this.as_slice());

impl<const N: usize> ListPath for [u8; N] {
    #[inline]
    fn path_bytes(&self) -> &[u8] {
        self
    }

    #[inline]
    fn wants_text(&self) -> bool {
        false
    }
}

impl<T: ListPath + ?Sized> ListPath for &T {
    #[inline]
    fn path_bytes(&self) -> &[u8] {
        (**self).path_bytes()
    }

    #[inline]
    fn wants_text(&self) -> bool {
        (**self).wants_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn textual_types_want_text() {
        assert!("a".wants_text());
        assert!(String::from("a").wants_text());
        assert!(Path::new("a").wants_text());
        assert!(PathBuf::from("a").wants_text());
        assert!((&"a").wants_text());
    }

    #[test]
    fn byte_types_want_bytes() {
        assert!(!b"a".as_slice().wants_text());
        assert!(!b"a".to_vec().wants_text());
        assert!(!OsStr::new("a").wants_text());
        assert!(!OsString::from("a").wants_text());
    }

    #[test]
    fn interior_nul_is_rejected() {
        let err = b"bad\0path".to_cstring().unwrap_err();
        assert!(matches!(err, crate::ListDirError::InvalidPath(_)));
        assert_eq!("fine".to_cstring().unwrap().as_bytes(), b"fine");
    }
}
