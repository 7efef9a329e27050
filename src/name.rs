use core::fmt;
use core::str::FromStr;
use std::borrow::Cow;
use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt as _;

/**
 The text encoding used to interpret raw entry names.

 Decoding is always strict: a name that isn't valid in the encoding is
 rejected rather than patched with replacement characters.

 # Examples
 ```
 use listdir::FsEncoding;

 assert_eq!(FsEncoding::Utf8.decode(b"caf\xc3\xa9".to_vec()).unwrap(), "café");
 assert!(FsEncoding::Ascii.decode(b"caf\xc3\xa9".to_vec()).is_err());
 assert_eq!(FsEncoding::Latin1.decode(b"caf\xe9".to_vec()).unwrap(), "café");
 assert_eq!("ISO-8859-1".parse::<FsEncoding>().unwrap(), FsEncoding::Latin1);
 ```
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FsEncoding {
    /// UTF-8, what Unix filesystems use in practice
    #[default]
    Utf8,
    /// 7-bit ASCII, the C/POSIX locale's codeset
    Ascii,
    /// ISO-8859-1, every byte maps to the code point of the same value
    Latin1,
}

impl FsEncoding {
    /// The canonical label of this encoding
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Ascii => "ascii",
            Self::Latin1 => "latin-1",
        }
    }

    /**
     Strictly decodes `raw`.

     # Errors
     Returns a [`DecodeError`] holding the untouched bytes when `raw` isn't valid
     in this encoding.
    */
    #[inline]
    pub fn decode(self, raw: Vec<u8>) -> Result<String, DecodeError> {
        match self {
            Self::Utf8 => String::from_utf8(raw).map_err(|e| {
                let valid_up_to = e.utf8_error().valid_up_to();
                DecodeError {
                    bytes: e.into_bytes(),
                    valid_up_to,
                    encoding: self,
                }
            }),
            Self::Ascii => match raw.iter().position(|byte| !byte.is_ascii()) {
                Some(valid_up_to) => Err(DecodeError {
                    bytes: raw,
                    valid_up_to,
                    encoding: self,
                }),
                // ASCII is a subset of UTF-8 so this can't fail
                None => String::from_utf8(raw).map_err(|e| DecodeError {
                    bytes: e.into_bytes(),
                    valid_up_to: 0,
                    encoding: self,
                }),
            },
            Self::Latin1 => Ok(raw.iter().copied().map(char::from).collect()),
        }
    }

    /// Encodes `text` back into raw bytes, `None` if a character has no representation.
    #[inline]
    #[must_use]
    pub fn encode(self, text: &str) -> Option<Vec<u8>> {
        match self {
            Self::Utf8 => Some(text.as_bytes().to_vec()),
            Self::Ascii => text.is_ascii().then(|| text.as_bytes().to_vec()),
            Self::Latin1 => text.chars().map(|c| u8::try_from(c).ok()).collect(),
        }
    }
}

impl fmt::Display for FsEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an encoding label that isn't recognised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEncoding(pub String);

impl fmt::Display for UnknownEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown encoding '{}', expected one of utf-8, ascii, latin-1",
            self.0
        )
    }
}

impl std::error::Error for UnknownEncoding {}

impl FromStr for FsEncoding {
    type Err = UnknownEncoding;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "ascii" | "us-ascii" | "ansi_x3.4-1968" => Ok(Self::Ascii),
            "latin-1" | "latin1" | "iso-8859-1" | "iso8859-1" => Ok(Self::Latin1),
            _ => Err(UnknownEncoding(label.to_owned())),
        }
    }
}

/// A name that isn't valid under the chosen encoding. Carries the bytes back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    bytes: Vec<u8>,
    valid_up_to: usize,
    encoding: FsEncoding,
}

impl DecodeError {
    /// Index of the first byte that couldn't be decoded
    #[inline]
    #[must_use]
    pub const fn valid_up_to(&self) -> usize {
        self.valid_up_to
    }

    /// The encoding that rejected the name
    #[inline]
    #[must_use]
    pub const fn encoding(&self) -> FsEncoding {
        self.encoding
    }

    /// Gives back the original bytes
    #[inline]
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid {} sequence at byte {}",
            self.encoding, self.valid_up_to
        )
    }
}

impl std::error::Error for DecodeError {}

/**
 One directory entry name: text when it decoded, raw bytes otherwise.

 # Examples
 ```
 use listdir::{EntryName, FsEncoding};

 let text = EntryName::from_raw(b"notes.txt".to_vec(), Some(FsEncoding::Utf8));
 assert!(text.is_text());
 assert_eq!(text, "notes.txt");

 let raw = EntryName::from_raw(b"bad\xff".to_vec(), Some(FsEncoding::Utf8));
 assert_eq!(raw.as_bytes(), b"bad\xff");
 assert!(raw.as_str().is_none());
 ```
*/
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntryName {
    /// Decoded under the filesystem encoding
    Text(String),
    /// Raw bytes, as the OS reported them
    Bytes(Vec<u8>),
}

impl EntryName {
    /// Builds a name from raw bytes, decoding when an encoding is given.
    ///
    /// A name that fails to decode is kept as [`EntryName::Bytes`].
    #[inline]
    #[must_use]
    pub fn from_raw(raw: Vec<u8>, encoding: Option<FsEncoding>) -> Self {
        let Some(encoding) = encoding else {
            return Self::Bytes(raw);
        };

        match encoding.decode(raw) {
            Ok(text) => Self::Text(text),
            Err(e) => {
                log::trace!("keeping raw bytes for entry name: {e}");
                Self::Bytes(e.into_bytes())
            }
        }
    }

    /// The bytes of this name. For `Text` that is its UTF-8 form.
    #[inline]
    #[must_use]
    #[allow(clippy::pattern_type_mismatch)]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Bytes(bytes) => bytes,
        }
    }

    /// Consumes the name, returning its bytes.
    #[inline]
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Text(text) => text.into_bytes(),
            Self::Bytes(bytes) => bytes,
        }
    }

    /// The text, if this name was decoded
    #[inline]
    #[must_use]
    #[allow(clippy::pattern_type_mismatch)]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Bytes(_) => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(*self, Self::Text(_))
    }

    // Converts to a lossy string for ease of use
    #[inline]
    #[must_use]
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    /// Borrows the name as an `OsStr`, suitable for joining onto a `Path`.
    ///
    /// For text decoded as anything other than UTF-8 this is the UTF-8 form, not the on-disk bytes.
    #[inline]
    #[must_use]
    pub fn as_os_str(&self) -> &OsStr {
        OsStr::from_bytes(self.as_bytes())
    }
}

impl AsRef<[u8]> for EntryName {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Display for EntryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_lossy())
    }
}

impl PartialEq<str> for EntryName {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for EntryName {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<[u8]> for EntryName {
    #[inline]
    fn eq(&self, other: &[u8]) -> bool {
        matches!(*self, Self::Bytes(ref bytes) if bytes.as_slice() == other)
    }
}

impl PartialEq<&[u8]> for EntryName {
    #[inline]
    fn eq(&self, other: &&[u8]) -> bool {
        *self == **other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_rejects_invalid_sequences() {
        let err = FsEncoding::Utf8.decode(b"ab\xffcd".to_vec()).unwrap_err();
        assert_eq!(err.valid_up_to(), 2);
        assert_eq!(err.encoding(), FsEncoding::Utf8);
        assert_eq!(err.into_bytes(), b"ab\xffcd");
    }

    #[test]
    fn ascii_rejects_high_bytes() {
        let err = FsEncoding::Ascii.decode("é".as_bytes().to_vec()).unwrap_err();
        assert_eq!(err.valid_up_to(), 0);
        assert_eq!(FsEncoding::Ascii.decode(b"plain".to_vec()).unwrap(), "plain");
    }

    #[test]
    fn latin1_decodes_every_byte() {
        let all: Vec<u8> = (0..=u8::MAX).collect();
        let text = FsEncoding::Latin1.decode(all.clone()).unwrap();
        assert_eq!(text.chars().count(), 256);
        assert_eq!(FsEncoding::Latin1.encode(&text).unwrap(), all);
    }

    #[test]
    fn encode_reverses_decode() {
        for (encoding, raw) in [
            (FsEncoding::Utf8, "naïve ☃".as_bytes()),
            (FsEncoding::Ascii, b"README.md".as_slice()),
            (FsEncoding::Latin1, b"r\xe9sum\xe9".as_slice()),
        ] {
            let text = encoding.decode(raw.to_vec()).unwrap();
            assert_eq!(encoding.encode(&text).unwrap(), raw, "{encoding}");
        }
        assert!(FsEncoding::Latin1.encode("☃").is_none());
        assert!(FsEncoding::Ascii.encode("é").is_none());
    }

    #[test]
    fn parse_labels() {
        assert_eq!("UTF-8".parse::<FsEncoding>().unwrap(), FsEncoding::Utf8);
        assert_eq!("utf8".parse::<FsEncoding>().unwrap(), FsEncoding::Utf8);
        assert_eq!("US-ASCII".parse::<FsEncoding>().unwrap(), FsEncoding::Ascii);
        assert_eq!("latin1".parse::<FsEncoding>().unwrap(), FsEncoding::Latin1);
        assert!("ebcdic".parse::<FsEncoding>().is_err());
    }

    #[test]
    fn entry_name_falls_back_to_bytes() {
        let name = EntryName::from_raw(b"\xc3\x28".to_vec(), Some(FsEncoding::Utf8));
        assert_eq!(name, EntryName::Bytes(b"\xc3\x28".to_vec()));
        assert_eq!(name, &b"\xc3\x28"[..]);

        let untouched = EntryName::from_raw(b"plain".to_vec(), None);
        assert_eq!(untouched, EntryName::Bytes(b"plain".to_vec()));
        assert!(!untouched.is_text());
    }

    #[test]
    fn display_is_lossy() {
        let name = EntryName::Bytes(b"a\xffb".to_vec());
        assert_eq!(name.to_string(), "a\u{fffd}b");
    }
}
