use core::mem::MaybeUninit;

/**
 An 8-byte aligned, uninitialised byte buffer for the `getdents64` system call.

 The kernel writes `dirent64` records into it; only the prefix reported by the
 last call is ever read back.

 # Examples
 ```
 use listdir::fs::AlignedBuffer;

 // Purposely set a non-aligned amount to show alignment is forced.
 let buffer = AlignedBuffer::<1026>::new();
 assert_eq!(buffer.max_capacity(), 1026);
 assert!((buffer.as_ptr() as usize) % 8 == 0, "We expect the buffer to be aligned to 8 bytes");
 ```
*/
#[derive(Debug)]
#[repr(C, align(8))]
pub struct AlignedBuffer<const SIZE: usize> {
    pub(crate) data: MaybeUninit<[u8; SIZE]>,
}

#[allow(clippy::new_without_default)]
impl<const SIZE: usize> AlignedBuffer<SIZE> {
    /// Creates a new uninitialised aligned buffer
    #[must_use]
    #[inline]
    pub const fn new() -> Self {
        Self {
            data: MaybeUninit::uninit(),
        }
    }

    /// Returns a mutable pointer to the buffer's data
    #[inline]
    #[must_use]
    pub const fn as_mut_ptr(&mut self) -> *mut u8 {
        self.data.as_mut_ptr().cast()
    }

    /// Returns a const pointer to the buffer's data
    #[inline]
    #[must_use]
    pub const fn as_ptr(&self) -> *const u8 {
        self.data.as_ptr().cast()
    }

    /// Total capacity in bytes
    #[inline]
    #[must_use]
    pub const fn max_capacity(&self) -> usize {
        SIZE
    }

    /// Executes the getdents64 system call into this buffer
    #[inline]
    #[cfg(any(target_os = "linux", target_os = "android"))]
    pub fn getdents(&mut self, fd: &crate::fs::FileDes) -> isize {
        // SAFETY: we're passing a valid buffer of `SIZE` bytes
        unsafe { crate::util::getdents(fd.as_raw(), self.as_mut_ptr().cast(), SIZE) }
    }
}
