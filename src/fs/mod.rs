mod buffer;
mod iter;
mod types;

pub use buffer::AlignedBuffer;
#[cfg(any(target_os = "linux", target_os = "android"))]
pub use iter::GetDents;
pub use iter::{DirStream, ReadDir};
pub use types::{FileDes, Result};

#[cfg(all(any(target_os = "linux", target_os = "android"), not(debug_assertions)))]
pub const BUFFER_SIZE: usize = 8 * 4096;

#[cfg(all(any(target_os = "linux", target_os = "android"), debug_assertions))]
pub const BUFFER_SIZE: usize = 4096; // Smaller in debug, test threads have small stacks

#[cfg(any(target_os = "linux", target_os = "android"))]
const_assert!(BUFFER_SIZE >= 4096, "Buffer size too small!");
