mod utils;

#[cfg(any(target_os = "linux", target_os = "android"))]
pub use utils::getdents;
pub use utils::{cstr_to_path, dirent_name_length};
pub(crate) use utils::{errno, set_errno};
