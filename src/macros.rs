#[macro_export]
/**
 A helper macro to access the fields of a `libc::dirent`/`libc::dirent64` aka 'dirent-type' struct.

  # Safety
  - The caller must ensure that the pointer is valid and points to a 'dirent-type' struct.
  - The field name must be a valid field of the 'dirent-type' struct on this platform.

  # Usage
  ```ignore
  let entry_ptr: *const libc::dirent64 = ...; // Assume this is a valid pointer to a dirent struct
  let d_name_ptr: *const u8 = access_dirent!(entry_ptr, d_name);
  let d_reclen: usize = access_dirent!(entry_ptr, d_reclen);
  let d_namlen: usize = access_dirent!(entry_ptr, d_namlen); // only where the build script found `d_namlen`
  ```
*/
macro_rules! access_dirent {
    ($entry_ptr:expr, d_reclen) => {{
        // SAFETY: Caller must ensure pointer is valid
        (*$entry_ptr).d_reclen as usize
    }};
    ($entry_ptr:expr, d_namlen) => {{
        // SAFETY: Caller must ensure pointer is valid
        (*$entry_ptr).d_namlen as usize
    }};
    ($entry_ptr:expr, d_name) => {{
        // d_name isn't guaranteed to really be [c_char; 256], never read it by value
        (&raw const (*$entry_ptr).d_name).cast::<_>()
    }};
}

#[macro_export]
/**
 A compile time assert, mirroring `static_assert` from C++

 # Examples
 ```
 use listdir::const_assert;
 const CONSTANT_VALUE: usize = 69;
 const_assert!(2 + 2 == 4);
 const_assert!(size_of::<u32>() >= 4, "u32 must be 4 bytes!");
 const_assert!(CONSTANT_VALUE > 0, "CONSTANT_VALUE must be positive");
 ```
*/
macro_rules! const_assert {
    ($cond:expr $(,)?) => {
        const _: () = {
            if !$cond {
                panic!(concat!("const assertion failed: ", stringify!($cond)));
            }
        };
    };
    ($cond:expr, $($arg:tt)+) => {
        const _: () = {
            if !$cond {
                panic!($($arg)+);
            }
        };
    };
}

/**
 Runs `$action` when the name is exactly "." or "..".

 Only the two pseudo-entries match; ".hidden", "..." and "..x" are real entries.
 The length is checked first so the common case is a single compare.
*/
macro_rules! skip_dot_or_dot_dot_entries {
    ($name:expr, $action:expr) => {{
        let name: &[u8] = $name;
        if name.len() <= 2 {
            match name {
                b"." | b".." => $action,
                _ => (),
            }
        }
    }};
}

/// Builds a `ListDirError` from the thread's current `errno`
macro_rules! last_os_error {
    ($kind:ident, $path:expr) => {{
        // read errno before anything else can allocate and clobber it
        let source = std::io::Error::last_os_error();
        $crate::ListDirError::$kind($crate::util::cstr_to_path($path), source)
    }};
}
