//! FFI safety wrappers for data read out of loaded modules.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// Converts a C string pointer to a Rust `String`.
///
/// Returns `None` for a null pointer. Invalid UTF-8 is replaced lossily,
/// since version strings are display-only.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that stays
/// valid for the duration of the call.
pub unsafe fn c_str_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    let s = unsafe { CStr::from_ptr(ptr) };
    Some(s.to_string_lossy().into_owned())
}

/// Builds a symbol name suitable for the dynamic loader.
///
/// Returns `None` if the name contains an interior NUL byte.
pub fn symbol_name(name: &str) -> Option<CString> {
    CString::new(name).ok()
}
