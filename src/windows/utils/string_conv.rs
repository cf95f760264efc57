//! UTF-16 conversions for Windows API buffers

use std::ffi::OsString;
use std::os::windows::ffi::OsStringExt;

/// Converts a NUL-terminated (or full) UTF-16 buffer to a String
pub fn wide_to_string(wide: &[u16]) -> String {
    let len = wide.iter().position(|&c| c == 0).unwrap_or(wide.len());
    OsString::from_wide(&wide[..len])
        .to_string_lossy()
        .into_owned()
}

/// Case-insensitive executable or module name comparison, ignoring any
/// leading directory
pub fn image_name_matches(image: &str, wanted: &str) -> bool {
    let file = image.rsplit(['\\', '/']).next().unwrap_or(image);
    file.eq_ignore_ascii_case(wanted.trim())
}
