//! Owned HANDLE with automatic cleanup

use crate::windows::bindings::kernel32;
use std::ptr;
use winapi::um::handleapi::INVALID_HANDLE_VALUE;
use winapi::um::winnt::HANDLE;

/// Owns a Windows HANDLE and closes it on drop
pub struct Handle {
    handle: HANDLE,
}

impl Handle {
    pub fn new(handle: HANDLE) -> Self {
        Handle { handle }
    }

    pub fn null() -> Self {
        Handle {
            handle: ptr::null_mut(),
        }
    }

    /// False for null and for `INVALID_HANDLE_VALUE`, which the snapshot
    /// APIs return on failure
    pub fn is_valid(&self) -> bool {
        !self.handle.is_null() && self.handle != INVALID_HANDLE_VALUE
    }

    pub fn raw(&self) -> HANDLE {
        self.handle
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        if self.is_valid() {
            unsafe {
                let _ = kernel32::close_handle(self.handle);
            }
        }
    }
}

// HANDLE values are plain process-wide identifiers
unsafe impl Send for Handle {}
unsafe impl Sync for Handle {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_handle_is_invalid() {
        let handle = Handle::null();
        assert!(!handle.is_valid());
        assert_eq!(handle.raw(), ptr::null_mut());
    }

    #[test]
    fn test_invalid_handle_value_is_not_closed() {
        let handle = Handle::new(INVALID_HANDLE_VALUE);
        assert!(!handle.is_valid());
        drop(handle);
    }
}
