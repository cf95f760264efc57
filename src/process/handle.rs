//! Process handle implementing the foreign memory port

use crate::core::types::{Address, MemoryError, MemoryResult, ProcessId};
use crate::memory::ForeignMemory;
use crate::windows::bindings::kernel32;
use crate::windows::types::Handle;
use crate::windows::utils::ErrorCode;
use std::fmt;
use tracing::trace;
use winapi::um::winnt::HANDLE;

/// Access rights for process handles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessAccess {
    value: u32,
}

impl ProcessAccess {
    pub const QUERY_INFORMATION: Self = Self { value: 0x0400 };
    pub const VM_READ: Self = Self { value: 0x0010 };
    pub const VM_WRITE: Self = Self { value: 0x0020 };
    pub const VM_OPERATION: Self = Self { value: 0x0008 };

    /// Combine access rights
    pub fn combine(rights: &[Self]) -> Self {
        Self {
            value: rights.iter().fold(0, |acc, right| acc | right.value),
        }
    }

    /// Everything an editing session needs
    pub fn read_write() -> Self {
        Self::combine(&[
            Self::QUERY_INFORMATION,
            Self::VM_READ,
            Self::VM_WRITE,
            Self::VM_OPERATION,
        ])
    }

    pub fn value(&self) -> u32 {
        self.value
    }
}

/// Open read/write handle to the game process
pub struct ProcessHandle {
    handle: Handle,
    pid: ProcessId,
}

impl ProcessHandle {
    /// Opens `pid` with read/write access
    pub fn open(pid: ProcessId) -> MemoryResult<Self> {
        let raw = kernel32::open_process(pid, ProcessAccess::read_write().value())?;
        Ok(ProcessHandle {
            handle: Handle::new(raw),
            pid,
        })
    }

    pub fn pid(&self) -> ProcessId {
        self.pid
    }

    /// Raw handle, valid as long as this value lives
    ///
    /// # Safety
    /// The handle must not be closed or outlive `self`
    pub unsafe fn raw(&self) -> HANDLE {
        self.handle.raw()
    }

    /// Whether the target is still running
    pub fn is_alive(&self) -> bool {
        unsafe { kernel32::process_is_alive(self.handle.raw()) }
    }

    /// Maps a failed transfer to an error, checking first whether the
    /// target is gone
    fn transfer_error(&self, address: Address, code: ErrorCode, write: bool) -> MemoryError {
        if code == ErrorCode::InvalidHandle {
            return MemoryError::InvalidHandle(format!("handle to process {}", self.pid));
        }
        if !self.is_alive() {
            return MemoryError::ProcessExited(self.pid);
        }
        if code == ErrorCode::AccessDenied {
            return MemoryError::access_denied(self.pid, format!("{} at {}", code, address));
        }
        if write {
            MemoryError::write_failed(address, code.to_string())
        } else {
            MemoryError::read_failed(address, code.to_string())
        }
    }
}

impl ForeignMemory for ProcessHandle {
    fn read_bytes(&self, address: Address, len: usize) -> MemoryResult<Vec<u8>> {
        let mut buffer = vec![0u8; len];
        if len == 0 {
            return Ok(buffer);
        }

        let result = unsafe {
            kernel32::read_process_memory(self.handle.raw(), address.as_u64(), &mut buffer)
        };
        let copied = result.map_err(|code| {
            trace!("Read of {} bytes at {} failed: {}", len, address, code);
            self.transfer_error(address, code, false)
        })?;

        if copied != len {
            return Err(MemoryError::partial_transfer(address, len, copied));
        }
        Ok(buffer)
    }

    fn write_bytes(&self, address: Address, data: &[u8]) -> MemoryResult<()> {
        if data.is_empty() {
            return Ok(());
        }

        let result =
            unsafe { kernel32::write_process_memory(self.handle.raw(), address.as_u64(), data) };
        let written = result.map_err(|code| {
            trace!("Write of {} bytes at {} failed: {}", data.len(), address, code);
            self.transfer_error(address, code, true)
        })?;

        if written != data.len() {
            return Err(MemoryError::partial_transfer(address, data.len(), written));
        }
        Ok(())
    }
}

impl fmt::Debug for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessHandle")
            .field("pid", &self.pid)
            .field("valid", &self.handle.is_valid())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryReadExt;

    #[test]
    fn test_access_combination() {
        let access = ProcessAccess::read_write();
        assert_eq!(access.value(), 0x0400 | 0x0010 | 0x0020 | 0x0008);
        assert_eq!(
            ProcessAccess::combine(&[ProcessAccess::VM_READ]).value(),
            0x0010
        );
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_open_invalid_pid_fails() {
        assert!(ProcessHandle::open(0).is_err());
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_read_and_write_own_process() {
        let handle = ProcessHandle::open(std::process::id()).unwrap();
        assert!(handle.is_alive());

        let mut value: u64 = 0x1122_3344_5566_7788;
        let address = Address::new(&mut value as *mut u64 as u64);
        assert_eq!(handle.read_u64(address).unwrap(), 0x1122_3344_5566_7788);

        handle.write_bytes(address, &[0xAA]).unwrap();
        let value = unsafe { std::ptr::read_volatile(&value) };
        assert_eq!(value & 0xFF, 0xAA);
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_unmapped_read_fails() {
        let handle = ProcessHandle::open(std::process::id()).unwrap();
        let err = handle.read_bytes(Address::new(0x10), 8).unwrap_err();
        assert!(!err.is_fatal());
    }
}
