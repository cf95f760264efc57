//! Custom error types for roster memory access

use std::fmt;
use thiserror::Error;

/// Main error type for memory and roster operations
#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("Invalid memory address: {0}")]
    InvalidAddress(String),

    #[error("Process not found: {0}")]
    ProcessNotFound(String),

    #[error("Access denied to process {pid}: {reason}")]
    AccessDenied { pid: u32, reason: String },

    #[error("Module not found: {0}")]
    ModuleNotFound(String),

    #[error("Failed to read memory at {address}: {reason}")]
    ReadFailed { address: String, reason: String },

    #[error("Failed to write memory at {address}: {reason}")]
    WriteFailed { address: String, reason: String },

    #[error("Partial transfer at {address}: expected {expected} bytes, moved {actual}")]
    PartialTransfer {
        address: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid handle: {0}")]
    InvalidHandle(String),

    #[error("Process {0} has exited")]
    ProcessExited(u32),

    #[error("{0} table has not been resolved")]
    TableUnresolved(String),

    #[error("Invalid field: {0}")]
    InvalidField(String),

    #[error("No entity matches {0}")]
    EntityNotFound(String),

    #[error("Slot {slot} is out of range (scanned {count})")]
    SlotOutOfRange { slot: u32, count: usize },

    #[error("Session unavailable: {0}")]
    SessionUnavailable(String),

    #[error("Windows API: {0}")]
    WindowsApi(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for memory operations
pub type MemoryResult<T> = Result<T, MemoryError>;

impl MemoryError {
    /// Creates an access denied error for a process
    pub fn access_denied(pid: u32, reason: impl Into<String>) -> Self {
        MemoryError::AccessDenied {
            pid,
            reason: reason.into(),
        }
    }

    /// Creates a read failed error
    pub fn read_failed(address: impl fmt::Display, reason: impl Into<String>) -> Self {
        MemoryError::ReadFailed {
            address: address.to_string(),
            reason: reason.into(),
        }
    }

    /// Creates a write failed error
    pub fn write_failed(address: impl fmt::Display, reason: impl Into<String>) -> Self {
        MemoryError::WriteFailed {
            address: address.to_string(),
            reason: reason.into(),
        }
    }

    /// Creates a partial transfer error
    pub fn partial_transfer(address: impl fmt::Display, expected: usize, actual: usize) -> Self {
        MemoryError::PartialTransfer {
            address: address.to_string(),
            expected,
            actual,
        }
    }

    /// Creates a table unresolved error
    pub fn table_unresolved(table: impl Into<String>) -> Self {
        MemoryError::TableUnresolved(table.into())
    }

    /// True when the handle or the target process is gone.
    ///
    /// Scans abort on a fatal error instead of skipping the slot.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            MemoryError::InvalidHandle(_) | MemoryError::ProcessExited(_)
        )
    }
}
