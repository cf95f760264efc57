//! Windows error code handling

use std::fmt;
use winapi::um::errhandlingapi::GetLastError;

/// Windows error codes the memory port tells apart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success,
    AccessDenied,
    InvalidHandle,
    InvalidParameter,
    PartialCopy,
    NoAccess,
    Other(u32),
}

impl From<u32> for ErrorCode {
    fn from(code: u32) -> Self {
        match code {
            0 => ErrorCode::Success,
            5 => ErrorCode::AccessDenied,
            6 => ErrorCode::InvalidHandle,
            87 => ErrorCode::InvalidParameter,
            299 => ErrorCode::PartialCopy,
            998 => ErrorCode::NoAccess,
            _ => ErrorCode::Other(code),
        }
    }
}

impl ErrorCode {
    /// The calling thread's last error
    pub fn last_error() -> Self {
        unsafe { ErrorCode::from(GetLastError()) }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Success => write!(f, "success"),
            ErrorCode::AccessDenied => write!(f, "access denied"),
            ErrorCode::InvalidHandle => write!(f, "invalid handle"),
            ErrorCode::InvalidParameter => write!(f, "invalid parameter"),
            ErrorCode::PartialCopy => write!(f, "only part of the request completed"),
            ErrorCode::NoAccess => write!(f, "invalid access to memory location"),
            ErrorCode::Other(code) => write!(f, "error {}", code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_conversion() {
        assert_eq!(ErrorCode::from(0), ErrorCode::Success);
        assert_eq!(ErrorCode::from(6), ErrorCode::InvalidHandle);
        assert_eq!(ErrorCode::from(299), ErrorCode::PartialCopy);
        assert_eq!(ErrorCode::from(1234), ErrorCode::Other(1234));
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::AccessDenied.to_string(), "access denied");
        assert_eq!(ErrorCode::Other(31).to_string(), "error 31");
    }
}
