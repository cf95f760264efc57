//! Foreign-process address wrapper with hex parsing

use super::error::{MemoryError, MemoryResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An absolute address inside the target process.
///
/// The target is always a 64-bit process, so the wrapper carries a `u64`
/// regardless of the host pointer width.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Address(pub u64);

impl Address {
    /// Creates a new address from a raw value
    pub const fn new(value: u64) -> Self {
        Address(value)
    }

    /// Creates a null address (0x0)
    pub const fn null() -> Self {
        Address(0)
    }

    /// Checks if the address is null
    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// Adds a byte offset, wrapping on overflow
    pub const fn offset(&self, offset: u64) -> Self {
        Address(self.0.wrapping_add(offset))
    }

    /// Address of element `index` in an array of `stride`-byte records
    pub const fn element(&self, index: u64, stride: u64) -> Self {
        Address(self.0.wrapping_add(index.wrapping_mul(stride)))
    }

    /// Byte distance from `base`, if this address is not below it
    pub const fn distance_from(&self, base: Address) -> Option<u64> {
        self.0.checked_sub(base.0)
    }

    /// Returns the raw value
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Parses a hex offset string as written in offset maps and config files.
///
/// Accepts `0x`/`0X`/`$` prefixes; bare strings are read as hex.
pub fn parse_hex_u64(s: &str) -> MemoryResult<u64> {
    let s = s.trim();
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .or_else(|| s.strip_prefix('$'))
        .unwrap_or(s);
    u64::from_str_radix(digits, 16).map_err(|_| MemoryError::InvalidAddress(s.to_string()))
}

impl FromStr for Address {
    type Err = MemoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex_prefixed = trimmed.starts_with("0x")
            || trimmed.starts_with("0X")
            || trimmed.starts_with('$')
            || trimmed.chars().any(|c| c.is_ascii_alphabetic());

        let value = if hex_prefixed {
            parse_hex_u64(trimmed)
        } else {
            trimmed
                .parse::<u64>()
                .map_err(|_| MemoryError::InvalidAddress(trimmed.to_string()))
        };
        value.map(Address::new)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016X}", self.0)
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016x}", self.0)
    }
}

impl fmt::UpperHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016X}", self.0)
    }
}

impl From<u64> for Address {
    fn from(value: u64) -> Self {
        Address::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_parsing() {
        assert_eq!(Address::from_str("0x1000").unwrap(), Address::new(0x1000));
        assert_eq!(Address::from_str("0X1000").unwrap(), Address::new(0x1000));
        assert_eq!(Address::from_str("$1000").unwrap(), Address::new(0x1000));
        assert_eq!(
            Address::from_str("7E52998").unwrap(),
            Address::new(0x07E5_2998)
        );
        assert_eq!(Address::from_str("4096").unwrap(), Address::new(4096));
        assert!(Address::from_str("0xZZ").is_err());
    }

    #[test]
    fn test_parse_hex_u64() {
        assert_eq!(parse_hex_u64("0x448").unwrap(), 0x448);
        assert_eq!(parse_hex_u64(" 2D4 ").unwrap(), 0x2D4);
        assert_eq!(parse_hex_u64("0x12F7").unwrap(), 0x12F7);
        assert!(parse_hex_u64("").is_err());
    }

    #[test]
    fn test_address_arithmetic() {
        let base = Address::new(0x1000);
        assert_eq!(base.offset(0x28), Address::new(0x1028));
        assert_eq!(base.element(3, 0x448), Address::new(0x1000 + 3 * 0x448));
        assert_eq!(Address::new(0x1448).distance_from(base), Some(0x448));
        assert_eq!(Address::new(0x0FFF).distance_from(base), None);
        assert!(Address::null().is_null());
    }

    #[test]
    fn test_address_display() {
        let addr = Address::new(0xDEADBEEF);
        assert_eq!(format!("{}", addr), "0x00000000DEADBEEF");
        assert_eq!(format!("{:x}", addr), "0x00000000deadbeef");
        assert_eq!(format!("{:X}", addr), "0x00000000DEADBEEF");
    }
}
