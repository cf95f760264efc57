//! Foreign memory port
//!
//! The roster core never talks to the OS directly. Everything goes through
//! [`ForeignMemory`] (raw byte reads and writes at absolute addresses) and
//! [`ProcessLocator`] (finding and opening the target). Typed little-endian
//! helpers are layered on top by [`MemoryReadExt`].

pub mod text;

// In-memory double for unit tests and, behind `test-util`, integration tests
#[cfg(any(test, feature = "test-util"))]
pub mod mock;

#[cfg(any(test, feature = "test-util"))]
pub use mock::{MockMemory, MockProcessLocator};
pub use text::{decode_wide, encode_wide_fixed};

use crate::core::types::{Address, MemoryError, MemoryResult, ProcessId};
use std::sync::Arc;

/// Byte-level access to another process's address space
pub trait ForeignMemory: Send + Sync {
    /// Reads exactly `len` bytes at `address`
    fn read_bytes(&self, address: Address, len: usize) -> MemoryResult<Vec<u8>>;

    /// Writes all of `data` at `address`
    fn write_bytes(&self, address: Address, data: &[u8]) -> MemoryResult<()>;
}

impl<T: ForeignMemory + ?Sized> ForeignMemory for Arc<T> {
    fn read_bytes(&self, address: Address, len: usize) -> MemoryResult<Vec<u8>> {
        (**self).read_bytes(address, len)
    }

    fn write_bytes(&self, address: Address, data: &[u8]) -> MemoryResult<()> {
        (**self).write_bytes(address, data)
    }
}

impl<T: ForeignMemory + ?Sized> ForeignMemory for &T {
    fn read_bytes(&self, address: Address, len: usize) -> MemoryResult<Vec<u8>> {
        (**self).read_bytes(address, len)
    }

    fn write_bytes(&self, address: Address, data: &[u8]) -> MemoryResult<()> {
        (**self).write_bytes(address, data)
    }
}

/// Finds and opens the target process
pub trait ProcessLocator {
    type Memory: ForeignMemory;

    /// Looks a process up by executable name (case-insensitive)
    fn find_process(&self, name: &str) -> MemoryResult<ProcessId>;

    /// Opens a read/write handle to the process
    fn open(&self, pid: ProcessId) -> MemoryResult<Self::Memory>;

    /// Base address of a loaded module in the opened process
    fn module_base(&self, memory: &Self::Memory, module: &str) -> MemoryResult<Address>;
}

fn fixed<const N: usize>(address: Address, bytes: Vec<u8>) -> MemoryResult<[u8; N]> {
    let actual = bytes.len();
    bytes
        .try_into()
        .map_err(|_| MemoryError::partial_transfer(address, N, actual))
}

/// Typed little-endian reads and writes over any [`ForeignMemory`]
pub trait MemoryReadExt: ForeignMemory {
    fn read_u8(&self, address: Address) -> MemoryResult<u8> {
        Ok(fixed::<1>(address, self.read_bytes(address, 1)?)?[0])
    }

    fn read_u16(&self, address: Address) -> MemoryResult<u16> {
        fixed(address, self.read_bytes(address, 2)?).map(u16::from_le_bytes)
    }

    fn read_u32(&self, address: Address) -> MemoryResult<u32> {
        fixed(address, self.read_bytes(address, 4)?).map(u32::from_le_bytes)
    }

    fn read_u64(&self, address: Address) -> MemoryResult<u64> {
        fixed(address, self.read_bytes(address, 8)?).map(u64::from_le_bytes)
    }

    /// Reads a pointer-sized value as an [`Address`]
    fn read_ptr(&self, address: Address) -> MemoryResult<Address> {
        self.read_u64(address).map(Address::new)
    }

    /// Reads a fixed-width UTF-16LE string of `max_chars` code units
    fn read_wide_string(&self, address: Address, max_chars: usize) -> MemoryResult<String> {
        let bytes = self.read_bytes(address, max_chars * 2)?;
        Ok(decode_wide(&bytes))
    }

    fn write_u32(&self, address: Address, value: u32) -> MemoryResult<()> {
        self.write_bytes(address, &value.to_le_bytes())
    }

    fn write_u64(&self, address: Address, value: u64) -> MemoryResult<()> {
        self.write_bytes(address, &value.to_le_bytes())
    }

    /// Writes `text` as a fixed-width UTF-16LE field, truncating and padding
    fn write_wide_string(&self, address: Address, text: &str, max_chars: usize) -> MemoryResult<()> {
        self.write_bytes(address, &encode_wide_fixed(text, max_chars))
    }
}

impl<T: ForeignMemory + ?Sized> MemoryReadExt for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_reads_are_little_endian() {
        let memory = MockMemory::new();
        memory.map(Address::new(0x1000), 16);
        memory.poke(Address::new(0x1000), &[0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]);

        assert_eq!(memory.read_u8(Address::new(0x1000)).unwrap(), 0x01);
        assert_eq!(memory.read_u16(Address::new(0x1000)).unwrap(), 0x0201);
        assert_eq!(memory.read_u32(Address::new(0x1000)).unwrap(), 0x0403_0201);
        assert_eq!(
            memory.read_u64(Address::new(0x1000)).unwrap(),
            0x0807_0605_0403_0201
        );
    }

    #[test]
    fn test_wide_string_round_trip() {
        let memory = MockMemory::new();
        memory.map(Address::new(0x2000), 64);
        memory
            .write_wide_string(Address::new(0x2000), "Doe", 20)
            .unwrap();
        assert_eq!(
            memory.read_wide_string(Address::new(0x2000), 20).unwrap(),
            "Doe"
        );
    }

    #[test]
    fn test_read_through_arc() {
        let memory = Arc::new(MockMemory::new());
        memory.map(Address::new(0x10), 4);
        memory.poke(Address::new(0x10), &42u32.to_le_bytes());
        let shared: Arc<dyn ForeignMemory> = memory;
        assert_eq!(shared.read_u32(Address::new(0x10)).unwrap(), 42);
    }
}
