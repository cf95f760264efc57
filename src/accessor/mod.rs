//! Field accessor
//!
//! Bounded reads and read-modify-writes of bitfields and fixed-width text
//! inside one record of a resolved table. Every write touches only the
//! bytes covering the field, and those bytes are read first.

pub mod batch;
pub mod blocks;
pub mod randomize;
pub mod values;

pub use batch::{apply_edits, BatchEdit, BatchReport, EditOutcome, EntitySelector};
pub use blocks::{CopyBlock, TEAM_TEXT_FIELDS};
pub use randomize::{RandomizePlan, RatingRange, RANDOMIZED_CATEGORIES};
pub use values::{decode_value, encode_value, FieldValue};

use crate::codec::{extract_bits, insert_bits};
use crate::core::types::{Address, BitSpan, MemoryError, MemoryResult, Slot, TextField};
use crate::memory::{ForeignMemory, MemoryReadExt};
use tracing::trace;

/// Record-relative access into one table
#[derive(Clone, Copy)]
pub struct FieldAccessor<'a> {
    memory: &'a dyn ForeignMemory,
    base: Address,
    stride: u64,
}

impl<'a> FieldAccessor<'a> {
    pub fn new(memory: &'a dyn ForeignMemory, base: Address, stride: u64) -> Self {
        FieldAccessor {
            memory,
            base,
            stride,
        }
    }

    pub fn base(&self) -> Address {
        self.base
    }

    pub fn stride(&self) -> u64 {
        self.stride
    }

    /// Absolute address of a record
    pub fn record(&self, slot: Slot) -> Address {
        self.base.element(slot as u64, self.stride)
    }

    fn check_span(span: &BitSpan) -> MemoryResult<()> {
        if span.width == 0 || span.width > 64 || span.start_bit > 7 {
            return Err(MemoryError::InvalidField(span.to_string()));
        }
        Ok(())
    }

    /// Reads the raw value of a bitfield
    pub fn get_field(&self, slot: Slot, span: BitSpan) -> MemoryResult<u64> {
        Self::check_span(&span)?;
        let address = self.record(slot).offset(span.offset);
        let bytes = self.memory.read_bytes(address, span.byte_len())?;
        trace!("get {} at {}: {}", span, address, hex::encode(&bytes));
        Ok(extract_bits(&bytes, span.start_bit, span.width))
    }

    /// Writes a raw value (clamped to the field width) into a bitfield.
    ///
    /// Fails without writing if the covering bytes cannot be read.
    pub fn set_field(&self, slot: Slot, span: BitSpan, value: u64) -> MemoryResult<()> {
        Self::check_span(&span)?;
        let address = self.record(slot).offset(span.offset);
        let mut bytes = self.memory.read_bytes(address, span.byte_len())?;
        let before = hex::encode(&bytes);
        insert_bits(&mut bytes, span.start_bit, span.width, value);
        trace!(
            "set {} at {}: {} -> {}",
            span,
            address,
            before,
            hex::encode(&bytes)
        );
        self.memory.write_bytes(address, &bytes)
    }

    /// Reads a fixed-width UTF-16 field
    pub fn get_text(&self, slot: Slot, field: &TextField) -> MemoryResult<String> {
        self.memory
            .read_wide_string(self.record(slot).offset(field.offset), field.max_chars)
    }

    /// Writes a fixed-width UTF-16 field, truncating and null-padding
    pub fn set_text(&self, slot: Slot, field: &TextField, text: &str) -> MemoryResult<()> {
        self.memory.write_wide_string(
            self.record(slot).offset(field.offset),
            text,
            field.max_chars,
        )
    }

    pub fn get_u32(&self, slot: Slot, offset: u64) -> MemoryResult<u32> {
        self.memory.read_u32(self.record(slot).offset(offset))
    }

    pub fn set_u32(&self, slot: Slot, offset: u64, value: u32) -> MemoryResult<()> {
        self.memory.write_u32(self.record(slot).offset(offset), value)
    }

    /// Points the pointer field at `offset` of a record to `target`
    pub fn set_ptr(&self, slot: Slot, offset: u64, target: Address) -> MemoryResult<()> {
        self.memory.write_u64(self.record(slot).offset(offset), target.as_u64())
    }

    /// Copies `len` bytes at `offset` from one record to another
    pub fn copy_bytes(&self, src: Slot, dst: Slot, offset: u64, len: usize) -> MemoryResult<()> {
        let data = self.memory.read_bytes(self.record(src).offset(offset), len)?;
        self.memory.write_bytes(self.record(dst).offset(offset), &data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MockMemory;

    const BASE: Address = Address::new(0x40_0000);
    const STRIDE: u64 = 0x448;

    fn setup() -> MockMemory {
        let memory = MockMemory::new();
        memory.map(BASE, STRIDE as usize * 2);
        memory
    }

    #[test]
    fn test_set_then_get() {
        let memory = setup();
        let accessor = FieldAccessor::new(&memory, BASE, STRIDE);
        let span = BitSpan::new(0x392, 3, 7);

        accessor.set_field(1, span, 99).unwrap();
        assert_eq!(accessor.get_field(1, span).unwrap(), 99);
        assert_eq!(accessor.get_field(0, span).unwrap(), 0);

        accessor.set_field(1, span, 1000).unwrap();
        assert_eq!(accessor.get_field(1, span).unwrap(), 127);
    }

    #[test]
    fn test_set_preserves_neighbouring_bits() {
        let memory = setup();
        let record = BASE.element(1, STRIDE);
        memory.poke(record.offset(0x391), &[0xAA, 0xFF, 0xFF, 0x55]);
        let accessor = FieldAccessor::new(&memory, BASE, STRIDE);

        accessor.set_field(1, BitSpan::new(0x392, 3, 7), 0).unwrap();
        assert_eq!(
            memory.peek(record.offset(0x391), 4).unwrap(),
            vec![0xAA, 0b0000_0111, 0b1111_1100, 0x55]
        );
    }

    #[test]
    fn test_unreadable_field_is_not_written() {
        let memory = setup();
        let accessor = FieldAccessor::new(&memory, BASE, STRIDE);
        let span = BitSpan::new(0x10, 0, 8);
        memory.fault(BASE.offset(0x10), 1);

        assert!(accessor.set_field(0, span, 5).is_err());
        assert_eq!(memory.write_count(), 0);
    }

    #[test]
    fn test_invalid_span() {
        let memory = setup();
        let accessor = FieldAccessor::new(&memory, BASE, STRIDE);
        assert!(matches!(
            accessor.get_field(0, BitSpan::new(0, 0, 0)),
            Err(MemoryError::InvalidField(_))
        ));
        assert!(accessor.set_field(0, BitSpan::new(0, 8, 4), 1).is_err());
        assert!(accessor.get_field(0, BitSpan::new(0, 0, 65)).is_err());
    }

    #[test]
    fn test_text_round_trip() {
        let memory = setup();
        let accessor = FieldAccessor::new(&memory, BASE, STRIDE);
        let field = TextField::new("First Name", 0x28, 20);

        accessor.set_text(1, &field, "A very long first name here").unwrap();
        assert_eq!(accessor.get_text(1, &field).unwrap(), "A very long first n");
    }

    #[test]
    fn test_set_ptr() {
        let memory = setup();
        let accessor = FieldAccessor::new(&memory, BASE, STRIDE);
        accessor.set_ptr(1, 0x60, Address::new(0x3000_0450)).unwrap();
        assert_eq!(
            memory.read_u64(BASE.element(1, STRIDE).offset(0x60)).unwrap(),
            0x3000_0450
        );
        assert_eq!(memory.read_u64(BASE.offset(0x60)).unwrap(), 0);
    }

    #[test]
    fn test_copy_bytes() {
        let memory = setup();
        let accessor = FieldAccessor::new(&memory, BASE, STRIDE);
        memory.poke(BASE.offset(0x3C8), &[1, 2, 3]);
        accessor.copy_bytes(0, 1, 0x3C8, 3).unwrap();
        assert_eq!(
            memory.peek(BASE.element(1, STRIDE).offset(0x3C8), 3).unwrap(),
            vec![1, 2, 3]
        );
    }
}
