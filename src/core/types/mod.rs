//! Core type definitions for roster memory access
//!
//! Address wrappers, decoded records, field descriptors and the error type
//! shared by every layer of the crate.

mod address;
mod entity;
mod error;
mod field;

// Re-export all public types
pub use address::{parse_hex_u64, Address};
pub use entity::{name_key, Player, Team, FREE_AGENTS, UNKNOWN_TEAM};
pub use error::{MemoryError, MemoryResult};
pub use field::{category, BitSpan, FieldDescriptor, FieldKind, TextField};

// Common type aliases
pub type ProcessId = u32;
pub type Slot = u32;
