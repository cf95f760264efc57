//! Core module containing fundamental types for roster memory access
//!
//! Address handling, decoded player and team records, bitfield
//! descriptors and the error type.

pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    Address, BitSpan, FieldDescriptor, FieldKind, MemoryError, MemoryResult, Player, Team,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
