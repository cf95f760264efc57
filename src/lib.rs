//! Roster-Memory: live NBA 2K25 roster editing in game memory
//!
//! Locates the player and team tables of a running game, decodes them into
//! snapshots and edits bit-packed player fields in place. All memory access
//! goes through the [`memory::ForeignMemory`] port; [`process`] implements it
//! for a live Windows process, and `memory::MockMemory` (feature
//! `test-util`) stands in for it in tests.

pub mod accessor;
pub mod codec;
pub mod config;
pub mod core;
pub mod import;
pub mod index;
pub mod memory;
pub mod resolver;
pub mod scanner;
pub mod session;

#[cfg(windows)]
pub mod process;
#[cfg(windows)]
pub mod windows;

pub use accessor::{
    BatchEdit, BatchReport, CopyBlock, EntitySelector, FieldAccessor, FieldValue, RandomizePlan,
    RatingRange,
};
pub use codec::RatingScale;
pub use config::{Config, ConfigError, OffsetMap};
pub use core::types::{
    Address, BitSpan, FieldDescriptor, MemoryError, MemoryResult, Player, ProcessId, Slot, Team,
    FREE_AGENTS,
};
pub use import::ImportSummary;
pub use memory::{ForeignMemory, MemoryReadExt, ProcessLocator};
pub use session::{RosterSession, RosterSnapshot, SharedRoster, ShuffleReport};

#[cfg(windows)]
pub use process::{ProcessHandle, WindowsProcessLocator};
