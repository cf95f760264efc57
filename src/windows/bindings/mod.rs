//! Windows API bindings
//!
//! Thin wrappers over the kernel32, psapi and toolhelp calls the process
//! port needs.

pub mod kernel32;
pub mod psapi;
pub mod toolhelp;

pub use toolhelp::{ProcessEntry, ProcessSnapshot};
