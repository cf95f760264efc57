//! Live process port for Windows
//!
//! Implements [`crate::memory::ForeignMemory`] and
//! [`crate::memory::ProcessLocator`] over the Win32 API.

pub mod handle;
pub mod locator;

pub use handle::{ProcessAccess, ProcessHandle};
pub use locator::WindowsProcessLocator;
