//! Windows API layer
//!
//! Every unsafe FFI call of the crate lives below this module. The process
//! port in [`crate::process`] builds on these wrappers.

pub mod bindings;
pub mod types;
pub mod utils;

pub use bindings::{ProcessEntry, ProcessSnapshot};
pub use types::Handle;
pub use utils::ErrorCode;
