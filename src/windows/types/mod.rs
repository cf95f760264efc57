//! Windows-specific wrapper types

pub mod handle;

pub use handle::Handle;
