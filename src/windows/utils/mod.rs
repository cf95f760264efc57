//! Windows utility functions

pub mod error_codes;
pub mod string_conv;

pub use error_codes::ErrorCode;
pub use string_conv::{image_name_matches, wide_to_string};
