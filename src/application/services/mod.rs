//! Application services
//!
//! Services coordinate domain logic with I/O operations.

pub mod convert;

pub use convert::{error_json, Conversion, ConvertOptions, ConvertService};
