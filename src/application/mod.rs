//! Application layer: decoding, normalization and conversion services
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod decode;
pub mod error;
pub mod error_ext;
pub mod normalize;
pub mod services;
pub mod source;

pub use decode::{decode, lookup_encoding, Decoded, EncodingChoice};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use normalize::normalize_decorations;
pub use source::Source;
