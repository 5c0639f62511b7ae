//! Domain layer: tree entities and the tree text parser
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod parser;
pub mod render;

pub use entities::{indent_of, name_of, Line, Node, Tree};
pub use error::{DomainError, DomainResult};
pub use parser::{parse, DuplicatePolicy, TreeTextParser};
pub use render::{render, TreeRender};
