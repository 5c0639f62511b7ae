//! tree2json: convert `tree` command listings into nested structures.
//!
//! Architecture:
//! - `domain`: tree entities, the indentation parser, canonical rendering
//! - `application`: decoding, ASCII-art normalization, conversion service
//! - `infrastructure`: filesystem / HTTP boundaries and DI container
//! - `cli`: argument parsing and command dispatch
//! - `config`: layered settings
//!
//! ```
//! use tree2json::domain::parse;
//!
//! let tree = parse("root\n├── a\n│   └── b\n└── c");
//! assert!(tree.get_path(&["root", "a", "b"]).is_some());
//! assert!(tree.get_path(&["root", "c"]).is_some());
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{parse, render, Tree};
