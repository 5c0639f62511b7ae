//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the tree structure rules.
/// Parsing with the default policies never produces them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("duplicate entry '{name}' on line {line}")]
    DuplicateEntry { name: String, line: usize },

    #[error("unknown duplicate policy: {0} (expected overwrite, merge or reject)")]
    UnknownDuplicatePolicy(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
