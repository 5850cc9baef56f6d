//! Domain-specific errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("tree root must be a folder, found file '{0}'")]
    RootNotFolder(String),
    #[error("empty node name under '{parent}'")]
    EmptyName { parent: String },
    #[error("node name '{name}' contains the path separator '{separator}'")]
    SeparatorInName { name: String, separator: String },
    #[error("path separator must not be empty")]
    EmptySeparator,
}
