//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric variable could not be parsed.
    #[error("failed to parse {name}='{value}': {source}")]
    InvalidNumber {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// A setting that must be positive is zero.
    #[error("{name} must be greater than zero")]
    ZeroValue { name: &'static str },

    /// A string setting is blank.
    #[error("{name} must not be empty")]
    EmptyValue { name: &'static str },

    /// The prompt budget cannot hold even the fixed prompt sections.
    #[error("prompt character budget {value} is below the minimum of {min}")]
    BudgetTooSmall { value: usize, min: usize },

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Path exists but is not a file (when a file was expected).
    #[error("path is not a file: {path}")]
    NotAFile { path: PathBuf },
}
