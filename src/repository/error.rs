use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by storage collaborators.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The backing store could not serve the request.
    #[error("repository backend failed: {message}")]
    Backend { message: String },

    /// A recipe with the same title already exists (uniqueness constraint).
    #[error("recipe title already exists: {title}")]
    UniqueViolation { title: String },

    /// Seed data could not be read.
    #[error("failed to read seed file {path}: {source}")]
    SeedIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Seed data is not valid JSON for the expected shape.
    #[error("failed to parse seed file {path}: {source}")]
    SeedFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl RepositoryError {
    /// Shorthand for [`RepositoryError::Backend`].
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
