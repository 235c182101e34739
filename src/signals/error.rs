use thiserror::Error;

use crate::repository::RepositoryError;

#[derive(Debug, Error)]
pub enum SignalError {
    /// No user with this id exists.
    #[error("user not found: {user_id}")]
    UserNotFound { user_id: u64 },

    /// The user store itself failed.
    #[error("user lookup failed: {0}")]
    Repository(#[from] RepositoryError),
}
