use thiserror::Error;

use crate::repository::RepositoryError;
use crate::signals::SignalError;

#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("user not found: {user_id}")]
    UserNotFound { user_id: u64 },

    /// The user store failed while checking identity.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<SignalError> for RecommendError {
    fn from(e: SignalError) -> Self {
        match e {
            SignalError::UserNotFound { user_id } => Self::UserNotFound { user_id },
            SignalError::Repository(e) => Self::Repository(e),
        }
    }
}

/// Error returned when a mode name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown recommendation mode: {name}")]
pub struct ParseModeError {
    pub name: String,
}
