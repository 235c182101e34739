use thiserror::Error;

use crate::repository::RepositoryError;

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("recipe not found: {recipe_id}")]
    RecipeNotFound { recipe_id: u64 },

    #[error("user not found: {user_id}")]
    UserNotFound { user_id: u64 },

    /// The recipe or user store failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}
