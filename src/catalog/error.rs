use thiserror::Error;

use crate::oracle::OracleError;
use crate::repository::RepositoryError;
use crate::signals::SignalError;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// The recipe is missing a title or ingredients.
    #[error("invalid recipe: {reason}")]
    InvalidRecipe { reason: String },

    /// A recipe with this title already exists.
    #[error("recipe already exists: {title}")]
    PersistenceConflict { title: String },

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Signal(#[from] SignalError),

    #[error("recipe generation failed: {0}")]
    Oracle(#[from] OracleError),

    /// The answer held no recipe that could be stored.
    #[error("oracle returned no usable recommendations")]
    EmptyRecommendations,
}
