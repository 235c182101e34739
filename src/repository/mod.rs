//! Read/write interfaces to the collaborators that own persistent data.
//!
//! Recipes, users and the per-user signal subsystems (allergies, health goals, health
//! metrics, owned ingredients) live outside this crate. The pipeline only sees the narrow
//! traits below. [`memory`] provides in-process implementations used by the binary and
//! by tests.

pub mod error;
pub mod memory;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::{Candidate, NewRecipe, RecipeCategory};

pub use error::{RepositoryError, RepositoryResult};
pub use memory::{
    MemoryRecipeRepository, MemoryUserDirectory, RecipeOp, Seed, SignalSource, UserProfile,
};

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub nickname: String,
}

#[async_trait]
/// Recipe storage.
pub trait RecipeRepository: Send + Sync {
    /// Total number of stored recipes.
    async fn count(&self) -> RepositoryResult<u64>;
    /// Every stored recipe.
    async fn find_all(&self) -> RepositoryResult<Vec<Candidate>>;
    /// Storage-native random selection of up to `limit` recipes.
    async fn find_random(&self, limit: usize) -> RepositoryResult<Vec<Candidate>>;
    /// Up to `limit` recipes in id order, starting at a random id in
    /// `[1, max(1, max_id - limit + 1)]`.
    async fn find_random_by_pk_range(&self, limit: usize) -> RepositoryResult<Vec<Candidate>>;
    /// Recipe by primary key.
    async fn find_by_id(&self, id: u64) -> RepositoryResult<Option<Candidate>>;
    /// Up to `limit` recipes tagged with any of `categories`.
    async fn find_by_categories(
        &self,
        categories: &[RecipeCategory],
        limit: usize,
    ) -> RepositoryResult<Vec<Candidate>>;
    /// Persists a new recipe. Fails with [`RepositoryError::UniqueViolation`] on a taken title.
    async fn save(&self, recipe: NewRecipe) -> RepositoryResult<Candidate>;
    /// Returns `true` if a recipe with this title is stored.
    async fn exists_by_title(&self, title: &str) -> RepositoryResult<bool>;
}

#[async_trait]
/// User identity lookup.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: u64) -> RepositoryResult<Option<User>>;
}

#[async_trait]
/// Allergy subsystem: items the user must never be served.
pub trait AllergyReader: Send + Sync {
    async fn get_exclusions(&self, user_id: u64) -> RepositoryResult<Vec<String>>;
}

#[async_trait]
/// Health-goal subsystem.
pub trait HealthGoalReader: Send + Sync {
    async fn get_goals(&self, user_id: u64) -> RepositoryResult<Vec<String>>;
}

#[async_trait]
/// Latest extracted health metrics (e.g. from a scanned checkup report).
pub trait HealthMetricsReader: Send + Sync {
    async fn get_latest(&self, user_id: u64) -> RepositoryResult<BTreeMap<String, String>>;
}

#[async_trait]
/// Ingredients currently in the user's fridge.
pub trait IngredientReader: Send + Sync {
    async fn get_owned(&self, user_id: u64) -> RepositoryResult<Vec<String>>;
}
