//! In-process repositories backed by ordered maps.
//!
//! Used by the `savor` binary (loaded from a JSON seed file) and by tests. Fault injection
//! hooks are only compiled for tests and the `mock` feature.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use tracing::debug;

use super::error::{RepositoryError, RepositoryResult};
use super::{
    AllergyReader, HealthGoalReader, HealthMetricsReader, IngredientReader, RecipeRepository,
    User, UserRepository,
};
use crate::model::{Candidate, NewRecipe, RecipeCategory};

/// Repository operations that can be forced to fail in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecipeOp {
    Count,
    FindAll,
    FindRandom,
    FindRandomByPkRange,
    FindById,
    FindByCategories,
    Save,
    ExistsByTitle,
}

/// Recipe store keyed by id.
#[derive(Debug)]
pub struct MemoryRecipeRepository {
    recipes: RwLock<BTreeMap<u64, Candidate>>,
    next_id: AtomicU64,
    failing: RwLock<HashSet<RecipeOp>>,
}

impl Default for MemoryRecipeRepository {
    fn default() -> Self {
        Self {
            recipes: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
            failing: RwLock::new(HashSet::new()),
        }
    }
}

impl MemoryRecipeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a repository holding `recipes`, assigning ids from 1 in order.
    pub fn with_recipes(recipes: impl IntoIterator<Item = NewRecipe>) -> Self {
        let repo = Self::new();
        {
            let mut map = repo.recipes.write();
            for recipe in recipes {
                let id = repo.next_id.fetch_add(1, Ordering::Relaxed);
                map.insert(id, recipe.into_candidate(id));
            }
        }
        repo
    }

    /// Number of stored recipes.
    pub fn len(&self) -> usize {
        self.recipes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.read().is_empty()
    }

    /// Makes `op` return [`RepositoryError::Backend`] until cleared.
    #[cfg(any(test, feature = "mock"))]
    pub fn fail_on(&self, op: RecipeOp) {
        self.failing.write().insert(op);
    }

    /// Clears every injected failure.
    #[cfg(any(test, feature = "mock"))]
    pub fn clear_failures(&self) {
        self.failing.write().clear();
    }

    fn check(&self, op: RecipeOp) -> RepositoryResult<()> {
        if self.failing.read().contains(&op) {
            return Err(RepositoryError::backend(format!("injected failure: {op:?}")));
        }
        Ok(())
    }

    fn pick_random(&self, limit: usize) -> Vec<Candidate> {
        let map = self.recipes.read();
        let all: Vec<&Candidate> = map.values().collect();
        let mut rng = rand::thread_rng();
        all.choose_multiple(&mut rng, limit)
            .map(|c| (*c).clone())
            .collect()
    }

    fn pick_from_random_pk(&self, limit: usize) -> Vec<Candidate> {
        let map = self.recipes.read();
        let Some(max_id) = map.keys().next_back().copied() else {
            return Vec::new();
        };
        // Latest start that still leaves room for a full window.
        let last_start = max_id.saturating_sub(limit as u64).saturating_add(1).max(1);
        let start = rand::thread_rng().gen_range(1..=last_start);
        map.range(start..).take(limit).map(|(_, c)| c.clone()).collect()
    }
}

#[async_trait]
impl RecipeRepository for MemoryRecipeRepository {
    async fn count(&self) -> RepositoryResult<u64> {
        self.check(RecipeOp::Count)?;
        Ok(self.recipes.read().len() as u64)
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Candidate>> {
        self.check(RecipeOp::FindAll)?;
        Ok(self.recipes.read().values().cloned().collect())
    }

    async fn find_random(&self, limit: usize) -> RepositoryResult<Vec<Candidate>> {
        self.check(RecipeOp::FindRandom)?;
        Ok(self.pick_random(limit))
    }

    async fn find_random_by_pk_range(&self, limit: usize) -> RepositoryResult<Vec<Candidate>> {
        self.check(RecipeOp::FindRandomByPkRange)?;
        Ok(self.pick_from_random_pk(limit))
    }

    async fn find_by_id(&self, id: u64) -> RepositoryResult<Option<Candidate>> {
        self.check(RecipeOp::FindById)?;
        Ok(self.recipes.read().get(&id).cloned())
    }

    async fn find_by_categories(
        &self,
        categories: &[RecipeCategory],
        limit: usize,
    ) -> RepositoryResult<Vec<Candidate>> {
        self.check(RecipeOp::FindByCategories)?;
        Ok(self
            .recipes
            .read()
            .values()
            .filter(|c| categories.iter().any(|cat| c.has_category(*cat)))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn save(&self, recipe: NewRecipe) -> RepositoryResult<Candidate> {
        self.check(RecipeOp::Save)?;
        let mut map = self.recipes.write();
        if map.values().any(|c| c.title == recipe.title) {
            return Err(RepositoryError::UniqueViolation {
                title: recipe.title,
            });
        }
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let candidate = recipe.into_candidate(id);
        map.insert(id, candidate.clone());
        debug!(recipe_id = id, title = %candidate.title, "Saved recipe");
        Ok(candidate)
    }

    async fn exists_by_title(&self, title: &str) -> RepositoryResult<bool> {
        self.check(RecipeOp::ExistsByTitle)?;
        Ok(self.recipes.read().values().any(|c| c.title == title))
    }
}

/// Everything the signal subsystems know about one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: u64,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub health_goals: Vec<String>,
    #[serde(default)]
    pub health_metrics: BTreeMap<String, String>,
    #[serde(default)]
    pub owned_ingredients: Vec<String>,
}

/// Signal sources that can be forced to fail in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalSource {
    Users,
    Allergies,
    Goals,
    Metrics,
    Ingredients,
}

/// User store that also serves every per-user signal reader.
#[derive(Debug, Default)]
pub struct MemoryUserDirectory {
    profiles: RwLock<HashMap<u64, UserProfile>>,
    failing: RwLock<HashSet<SignalSource>>,
}

impl MemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profiles(profiles: impl IntoIterator<Item = UserProfile>) -> Self {
        let directory = Self::new();
        {
            let mut map = directory.profiles.write();
            for profile in profiles {
                map.insert(profile.id, profile);
            }
        }
        directory
    }

    /// Inserts or replaces a profile.
    pub fn upsert(&self, profile: UserProfile) {
        self.profiles.write().insert(profile.id, profile);
    }

    #[cfg(any(test, feature = "mock"))]
    pub fn fail_on(&self, source: SignalSource) {
        self.failing.write().insert(source);
    }

    fn read<T>(
        &self,
        source: SignalSource,
        user_id: u64,
        f: impl FnOnce(&UserProfile) -> T,
    ) -> RepositoryResult<Option<T>> {
        if self.failing.read().contains(&source) {
            return Err(RepositoryError::backend(format!(
                "injected failure: {source:?}"
            )));
        }
        Ok(self.profiles.read().get(&user_id).map(f))
    }
}

#[async_trait]
impl UserRepository for MemoryUserDirectory {
    async fn find_by_id(&self, id: u64) -> RepositoryResult<Option<User>> {
        self.read(SignalSource::Users, id, |p| User {
            id: p.id,
            nickname: p.nickname.clone(),
        })
    }
}

#[async_trait]
impl AllergyReader for MemoryUserDirectory {
    async fn get_exclusions(&self, user_id: u64) -> RepositoryResult<Vec<String>> {
        Ok(self
            .read(SignalSource::Allergies, user_id, |p| p.allergies.clone())?
            .unwrap_or_default())
    }
}

#[async_trait]
impl HealthGoalReader for MemoryUserDirectory {
    async fn get_goals(&self, user_id: u64) -> RepositoryResult<Vec<String>> {
        Ok(self
            .read(SignalSource::Goals, user_id, |p| p.health_goals.clone())?
            .unwrap_or_default())
    }
}

#[async_trait]
impl HealthMetricsReader for MemoryUserDirectory {
    async fn get_latest(&self, user_id: u64) -> RepositoryResult<BTreeMap<String, String>> {
        Ok(self
            .read(SignalSource::Metrics, user_id, |p| p.health_metrics.clone())?
            .unwrap_or_default())
    }
}

#[async_trait]
impl IngredientReader for MemoryUserDirectory {
    async fn get_owned(&self, user_id: u64) -> RepositoryResult<Vec<String>> {
        Ok(self
            .read(SignalSource::Ingredients, user_id, |p| {
                p.owned_ingredients.clone()
            })?
            .unwrap_or_default())
    }
}

/// JSON seed corpus: `{"recipes": [...], "users": [...]}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub recipes: Vec<NewRecipe>,
    #[serde(default)]
    pub users: Vec<UserProfile>,
}

impl Seed {
    /// Reads and parses a seed file.
    pub fn load(path: &Path) -> RepositoryResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| RepositoryError::SeedIo {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| RepositoryError::SeedFormat {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Splits the seed into the two in-memory stores.
    pub fn into_repositories(self) -> (MemoryRecipeRepository, MemoryUserDirectory) {
        (
            MemoryRecipeRepository::with_recipes(self.recipes),
            MemoryUserDirectory::with_profiles(self.users),
        )
    }
}

