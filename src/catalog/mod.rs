//! Recipe creation guarded by the dedup cache, and oracle-driven generation.

pub mod cache;
pub mod error;
pub mod generation;


use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use crate::constants::DEFAULT_MAX_OWNED_ITEMS_IN_PROMPT;
use crate::dedup::{DedupCache, TimeOrderedSet};
use crate::hashing::hash_generation_key;
use crate::model::{Candidate, NewRecipe, normalize_title};
use crate::oracle::OracleClient;
use crate::repository::{RecipeRepository, RepositoryError};
use crate::signals::SignalAggregator;

pub use cache::GenerationCache;
pub use error::{CatalogError, GenerationError};
pub use generation::{build_generation_prompt, parse_recommendations};

/// Writes recipes to the repository, refusing titles that already exist.
pub struct RecipeCatalog<S> {
    recipes: Arc<dyn RecipeRepository>,
    dedup: DedupCache<S>,
    signals: SignalAggregator,
    oracle: OracleClient,
    generated: Arc<GenerationCache>,
    max_owned_items: usize,
}

impl<S: TimeOrderedSet> RecipeCatalog<S> {
    pub fn new(
        recipes: Arc<dyn RecipeRepository>,
        dedup: DedupCache<S>,
        signals: SignalAggregator,
        oracle: OracleClient,
    ) -> Self {
        Self {
            recipes,
            dedup,
            signals,
            oracle,
            generated: Arc::new(GenerationCache::default()),
            max_owned_items: DEFAULT_MAX_OWNED_ITEMS_IN_PROMPT,
        }
    }

    /// Replaces the default generated-recipe cache.
    pub fn with_generation_cache(mut self, cache: GenerationCache) -> Self {
        self.generated = Arc::new(cache);
        self
    }

    /// Caps how many owned items a generation prompt lists.
    pub fn with_max_owned_items(mut self, max_owned_items: usize) -> Self {
        self.max_owned_items = max_owned_items;
        self
    }

    pub fn dedup(&self) -> &DedupCache<S> {
        &self.dedup
    }

    /// Persists `recipe` unless its title is already known.
    ///
    /// The dedup cache is consulted first; the repository's uniqueness check is
    /// authoritative. Cache errors are logged and otherwise ignored.
    #[instrument(skip(self, recipe), fields(title = %recipe.title))]
    pub async fn create(&self, mut recipe: NewRecipe) -> Result<Candidate, CatalogError> {
        recipe.title = recipe.title.trim().to_string();
        if recipe.title.is_empty() {
            return Err(CatalogError::InvalidRecipe {
                reason: "title is blank".to_string(),
            });
        }
        if recipe.ingredients.trim().is_empty() {
            return Err(CatalogError::InvalidRecipe {
                reason: "ingredients are blank".to_string(),
            });
        }

        match self.dedup.exists(&recipe.title).await {
            Ok(true) => {
                debug!("Title found in dedup cache");
                return Err(CatalogError::PersistenceConflict {
                    title: recipe.title,
                });
            }
            Ok(false) => {}
            Err(e) => warn!(error = %e, "Dedup lookup failed, relying on repository"),
        }
        if self.recipes.exists_by_title(&recipe.title).await? {
            return Err(CatalogError::PersistenceConflict {
                title: recipe.title,
            });
        }

        let saved = match self.recipes.save(recipe).await {
            Ok(saved) => saved,
            Err(RepositoryError::UniqueViolation { title }) => {
                return Err(CatalogError::PersistenceConflict { title });
            }
            Err(e) => return Err(e.into()),
        };

        if let Err(e) = self.dedup.insert(&saved.title, Utc::now()).await {
            warn!(error = %e, "Failed to record title in dedup cache");
        }
        info!(recipe_id = saved.id, "Created recipe");
        Ok(saved)
    }

    /// Asks the oracle for `count` dishes built around the user's owned ingredients
    /// and stores the ones that are new.
    ///
    /// Results are cached per user and owned-item set; a repeat request is answered
    /// from the cache without calling the oracle.
    #[instrument(skip(self))]
    pub async fn generate_from_owned(
        &self,
        user_id: u64,
        count: usize,
    ) -> Result<Vec<Candidate>, GenerationError> {
        let signals = self.signals.aggregate(user_id).await?;
        let owned: Vec<String> = signals
            .owned_items()
            .iter()
            .take(self.max_owned_items)
            .cloned()
            .collect();
        let exclusions: Vec<String> = signals.exclusions().iter().cloned().collect();

        let key = hash_generation_key(user_id, signals.owned_items());
        if let Some(hit) = self.generated.get(key) {
            debug!(key, "Generation cache hit");
            return Ok(hit);
        }

        let prompt = build_generation_prompt(&owned, &exclusions, count);
        let raw = self.oracle.invoke(&prompt).await?;
        let Some(proposed) = parse_recommendations(&raw) else {
            warn!("Generation answer had no recommendations array");
            return Err(GenerationError::EmptyRecommendations);
        };

        let mut seen = HashSet::new();
        let mut created = Vec::new();
        for recipe in proposed {
            if !seen.insert(normalize_title(&recipe.title)) {
                debug!(title = %recipe.title, "Skipping repeated title in answer");
                continue;
            }
            match self.create(recipe).await {
                Ok(saved) => created.push(saved),
                Err(CatalogError::PersistenceConflict { title }) => {
                    debug!(%title, "Skipping existing recipe");
                }
                Err(e) => warn!(error = %e, "Skipping recommendation"),
            }
        }

        if created.is_empty() {
            return Err(GenerationError::EmptyRecommendations);
        }
        info!(created = created.len(), "Generated recipes");
        self.generated.insert(key, created.clone());
        Ok(created)
    }
}
