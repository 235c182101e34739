//! Classification of a recipe's ingredients against what a user owns.
//!
//! The oracle proposes `matched` / `replaceable` / `mismatched` buckets; [`repair`]
//! turns whatever comes back into an exact partition of the recipe's ingredients.
//! When the oracle is unavailable the matcher falls back to exact name equality.

pub mod cache;
pub mod error;
pub mod prompt;
pub mod repair;


use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::hashing::hash_match_key;
use crate::model::{MatchResult, normalize_item};
use crate::oracle::OracleClient;
use crate::repository::{IngredientReader, RecipeRepository, UserRepository};

pub use cache::MatchCache;
pub use error::MatchError;
pub use prompt::build_match_prompt;
pub use repair::{RawClassification, parse_classification, perform_simple_matching, repair};

/// Ingredient matcher with a result cache shared across clones.
#[derive(Clone)]
pub struct IngredientMatcher {
    recipes: Arc<dyn RecipeRepository>,
    users: Arc<dyn UserRepository>,
    ingredients: Arc<dyn IngredientReader>,
    oracle: OracleClient,
    cache: Arc<MatchCache>,
}

impl IngredientMatcher {
    pub fn new(
        recipes: Arc<dyn RecipeRepository>,
        users: Arc<dyn UserRepository>,
        ingredients: Arc<dyn IngredientReader>,
        oracle: OracleClient,
        cache: MatchCache,
    ) -> Self {
        Self {
            recipes,
            users,
            ingredients,
            oracle,
            cache: Arc::new(cache),
        }
    }

    pub fn cache(&self) -> &MatchCache {
        &self.cache
    }

    /// Classifies every ingredient of `recipe_id` for `user_id`.
    ///
    /// Every normalized recipe ingredient appears in exactly one bucket of the result.
    #[instrument(skip(self))]
    pub async fn match_ingredients(
        &self,
        user_id: u64,
        recipe_id: u64,
    ) -> Result<MatchResult, MatchError> {
        let recipe = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or(MatchError::RecipeNotFound { recipe_id })?;
        let universe = normalized_unique(recipe.ingredient_tokens());

        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(MatchError::UserNotFound { user_id });
        }
        let owned = match self.ingredients.get_owned(user_id).await {
            Ok(items) => normalized_unique(items),
            Err(e) => {
                warn!(user_id, error = %e, "Owned ingredients unavailable, using empty list");
                Vec::new()
            }
        };
        let owned_set: HashSet<String> = owned.iter().cloned().collect();

        if universe.is_empty() || owned.is_empty() {
            debug!(
                tokens = universe.len(),
                owned = owned.len(),
                "Nothing to classify with the oracle"
            );
            return Ok(perform_simple_matching(&universe, &owned_set));
        }

        let key = hash_match_key(user_id, recipe_id, &universe, &owned);
        if let Some(hit) = self.cache.get(key) {
            debug!(key, "Match cache hit");
            return Ok(hit);
        }

        let prompt = build_match_prompt(&universe, &owned);
        let classification = match self.oracle.invoke(&prompt).await {
            Ok(raw) => parse_classification(&raw),
            Err(e) => {
                warn!(error = %e, "Match oracle unavailable, using simple matching");
                return Ok(perform_simple_matching(&universe, &owned_set));
            }
        };
        let Some(classification) = classification else {
            warn!("Match oracle answer unparseable, using simple matching");
            return Ok(perform_simple_matching(&universe, &owned_set));
        };

        let result = repair(classification, &universe, &owned_set);
        if result.is_degenerate() {
            debug!("Degenerate classification, not caching");
        } else {
            self.cache.insert(key, result.clone());
        }

        info!(
            matched = result.matched.len(),
            replaceable = result.replaceable.len(),
            mismatched = result.mismatched.len(),
            "Classified recipe ingredients"
        );
        Ok(result)
    }
}

/// Normalizes items and drops blanks and repeats (first occurrence wins).
fn normalized_unique(items: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .map(|item| normalize_item(&item))
        .filter(|item| !item.is_empty() && seen.insert(item.clone()))
        .collect()
}
