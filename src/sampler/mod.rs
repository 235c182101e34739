//! Bounded random selection of recipe candidates.

#[cfg(test)]
mod tests;

use std::sync::Arc;

use rand::seq::SliceRandom;
use tracing::{debug, info, instrument, warn};

use crate::model::Candidate;
use crate::repository::RecipeRepository;

/// Draws up to `desired` candidates, falling through cheaper strategies first:
///
/// 1. the whole corpus when it is no larger than `desired`
/// 2. storage-native random selection
/// 3. random primary-key range
/// 4. full load and in-memory shuffle
///
/// Never fails; an empty corpus or a failed full load yields an empty list.
#[derive(Clone)]
pub struct CandidateSampler {
    recipes: Arc<dyn RecipeRepository>,
}

impl CandidateSampler {
    pub fn new(recipes: Arc<dyn RecipeRepository>) -> Self {
        Self { recipes }
    }

    #[instrument(skip(self))]
    pub async fn sample(&self, desired: usize) -> Vec<Candidate> {
        if desired == 0 {
            return Vec::new();
        }

        match self.recipes.count().await {
            Ok(0) => {
                info!("Recipe corpus is empty");
                return Vec::new();
            }
            Ok(total) if total <= desired as u64 => {
                match self.recipes.find_all().await {
                    Ok(all) => {
                        debug!(total, "Corpus fits in the pool, using all recipes");
                        return all;
                    }
                    Err(e) => {
                        warn!(error = %e, "find_all failed for small corpus");
                        return Vec::new();
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "Recipe count failed, falling back to full shuffle");
                return self.shuffle_all(desired).await;
            }
        }

        match self.recipes.find_random(desired).await {
            Ok(mut rows) if rows.len() >= desired => {
                rows.truncate(desired);
                debug!(strategy = "native_random", "Sampled candidates");
                return rows;
            }
            Ok(rows) => debug!(got = rows.len(), "Native random returned too few rows"),
            Err(e) => warn!(error = %e, "Native random sampling failed"),
        }

        match self.recipes.find_random_by_pk_range(desired).await {
            Ok(mut rows) if rows.len() >= desired => {
                rows.truncate(desired);
                debug!(strategy = "pk_range", "Sampled candidates");
                return rows;
            }
            Ok(rows) => debug!(got = rows.len(), "Primary-key range returned too few rows"),
            Err(e) => warn!(error = %e, "Primary-key range sampling failed"),
        }

        self.shuffle_all(desired).await
    }

    async fn shuffle_all(&self, desired: usize) -> Vec<Candidate> {
        match self.recipes.find_all().await {
            Ok(all) => {
                debug!(strategy = "full_shuffle", corpus = all.len(), "Sampled candidates");
                take_shuffled(all, desired)
            }
            Err(e) => {
                warn!(error = %e, "Full corpus load failed");
                Vec::new()
            }
        }
    }
}

fn take_shuffled(mut all: Vec<Candidate>, desired: usize) -> Vec<Candidate> {
    all.shuffle(&mut rand::thread_rng());
    all.truncate(desired);
    all
}
