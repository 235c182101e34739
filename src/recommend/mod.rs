//! Recommendation entry point: signals, candidates, scoring, ranking.

pub mod error;
pub mod mode;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::constants::{DEFAULT_CANDIDATE_POOL_SIZE, DEFAULT_SCORE, DEFAULT_TOP_K};
use crate::model::{Candidate, ScoredCandidate};
use crate::ranking::{apply_exclusion_guard, rank};
use crate::repository::RecipeRepository;
use crate::sampler::CandidateSampler;
use crate::scoring::BatchScorer;
use crate::signals::SignalAggregator;

pub use error::{ParseModeError, RecommendError};
pub use mode::RecommendMode;

/// Produces the top-K recipes for a user under a [`RecommendMode`].
#[derive(Clone)]
pub struct Recommender {
    signals: SignalAggregator,
    sampler: CandidateSampler,
    recipes: Arc<dyn RecipeRepository>,
    scorer: BatchScorer,
    top_k: usize,
    candidate_pool_size: usize,
}

impl Recommender {
    pub fn new(
        signals: SignalAggregator,
        recipes: Arc<dyn RecipeRepository>,
        scorer: BatchScorer,
    ) -> Self {
        Self {
            signals,
            sampler: CandidateSampler::new(Arc::clone(&recipes)),
            recipes,
            scorer,
            top_k: DEFAULT_TOP_K,
            candidate_pool_size: DEFAULT_CANDIDATE_POOL_SIZE,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_candidate_pool_size(mut self, size: usize) -> Self {
        self.candidate_pool_size = size;
        self
    }

    /// Returns at most `top_k` candidates, best first. Excluded candidates never appear.
    ///
    /// Fails only when the user is unknown or the user store is down; every other
    /// failure degrades to fewer candidates or neutral scores.
    #[instrument(skip(self), fields(mode = %mode))]
    pub async fn recommend(
        &self,
        user_id: u64,
        mode: &RecommendMode,
    ) -> Result<Vec<ScoredCandidate>, RecommendError> {
        let bundle = self.signals.aggregate(user_id).await?;

        let candidates = self.candidates_for(mode).await;
        if candidates.is_empty() {
            info!("Candidate pool is empty");
            return Ok(Vec::new());
        }

        let mut scored = match mode.signal_mask() {
            Some(mask) => {
                let masked = bundle.masked(mask);
                if masked.is_empty() {
                    info!("No signals for this mode, skipping the oracle");
                    neutral(candidates)
                } else {
                    self.scorer
                        .score_all(&masked, candidates, mode.include_nutrition())
                        .await
                }
            }
            None => neutral(candidates),
        };

        let guarded = apply_exclusion_guard(&mut scored, bundle.exclusions());
        let ranked = rank(scored, self.top_k);
        info!(
            guarded,
            returned = ranked.len(),
            "Recommendation complete"
        );
        Ok(ranked)
    }

    async fn candidates_for(&self, mode: &RecommendMode) -> Vec<Candidate> {
        match mode {
            RecommendMode::Category(categories) => {
                if categories.is_empty() {
                    warn!("Category mode without categories");
                    return Vec::new();
                }
                match self
                    .recipes
                    .find_by_categories(categories, self.candidate_pool_size)
                    .await
                {
                    Ok(rows) => rows,
                    Err(e) => {
                        warn!(error = %e, "Category lookup failed");
                        Vec::new()
                    }
                }
            }
            _ => self.sampler.sample(self.candidate_pool_size).await,
        }
    }
}

fn neutral(candidates: Vec<Candidate>) -> Vec<ScoredCandidate> {
    candidates
        .into_iter()
        .map(|c| ScoredCandidate::new(c, DEFAULT_SCORE))
        .collect()
}
