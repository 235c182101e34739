//! Cross-cutting, shared constants.
//!
//! Score constants are shared by the prompt rubric, the parser, the scorer and the ranker.
//! Keep them here so the rubric text and the validation logic cannot drift apart.

/// Lowest valid suitability score. Reserved for exclusion violations.
pub const EXCLUDED_SCORE: f32 = 0.0;

/// Highest valid suitability score.
pub const MAX_SCORE: f32 = 10.0;

/// Neutral score assigned whenever the oracle gives no usable answer for a candidate.
pub const DEFAULT_SCORE: f32 = 5.0;

/// Default number of recommendations returned to the caller.
pub const DEFAULT_TOP_K: usize = 6;

/// Default number of candidates sampled from the corpus per recommendation.
pub const DEFAULT_CANDIDATE_POOL_SIZE: usize = 48;

/// Default maximum number of candidates submitted in one batch prompt.
pub const DEFAULT_BATCH_SIZE: usize = 20;

/// Default character budget for a rendered scoring prompt.
pub const DEFAULT_PROMPT_CHAR_BUDGET: usize = 12_000;

/// Smallest prompt budget accepted by [`crate::config::Config::validate`].
pub const MIN_PROMPT_CHAR_BUDGET: usize = 1_000;

/// Default number of owned items rendered into scoring and generation prompts.
pub const DEFAULT_MAX_OWNED_ITEMS_IN_PROMPT: usize = 5;

/// Default oracle round-trip timeout.
pub const DEFAULT_ORACLE_TIMEOUT_SECS: u64 = 30;

/// Default oracle model identifier.
pub const DEFAULT_ORACLE_MODEL: &str = "gpt-4o-mini";

/// Default number of concurrent individual scoring calls after a batch degrades.
pub const DEFAULT_INDIVIDUAL_CONCURRENCY: usize = 4;

/// Default retention for dedup entries.
pub const DEFAULT_DEDUP_RETENTION_DAYS: u64 = 30;

/// Default dedup sweep interval (daily).
pub const DEFAULT_DEDUP_SWEEP_INTERVAL_SECS: u64 = 24 * 60 * 60;

/// Max dedup entries removed per lock acquisition during a sweep.
pub const DEDUP_SWEEP_BATCH: usize = 500;

/// Sorted-set key holding recipe titles for duplicate detection.
pub const DEDUP_TITLE_KEY: &str = "recipe:titles";

/// Default capacity of the ingredient-match result cache.
pub const DEFAULT_MATCH_CACHE_CAPACITY: u64 = 10_000;

/// Default time-to-live of ingredient-match cache entries (7 days).
pub const DEFAULT_MATCH_CACHE_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Default capacity of the generated-recipe cache.
pub const DEFAULT_GENERATION_CACHE_CAPACITY: u64 = 1_000;

/// Default time-to-live of generated-recipe cache entries (7 days).
pub const DEFAULT_GENERATION_CACHE_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Returns `true` if `score` lies within the rubric range `[0, 10]`.
#[inline]
pub fn is_valid_score(score: f32) -> bool {
    score.is_finite() && (EXCLUDED_SCORE..=MAX_SCORE).contains(&score)
}
