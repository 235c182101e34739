//! Savor library crate (used by the `savor` binary and integration tests).
//!
//! # Public API Surface
//!
//! ## Recommendation Pipeline
//! - [`Recommender`], [`RecommendMode`] - Per-user top-k recipe recommendations
//! - [`SignalAggregator`], [`SignalSources`] - Fan-out read of per-user signals
//! - [`CandidateSampler`] - Candidate pool with storage fallbacks
//! - [`BatchScorer`], [`PromptBuilder`] - Oracle scoring with individual fallback
//! - [`rank`], [`apply_exclusion_guard`] - Ordering and the post-ranking safety net
//!
//! ## Ingredient Matching
//! - [`IngredientMatcher`], [`MatchCache`] - Owned / replaceable / missing classification
//!
//! ## Catalog
//! - [`RecipeCatalog`], [`DedupCache`] - Title-deduplicated recipe creation and generation
//!
//! ## Collaborators
//! - [`RecipeRepository`] and the signal reader traits, with in-memory implementations
//! - [`TextGenerationOracle`], [`OracleClient`], [`GenaiOracle`] - LLM access
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod dedup;
pub mod hashing;
pub mod matcher;
pub mod model;
pub mod oracle;
pub mod parser;
pub mod prompt;
pub mod ranking;
pub mod recommend;
pub mod repository;
pub mod sampler;
pub mod scoring;
pub mod signals;

pub use catalog::{CatalogError, GenerationCache, GenerationError, RecipeCatalog};
pub use config::{Config, ConfigError};
pub use constants::{DEFAULT_SCORE, EXCLUDED_SCORE, MAX_SCORE, is_valid_score};
pub use dedup::{DedupCache, DedupError, DedupResult, MemoryTimeOrderedSet, TimeOrderedSet};
pub use hashing::{hash_generation_key, hash_match_key, hash_to_u64};
pub use matcher::{IngredientMatcher, MatchCache, MatchError};
pub use model::{
    Candidate, MatchResult, NewRecipe, Nutrition, RecipeCategory, Replacement, ScoredCandidate,
    SignalBundle, SignalMask,
};
#[cfg(any(test, feature = "mock"))]
pub use oracle::MockOracle;
pub use oracle::{
    GenaiOracle, OracleClient, OracleError, OracleResult, TextGenerationOracle, UnavailableReason,
};
pub use parser::ParsedScores;
pub use prompt::{PromptBuilder, RenderedRequest};
pub use ranking::{apply_exclusion_guard, rank};
pub use recommend::{ParseModeError, RecommendError, RecommendMode, Recommender};
pub use repository::{
    AllergyReader, HealthGoalReader, HealthMetricsReader, IngredientReader,
    MemoryRecipeRepository, MemoryUserDirectory, RecipeRepository, RepositoryError,
    RecipeOp, RepositoryResult, Seed, SignalSource, User, UserProfile, UserRepository,
};
pub use sampler::CandidateSampler;
pub use scoring::{BatchOutcome, BatchScorer, DegradeReason, IndividualOutcome};
pub use signals::{SignalAggregator, SignalError, SignalSources};
