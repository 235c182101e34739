//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `SAVOR_*` environment variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_BATCH_SIZE, DEFAULT_CANDIDATE_POOL_SIZE, DEFAULT_DEDUP_RETENTION_DAYS,
    DEFAULT_DEDUP_SWEEP_INTERVAL_SECS, DEFAULT_INDIVIDUAL_CONCURRENCY,
    DEFAULT_MATCH_CACHE_CAPACITY, DEFAULT_MATCH_CACHE_TTL_SECS,
    DEFAULT_MAX_OWNED_ITEMS_IN_PROMPT, DEFAULT_ORACLE_MODEL, DEFAULT_ORACLE_TIMEOUT_SECS,
    DEFAULT_PROMPT_CHAR_BUDGET, DEFAULT_TOP_K, MIN_PROMPT_CHAR_BUDGET,
};

const SECS_PER_DAY: u64 = 24 * 60 * 60;

/// Pipeline configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `SAVOR_*` overrides on top of defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Model name passed to the oracle backend. Default: `gpt-4o-mini`.
    pub oracle_model: String,

    /// Per-call oracle timeout. Default: 30s.
    pub oracle_timeout: Duration,

    /// Recommendations returned per request. Default: `6`.
    pub top_k: usize,

    /// Candidates sampled per request. Default: `48`.
    pub candidate_pool_size: usize,

    /// Candidates per batch prompt. Default: `20`.
    pub batch_size: usize,

    /// Character budget for one batch prompt. Default: `12_000`.
    pub prompt_char_budget: usize,

    /// Owned ingredients listed in a prompt. Default: `5`.
    pub max_owned_items_in_prompt: usize,

    /// Individual scoring calls in flight at once. Default: `4`.
    pub individual_concurrency: usize,

    /// Max entries in the ingredient match cache. Default: `10_000`.
    pub match_cache_capacity: u64,

    /// Match cache time-to-live. Default: 7 days.
    pub match_cache_ttl: Duration,

    /// How long created titles stay in the dedup cache. Default: 30 days.
    pub dedup_retention: Duration,

    /// Dedup sweeper period. Default: 24h.
    pub dedup_sweep_interval: Duration,

    /// JSON seed corpus for the in-memory repositories.
    pub seed_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            oracle_model: DEFAULT_ORACLE_MODEL.to_string(),
            oracle_timeout: Duration::from_secs(DEFAULT_ORACLE_TIMEOUT_SECS),
            top_k: DEFAULT_TOP_K,
            candidate_pool_size: DEFAULT_CANDIDATE_POOL_SIZE,
            batch_size: DEFAULT_BATCH_SIZE,
            prompt_char_budget: DEFAULT_PROMPT_CHAR_BUDGET,
            max_owned_items_in_prompt: DEFAULT_MAX_OWNED_ITEMS_IN_PROMPT,
            individual_concurrency: DEFAULT_INDIVIDUAL_CONCURRENCY,
            match_cache_capacity: DEFAULT_MATCH_CACHE_CAPACITY,
            match_cache_ttl: Duration::from_secs(DEFAULT_MATCH_CACHE_TTL_SECS),
            dedup_retention: Duration::from_secs(DEFAULT_DEDUP_RETENTION_DAYS * SECS_PER_DAY),
            dedup_sweep_interval: Duration::from_secs(DEFAULT_DEDUP_SWEEP_INTERVAL_SECS),
            seed_path: None,
        }
    }
}

impl Config {
    const ENV_ORACLE_MODEL: &'static str = "SAVOR_ORACLE_MODEL";
    const ENV_ORACLE_TIMEOUT_SECS: &'static str = "SAVOR_ORACLE_TIMEOUT_SECS";
    const ENV_TOP_K: &'static str = "SAVOR_TOP_K";
    const ENV_CANDIDATE_POOL_SIZE: &'static str = "SAVOR_CANDIDATE_POOL_SIZE";
    const ENV_BATCH_SIZE: &'static str = "SAVOR_BATCH_SIZE";
    const ENV_PROMPT_CHAR_BUDGET: &'static str = "SAVOR_PROMPT_CHAR_BUDGET";
    const ENV_MAX_OWNED_ITEMS: &'static str = "SAVOR_MAX_OWNED_ITEMS";
    const ENV_INDIVIDUAL_CONCURRENCY: &'static str = "SAVOR_INDIVIDUAL_CONCURRENCY";
    const ENV_MATCH_CACHE_CAPACITY: &'static str = "SAVOR_MATCH_CACHE_CAPACITY";
    const ENV_MATCH_CACHE_TTL_SECS: &'static str = "SAVOR_MATCH_CACHE_TTL_SECS";
    const ENV_DEDUP_RETENTION_DAYS: &'static str = "SAVOR_DEDUP_RETENTION_DAYS";
    const ENV_DEDUP_SWEEP_INTERVAL_SECS: &'static str = "SAVOR_DEDUP_SWEEP_INTERVAL_SECS";
    const ENV_SEED_PATH: &'static str = "SAVOR_SEED_PATH";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let oracle_model = Self::parse_string_from_env(Self::ENV_ORACLE_MODEL, defaults.oracle_model);
        let oracle_timeout = Self::parse_secs_from_env(
            Self::ENV_ORACLE_TIMEOUT_SECS,
            defaults.oracle_timeout,
            1,
        )?;
        let top_k = Self::parse_usize_from_env(Self::ENV_TOP_K, defaults.top_k)?;
        let candidate_pool_size =
            Self::parse_usize_from_env(Self::ENV_CANDIDATE_POOL_SIZE, defaults.candidate_pool_size)?;
        let batch_size = Self::parse_usize_from_env(Self::ENV_BATCH_SIZE, defaults.batch_size)?;
        let prompt_char_budget =
            Self::parse_usize_from_env(Self::ENV_PROMPT_CHAR_BUDGET, defaults.prompt_char_budget)?;
        let max_owned_items_in_prompt = Self::parse_usize_from_env(
            Self::ENV_MAX_OWNED_ITEMS,
            defaults.max_owned_items_in_prompt,
        )?;
        let individual_concurrency = Self::parse_usize_from_env(
            Self::ENV_INDIVIDUAL_CONCURRENCY,
            defaults.individual_concurrency,
        )?;
        let match_cache_capacity =
            Self::parse_u64_from_env(Self::ENV_MATCH_CACHE_CAPACITY, defaults.match_cache_capacity)?;
        let match_cache_ttl = Self::parse_secs_from_env(
            Self::ENV_MATCH_CACHE_TTL_SECS,
            defaults.match_cache_ttl,
            1,
        )?;
        let dedup_retention = Self::parse_secs_from_env(
            Self::ENV_DEDUP_RETENTION_DAYS,
            defaults.dedup_retention,
            SECS_PER_DAY,
        )?;
        let dedup_sweep_interval = Self::parse_secs_from_env(
            Self::ENV_DEDUP_SWEEP_INTERVAL_SECS,
            defaults.dedup_sweep_interval,
            1,
        )?;
        let seed_path = Self::parse_optional_path_from_env(Self::ENV_SEED_PATH);

        Ok(Self {
            oracle_model,
            oracle_timeout,
            top_k,
            candidate_pool_size,
            batch_size,
            prompt_char_budget,
            max_owned_items_in_prompt,
            individual_concurrency,
            match_cache_capacity,
            match_cache_ttl,
            dedup_retention,
            dedup_sweep_interval,
            seed_path,
        })
    }

    /// Checks invariants (does not touch the network).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.oracle_model.trim().is_empty() {
            return Err(ConfigError::EmptyValue {
                name: Self::ENV_ORACLE_MODEL,
            });
        }

        let positive = [
            (Self::ENV_ORACLE_TIMEOUT_SECS, self.oracle_timeout.is_zero()),
            (Self::ENV_TOP_K, self.top_k == 0),
            (Self::ENV_CANDIDATE_POOL_SIZE, self.candidate_pool_size == 0),
            (Self::ENV_BATCH_SIZE, self.batch_size == 0),
            (
                Self::ENV_INDIVIDUAL_CONCURRENCY,
                self.individual_concurrency == 0,
            ),
            (Self::ENV_MATCH_CACHE_CAPACITY, self.match_cache_capacity == 0),
            (
                Self::ENV_DEDUP_SWEEP_INTERVAL_SECS,
                self.dedup_sweep_interval.is_zero(),
            ),
        ];
        if let Some(&(name, _)) = positive.iter().find(|(_, is_zero)| *is_zero) {
            return Err(ConfigError::ZeroValue { name });
        }

        if self.prompt_char_budget < MIN_PROMPT_CHAR_BUDGET {
            return Err(ConfigError::BudgetTooSmall {
                value: self.prompt_char_budget,
                min: MIN_PROMPT_CHAR_BUDGET,
            });
        }

        if let Some(ref path) = self.seed_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_file() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
        }

        Ok(())
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_u64_from_env(var_name: &'static str, default: u64) -> Result<u64, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e| ConfigError::InvalidNumber {
                    name: var_name,
                    value,
                    source: e,
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_usize_from_env(var_name: &'static str, default: usize) -> Result<usize, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e| ConfigError::InvalidNumber {
                    name: var_name,
                    value,
                    source: e,
                }),
            Err(_) => Ok(default),
        }
    }

    /// Reads a whole number of `unit_secs`-second units.
    fn parse_secs_from_env(
        var_name: &'static str,
        default: Duration,
        unit_secs: u64,
    ) -> Result<Duration, ConfigError> {
        match env::var(var_name) {
            Ok(_) => {
                let units = Self::parse_u64_from_env(var_name, 0)?;
                Ok(Duration::from_secs(units.saturating_mul(unit_secs)))
            }
            Err(_) => Ok(default),
        }
    }
}
