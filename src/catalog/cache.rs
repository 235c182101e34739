use std::time::Duration;

use moka::sync::Cache;

use crate::constants::{DEFAULT_GENERATION_CACHE_CAPACITY, DEFAULT_GENERATION_CACHE_TTL_SECS};
use crate::model::Candidate;

/// Recipes generated per (user, owned items), keyed by
/// [`crate::hashing::hash_generation_key`]. Empty results are never stored.
pub struct GenerationCache {
    entries: Cache<u64, Vec<Candidate>>,
}

impl GenerationCache {
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        Self {
            entries: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    #[inline]
    pub fn get(&self, key: u64) -> Option<Vec<Candidate>> {
        self.entries.get(&key)
    }

    /// Stores `recipes` unless the list is empty.
    pub fn insert(&self, key: u64, recipes: Vec<Candidate>) {
        if !recipes.is_empty() {
            self.entries.insert(key, recipes);
        }
    }

    #[inline]
    pub fn invalidate(&self, key: u64) {
        self.entries.invalidate(&key);
    }
}

impl Default for GenerationCache {
    fn default() -> Self {
        Self::new(
            DEFAULT_GENERATION_CACHE_CAPACITY,
            Duration::from_secs(DEFAULT_GENERATION_CACHE_TTL_SECS),
        )
    }
}

impl std::fmt::Debug for GenerationCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationCache")
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}
