use std::time::Duration;

use moka::sync::Cache;

use crate::constants::{DEFAULT_MATCH_CACHE_CAPACITY, DEFAULT_MATCH_CACHE_TTL_SECS};
use crate::model::MatchResult;

/// Classification cache keyed by [`crate::hashing::hash_match_key`].
///
/// Bounded by entry count and expiring entries after a fixed time-to-live.
pub struct MatchCache {
    entries: Cache<u64, MatchResult>,
}

impl MatchCache {
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        Self {
            entries: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    #[inline]
    pub fn get(&self, key: u64) -> Option<MatchResult> {
        self.entries.get(&key)
    }

    #[inline]
    pub fn insert(&self, key: u64, result: MatchResult) {
        self.entries.insert(key, result);
    }

    #[inline]
    pub fn invalidate(&self, key: u64) {
        self.entries.invalidate(&key);
    }

    /// Approximate entry count (moka applies writes lazily).
    #[inline]
    pub fn len(&self) -> u64 {
        self.entries.entry_count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flushes pending maintenance so [`len`](Self::len) is exact.
    pub fn run_pending_tasks(&self) {
        self.entries.run_pending_tasks();
    }
}

impl Default for MatchCache {
    fn default() -> Self {
        Self::new(
            DEFAULT_MATCH_CACHE_CAPACITY,
            Duration::from_secs(DEFAULT_MATCH_CACHE_TTL_SECS),
        )
    }
}

impl std::fmt::Debug for MatchCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchCache")
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}
