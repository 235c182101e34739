use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use super::error::{DedupError, DedupResult};

/// Sorted-set primitive: members ordered by an `i64` score (epoch millis here).
pub trait TimeOrderedSet: Send + Sync + 'static {
    /// Adds `member` with `score` unless it is already present. Returns `true` if added.
    fn add_if_absent(
        &self,
        key: &str,
        member: &str,
        score: i64,
    ) -> impl std::future::Future<Output = DedupResult<bool>> + Send;

    /// Score of `member`, if present.
    fn score(
        &self,
        key: &str,
        member: &str,
    ) -> impl std::future::Future<Output = DedupResult<Option<i64>>> + Send;

    /// Removes at most `limit` members with score `< max_exclusive`, lowest first.
    /// Returns how many were removed.
    fn remove_range_by_score(
        &self,
        key: &str,
        max_exclusive: i64,
        limit: usize,
    ) -> impl std::future::Future<Output = DedupResult<usize>> + Send;

    /// Number of members under `key`.
    fn len(&self, key: &str) -> impl std::future::Future<Output = DedupResult<usize>> + Send;
}

#[derive(Debug, Default)]
struct SortedSet {
    scores: HashMap<String, i64>,
    ordered: BTreeSet<(i64, String)>,
}

/// In-process [`TimeOrderedSet`]. Each call holds the lock for one operation only.
#[derive(Debug, Default)]
pub struct MemoryTimeOrderedSet {
    sets: Mutex<HashMap<String, SortedSet>>,
    failing: AtomicBool,
}

impl MemoryTimeOrderedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every operation fail until reset.
    #[cfg(any(test, feature = "mock"))]
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::Release);
    }

    fn check(&self) -> DedupResult<()> {
        if self.failing.load(Ordering::Acquire) {
            return Err(DedupError::Store {
                message: "injected failure".to_string(),
            });
        }
        Ok(())
    }
}

impl TimeOrderedSet for MemoryTimeOrderedSet {
    async fn add_if_absent(&self, key: &str, member: &str, score: i64) -> DedupResult<bool> {
        self.check()?;
        let mut sets = self.sets.lock();
        let set = sets.entry(key.to_string()).or_default();
        if set.scores.contains_key(member) {
            return Ok(false);
        }
        set.scores.insert(member.to_string(), score);
        set.ordered.insert((score, member.to_string()));
        Ok(true)
    }

    async fn score(&self, key: &str, member: &str) -> DedupResult<Option<i64>> {
        self.check()?;
        Ok(self
            .sets
            .lock()
            .get(key)
            .and_then(|set| set.scores.get(member).copied()))
    }

    async fn remove_range_by_score(
        &self,
        key: &str,
        max_exclusive: i64,
        limit: usize,
    ) -> DedupResult<usize> {
        self.check()?;
        let mut sets = self.sets.lock();
        let Some(set) = sets.get_mut(key) else {
            return Ok(0);
        };

        let doomed: Vec<(i64, String)> = set
            .ordered
            .iter()
            .take_while(|(score, _)| *score < max_exclusive)
            .take(limit)
            .cloned()
            .collect();
        for entry in &doomed {
            set.ordered.remove(entry);
            set.scores.remove(&entry.1);
        }
        Ok(doomed.len())
    }

    async fn len(&self, key: &str) -> DedupResult<usize> {
        self.check()?;
        Ok(self.sets.lock().get(key).map_or(0, |set| set.scores.len()))
    }
}
