//! Recently created recipe titles, used to refuse duplicate creation.
//!
//! Titles are stored in a [`TimeOrderedSet`] scored by insertion time (epoch millis) so
//! expired entries can be removed by score range. The repository's unique constraint
//! remains the authority; this cache only short-circuits the common case.

pub mod error;
pub mod store;


use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::Notify;
use tokio::time;
use tracing::{debug, info, instrument, warn};

use crate::constants::{DEDUP_SWEEP_BATCH, DEDUP_TITLE_KEY};
use crate::model::normalize_title;

pub use error::{DedupError, DedupResult};
pub use store::{MemoryTimeOrderedSet, TimeOrderedSet};

/// Title dedup cache over a [`TimeOrderedSet`].
pub struct DedupCache<S> {
    store: Arc<S>,
    key: String,
    sweep_batch: usize,
    sweeper_running: Arc<AtomicBool>,
    shutdown: Arc<AtomicBool>,
    stop: Arc<Notify>,
}

impl<S> Clone for DedupCache<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            key: self.key.clone(),
            sweep_batch: self.sweep_batch,
            sweeper_running: Arc::clone(&self.sweeper_running),
            shutdown: Arc::clone(&self.shutdown),
            stop: Arc::clone(&self.stop),
        }
    }
}

impl<S> std::fmt::Debug for DedupCache<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DedupCache")
            .field("key", &self.key)
            .field("sweep_batch", &self.sweep_batch)
            .finish_non_exhaustive()
    }
}

impl<S: TimeOrderedSet> DedupCache<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            key: DEDUP_TITLE_KEY.to_string(),
            sweep_batch: DEDUP_SWEEP_BATCH,
            sweeper_running: Arc::new(AtomicBool::new(false)),
            shutdown: Arc::new(AtomicBool::new(false)),
            stop: Arc::new(Notify::new()),
        }
    }

    /// Sets how many entries one sweep step may remove (at least 1).
    pub fn with_sweep_batch(mut self, sweep_batch: usize) -> Self {
        self.sweep_batch = sweep_batch.max(1);
        self
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Returns `true` if the normalized title is recorded.
    pub async fn exists(&self, title: &str) -> DedupResult<bool> {
        let member = normalize_title(title);
        Ok(self.store.score(&self.key, &member).await?.is_some())
    }

    /// Records `title` at `at`. Returns `false` if it was already present; the existing
    /// timestamp is kept.
    pub async fn insert(&self, title: &str, at: DateTime<Utc>) -> DedupResult<bool> {
        let member = normalize_title(title);
        let added = self
            .store
            .add_if_absent(&self.key, &member, at.timestamp_millis())
            .await?;
        debug!(title = %member, added, "Dedup insert");
        Ok(added)
    }

    /// Removes entries recorded strictly before `cutoff`, one bounded batch at a time.
    #[instrument(skip(self), fields(key = %self.key))]
    pub async fn sweep_older_than(&self, cutoff: DateTime<Utc>) -> DedupResult<usize> {
        let cutoff_ms = cutoff.timestamp_millis();
        let mut removed = 0;
        loop {
            let n = self
                .store
                .remove_range_by_score(&self.key, cutoff_ms, self.sweep_batch)
                .await?;
            removed += n;
            if n < self.sweep_batch {
                break;
            }
            tokio::task::yield_now().await;
        }
        info!(removed, "Swept expired dedup entries");
        Ok(removed)
    }

    /// Removes entries older than `retention` relative to now.
    pub async fn sweep_expired(&self, retention: Duration) -> DedupResult<usize> {
        let retention = TimeDelta::from_std(retention).unwrap_or(TimeDelta::MAX);
        let cutoff = Utc::now()
            .checked_sub_signed(retention)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        self.sweep_older_than(cutoff).await
    }

    pub async fn len(&self) -> DedupResult<usize> {
        self.store.len(&self.key).await
    }

    pub async fn is_empty(&self) -> DedupResult<bool> {
        Ok(self.len().await? == 0)
    }

    /// Starts the periodic sweeper (no-op if already running).
    ///
    /// The first sweep happens immediately, then every `every`.
    pub fn spawn_sweeper(&self, every: Duration, retention: Duration) -> tokio::task::JoinHandle<()> {
        if self.sweeper_running.swap(true, Ordering::AcqRel) {
            return tokio::spawn(async {});
        }
        self.shutdown.store(false, Ordering::Release);

        let cache = self.clone();
        tokio::spawn(async move {
            let mut interval = time::interval(every);
            loop {
                let woken = tokio::select! {
                    _ = interval.tick() => false,
                    _ = cache.stop.notified() => true,
                };
                if cache.shutdown.load(Ordering::Acquire) {
                    break;
                }
                // A permit left over from an earlier stop.
                if woken {
                    continue;
                }
                if let Err(e) = cache.sweep_expired(retention).await {
                    warn!(error = %e, "Dedup sweep failed");
                }
            }
            cache.sweeper_running.store(false, Ordering::Release);
        })
    }

    /// Stops a running sweeper without waiting for its next tick. A sweep already in
    /// progress finishes first.
    pub fn stop_sweeper(&self) {
        self.shutdown.store(true, Ordering::Release);
        self.stop.notify_one();
    }

    pub fn is_sweeper_running(&self) -> bool {
        self.sweeper_running.load(Ordering::Acquire)
    }
}
