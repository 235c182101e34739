use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// User context feeding the scoring rubric.
///
/// Priority is fixed by the type: exclusions > goals > health metrics > owned items.
/// Fields are private so callers can select sections (see [`SignalMask`]) but never
/// reorder them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SignalBundle {
    exclusions: BTreeSet<String>,
    goals: Vec<String>,
    health_metrics: BTreeMap<String, String>,
    owned_items: Vec<String>,
}

/// Selects which lower-priority sections of a [`SignalBundle`] stay active.
///
/// Exclusions are not maskable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalMask {
    pub goals: bool,
    pub health_metrics: bool,
    pub owned_items: bool,
}

impl SignalMask {
    pub const ALL: SignalMask = SignalMask {
        goals: true,
        health_metrics: true,
        owned_items: true,
    };

    pub const EXCLUSIONS_ONLY: SignalMask = SignalMask {
        goals: false,
        health_metrics: false,
        owned_items: false,
    };
}

impl SignalBundle {
    /// Builds a bundle, trimming values and dropping blanks and repeats.
    pub fn new(
        exclusions: impl IntoIterator<Item = String>,
        goals: impl IntoIterator<Item = String>,
        health_metrics: impl IntoIterator<Item = (String, String)>,
        owned_items: impl IntoIterator<Item = String>,
    ) -> Self {
        let exclusions = exclusions
            .into_iter()
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .collect();
        let health_metrics = health_metrics
            .into_iter()
            .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
            .filter(|(k, v)| !k.is_empty() && !v.is_empty())
            .collect();

        Self {
            exclusions,
            goals: dedup_trimmed(goals),
            health_metrics,
            owned_items: dedup_trimmed(owned_items),
        }
    }

    pub fn exclusions(&self) -> &BTreeSet<String> {
        &self.exclusions
    }

    pub fn goals(&self) -> &[String] {
        &self.goals
    }

    pub fn health_metrics(&self) -> &BTreeMap<String, String> {
        &self.health_metrics
    }

    pub fn owned_items(&self) -> &[String] {
        &self.owned_items
    }

    /// Returns a copy with masked-out sections cleared.
    pub fn masked(&self, mask: SignalMask) -> Self {
        Self {
            exclusions: self.exclusions.clone(),
            goals: if mask.goals {
                self.goals.clone()
            } else {
                Vec::new()
            },
            health_metrics: if mask.health_metrics {
                self.health_metrics.clone()
            } else {
                BTreeMap::new()
            },
            owned_items: if mask.owned_items {
                self.owned_items.clone()
            } else {
                Vec::new()
            },
        }
    }

    /// Returns `true` if no section carries any value.
    pub fn is_empty(&self) -> bool {
        self.exclusions.is_empty()
            && self.goals.is_empty()
            && self.health_metrics.is_empty()
            && self.owned_items.is_empty()
    }
}

fn dedup_trimmed(values: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && seen.insert(v.clone()))
        .collect()
}
