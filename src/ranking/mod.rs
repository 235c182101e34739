//! Final selection of scored candidates.

use std::cmp::Ordering;

use tracing::debug;

use crate::constants::EXCLUDED_SCORE;
use crate::model::{ScoredCandidate, normalize_item, split_ingredients};

/// Drops excluded candidates (score ≤ 0 or NaN), sorts by descending score and
/// truncates to `top_k`. The sort is stable: equal scores keep their input order.
pub fn rank(scored: Vec<ScoredCandidate>, top_k: usize) -> Vec<ScoredCandidate> {
    let before = scored.len();
    let mut kept: Vec<ScoredCandidate> = scored.into_iter().filter(|s| !s.is_excluded()).collect();
    let excluded = before - kept.len();

    kept.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    kept.truncate(top_k);

    debug!(before, excluded, returned = kept.len(), "Ranked candidates");
    kept
}

/// Forces the score of every candidate whose ingredients mention an exclusion to 0.
///
/// Each ingredient token is normalized and matches a term when the term appears in it
/// as a whole word or run of words, so `egg` hits `boiled egg` but not `eggplant`.
/// Returns how many candidates were excluded.
pub fn apply_exclusion_guard<'a, I>(scored: &mut [ScoredCandidate], exclusions: I) -> usize
where
    I: IntoIterator<Item = &'a String>,
{
    let terms: Vec<String> = exclusions
        .into_iter()
        .map(|e| normalize_item(e))
        .filter(|e| !e.is_empty())
        .collect();
    if terms.is_empty() {
        return 0;
    }

    let mut hits = 0;
    for entry in scored.iter_mut() {
        let tokens: Vec<String> = split_ingredients(&entry.candidate.ingredients)
            .iter()
            .map(|t| normalize_item(t))
            .collect();
        if tokens
            .iter()
            .any(|token| terms.iter().any(|term| mentions(token, term)))
        {
            if entry.score != EXCLUDED_SCORE {
                debug!(recipe_id = entry.candidate.id, "Exclusion guard zeroed candidate");
            }
            entry.score = EXCLUDED_SCORE;
            hits += 1;
        }
    }
    hits
}

/// Whole-word containment over single-spaced, normalized text.
fn mentions(token: &str, term: &str) -> bool {
    let words: Vec<&str> = token.split(' ').collect();
    let needle: Vec<&str> = term.split(' ').collect();
    words.windows(needle.len()).any(|window| window == needle.as_slice())
}
