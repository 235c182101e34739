use futures_util::StreamExt;
use futures_util::stream;
use tracing::{debug, info, instrument, warn};

use super::types::{BatchOutcome, DegradeReason, IndividualOutcome};
use crate::constants::{DEFAULT_BATCH_SIZE, DEFAULT_INDIVIDUAL_CONCURRENCY};
use crate::model::{Candidate, ScoredCandidate, SignalBundle};
use crate::oracle::OracleClient;
use crate::parser;
use crate::prompt::PromptBuilder;

/// Scores candidates against a [`SignalBundle`] through the oracle.
#[derive(Debug, Clone)]
pub struct BatchScorer {
    oracle: OracleClient,
    prompts: PromptBuilder,
    batch_size: usize,
    individual_concurrency: usize,
}

impl BatchScorer {
    pub fn new(oracle: OracleClient, prompts: PromptBuilder) -> Self {
        Self {
            oracle,
            prompts,
            batch_size: DEFAULT_BATCH_SIZE,
            individual_concurrency: DEFAULT_INDIVIDUAL_CONCURRENCY,
        }
    }

    /// Sets the maximum number of candidates per batch prompt (at least 1).
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Sets how many individual calls may be in flight at once (at least 1).
    pub fn with_individual_concurrency(mut self, concurrency: usize) -> Self {
        self.individual_concurrency = concurrency.max(1);
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Scores every candidate. Output order and length match `candidates`.
    #[instrument(skip_all, fields(candidates = candidates.len(), include_nutrition = include_nutrition))]
    pub async fn score_all(
        &self,
        signals: &SignalBundle,
        candidates: Vec<Candidate>,
        include_nutrition: bool,
    ) -> Vec<ScoredCandidate> {
        let mut scores: Vec<f32> = Vec::with_capacity(candidates.len());
        let mut degraded = 0usize;
        let mut offset = 0;

        while offset < candidates.len() {
            let end = (offset + self.batch_size).min(candidates.len());
            let chunk = &candidates[offset..end];

            match self.attempt_batch(signals, chunk, include_nutrition).await {
                BatchOutcome::Success { scores: batch } => {
                    offset += batch.len();
                    scores.extend(batch);
                }
                BatchOutcome::Degrade { reason, submitted } => {
                    warn!(%reason, submitted, "Batch scoring degraded to individual scoring");
                    let submitted = &chunk[..submitted];
                    scores.extend(
                        self.score_individually(signals, submitted, include_nutrition)
                            .await,
                    );
                    degraded += submitted.len();
                    offset += submitted.len();
                }
            }
        }

        info!(
            scored = scores.len(),
            degraded, "Finished scoring candidates"
        );
        candidates
            .into_iter()
            .zip(scores)
            .map(|(candidate, score)| ScoredCandidate::new(candidate, score))
            .collect()
    }

    /// One batch prompt for as many leading `chunk` candidates as the budget admits.
    pub async fn attempt_batch(
        &self,
        signals: &SignalBundle,
        chunk: &[Candidate],
        include_nutrition: bool,
    ) -> BatchOutcome {
        let rendered = self.prompts.build(signals, chunk, include_nutrition);
        if rendered.included == 0 {
            return BatchOutcome::Degrade {
                reason: DegradeReason::NothingSubmitted,
                submitted: chunk.len(),
            };
        }
        let submitted = &chunk[..rendered.included];
        if submitted.len() < chunk.len() {
            debug!(
                submitted = submitted.len(),
                chunk = chunk.len(),
                "Prompt budget truncated the batch"
            );
        }

        let raw = match self.oracle.invoke(&rendered.prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                return BatchOutcome::Degrade {
                    reason: DegradeReason::Oracle(e),
                    submitted: submitted.len(),
                };
            }
        };

        let titles: Vec<&str> = submitted.iter().map(|c| c.title.as_str()).collect();
        let parsed = parser::parse(&raw, &titles);
        if !parsed.is_structured() {
            return BatchOutcome::Degrade {
                reason: DegradeReason::Unstructured,
                submitted: submitted.len(),
            };
        }

        debug!(
            submitted = submitted.len(),
            found = parsed.found(),
            "Batch scored"
        );
        BatchOutcome::Success {
            scores: parsed.into_scores(),
        }
    }

    /// One oracle call for a single candidate.
    pub async fn attempt_individual(
        &self,
        signals: &SignalBundle,
        candidate: &Candidate,
        include_nutrition: bool,
    ) -> IndividualOutcome {
        let prompt = self
            .prompts
            .build_single(signals, candidate, include_nutrition);
        match self.oracle.invoke(&prompt).await {
            Ok(raw) => match parser::parse_single(&raw) {
                Some(score) => IndividualOutcome::Scored(score),
                None => {
                    debug!(recipe_id = candidate.id, "Individual answer had no usable score");
                    IndividualOutcome::DefaultScore
                }
            },
            Err(e) => {
                debug!(recipe_id = candidate.id, error = %e, "Individual scoring failed");
                IndividualOutcome::DefaultScore
            }
        }
    }

    async fn score_individually(
        &self,
        signals: &SignalBundle,
        candidates: &[Candidate],
        include_nutrition: bool,
    ) -> Vec<f32> {
        stream::iter(
            candidates
                .iter()
                .map(|c| self.attempt_individual(signals, c, include_nutrition)),
        )
        .buffered(self.individual_concurrency)
        .map(|outcome| outcome.score())
        .collect()
        .await
    }
}
