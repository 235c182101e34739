use crate::oracle::OracleError;

/// Why a batch attempt handed its candidates to individual scoring.
#[derive(Debug, Clone, PartialEq)]
pub enum DegradeReason {
    /// The oracle call failed.
    Oracle(OracleError),
    /// The answer named none of the submitted titles.
    Unstructured,
    /// Not even one candidate fit the prompt budget.
    NothingSubmitted,
}

impl std::fmt::Display for DegradeReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DegradeReason::Oracle(e) => write!(f, "oracle: {e}"),
            DegradeReason::Unstructured => write!(f, "unstructured response"),
            DegradeReason::NothingSubmitted => write!(f, "nothing fit the prompt budget"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Result of one batch attempt over the leading `submitted` candidates of a chunk.
pub enum BatchOutcome {
    /// One score per submitted candidate, in order.
    Success { scores: Vec<f32> },
    /// The submitted candidates must be scored individually.
    Degrade {
        reason: DegradeReason,
        submitted: usize,
    },
}

impl BatchOutcome {
    /// Number of leading chunk candidates this outcome covers.
    pub fn submitted(&self) -> usize {
        match self {
            BatchOutcome::Success { scores } => scores.len(),
            BatchOutcome::Degrade { submitted, .. } => *submitted,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, BatchOutcome::Success { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Result of scoring one candidate on its own.
pub enum IndividualOutcome {
    Scored(f32),
    /// The oracle failed or gave no usable score; the neutral score applies.
    DefaultScore,
}

impl IndividualOutcome {
    pub fn score(&self) -> f32 {
        match self {
            IndividualOutcome::Scored(score) => *score,
            IndividualOutcome::DefaultScore => crate::constants::DEFAULT_SCORE,
        }
    }
}
