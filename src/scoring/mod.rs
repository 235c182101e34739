//! Oracle-backed suitability scoring.
//!
//! Candidates are scored in batches. A batch that fails (oracle error, or an answer
//! that names none of the submitted titles) degrades to one oracle call per
//! candidate, and a failed individual call falls back to the neutral score. Scoring
//! therefore never fails and never drops a candidate.

pub mod scorer;
pub mod types;


pub use scorer::BatchScorer;
pub use types::{BatchOutcome, DegradeReason, IndividualOutcome};
