use thiserror::Error;

#[derive(Debug, Error)]
pub enum DedupError {
    /// The time-ordered set backend failed.
    #[error("dedup store failed: {message}")]
    Store { message: String },
}

pub type DedupResult<T> = Result<T, DedupError>;
