use std::time::Duration;

use thiserror::Error;

/// Why an oracle call produced no usable text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnavailableReason {
    /// The backend returned an error (network, auth, provider).
    #[error("backend error: {0}")]
    Backend(String),

    /// The backend answered with blank text.
    #[error("empty response")]
    EmptyResponse,

    /// The call did not finish within the configured timeout.
    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

/// Errors from the text-generation oracle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    /// The oracle could not produce an answer. Callers always have a fallback.
    #[error("oracle unavailable: {reason}")]
    Unavailable { reason: UnavailableReason },
}

impl OracleError {
    /// Shorthand for a backend failure.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: UnavailableReason::Backend(message.into()),
        }
    }

    pub fn empty_response() -> Self {
        Self::Unavailable {
            reason: UnavailableReason::EmptyResponse,
        }
    }

    pub fn timeout(after: Duration) -> Self {
        Self::Unavailable {
            reason: UnavailableReason::Timeout(after),
        }
    }

    /// Returns the failure reason.
    pub fn reason(&self) -> &UnavailableReason {
        match self {
            Self::Unavailable { reason } => reason,
        }
    }
}

pub type OracleResult<T> = Result<T, OracleError>;
