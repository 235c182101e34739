//! Access to the external text-generation service.
//!
//! [`TextGenerationOracle`] is the seam to the provider. [`OracleClient`] wraps any
//! backend with a timeout and a non-empty check; it never retries.

pub mod error;
pub mod provider;
#[cfg(any(test, feature = "mock"))]
pub mod mock;


use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

pub use error::{OracleError, OracleResult, UnavailableReason};
pub use provider::GenaiOracle;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockOracle;

#[async_trait]
/// A service that turns a prompt into free text.
pub trait TextGenerationOracle: Send + Sync {
    /// Generates a completion for `prompt`.
    async fn generate(&self, prompt: &str) -> OracleResult<String>;
}

/// Timeout-bounded handle to an oracle backend. Cheap to clone.
#[derive(Clone)]
pub struct OracleClient {
    backend: Arc<dyn TextGenerationOracle>,
    timeout: Duration,
}

impl std::fmt::Debug for OracleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleClient")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl OracleClient {
    pub fn new(backend: Arc<dyn TextGenerationOracle>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Sends `prompt` and returns the non-blank answer.
    ///
    /// On timeout the in-flight call is dropped.
    #[instrument(skip(self, prompt), fields(prompt_chars = prompt.chars().count()))]
    pub async fn invoke(&self, prompt: &str) -> OracleResult<String> {
        let text = match tokio::time::timeout(self.timeout, self.backend.generate(prompt)).await {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                warn!(error = %e, "Oracle call failed");
                return Err(e);
            }
            Err(_) => {
                warn!(timeout_ms = self.timeout.as_millis() as u64, "Oracle call timed out");
                return Err(OracleError::timeout(self.timeout));
            }
        };

        if text.trim().is_empty() {
            warn!("Oracle returned a blank response");
            return Err(OracleError::empty_response());
        }

        debug!(response_chars = text.chars().count(), "Oracle call succeeded");
        Ok(text)
    }
}
