//! Scriptable oracle for tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{OracleError, OracleResult, TextGenerationOracle};

type Responder = dyn Fn(&str) -> OracleResult<String> + Send + Sync;

/// Oracle whose answers come from a closure over the prompt.
///
/// Records every prompt it receives.
pub struct MockOracle {
    responder: Arc<Responder>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockOracle {
    pub fn new(responder: impl Fn(&str) -> OracleResult<String> + Send + Sync + 'static) -> Self {
        Self {
            responder: Arc::new(responder),
            delay: None,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Always answers `text`.
    pub fn always(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(move |_| Ok(text.clone()))
    }

    /// Always fails with a backend error.
    pub fn failing() -> Self {
        Self::new(|_| Err(OracleError::backend("mock failure")))
    }

    /// Sleeps for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl TextGenerationOracle for MockOracle {
    async fn generate(&self, prompt: &str) -> OracleResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().push(prompt.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        (self.responder)(prompt)
    }
}
