//! [`TextGenerationOracle`] backed by the `genai` multi-provider client.
//!
//! Provider credentials come from the provider's usual environment variables
//! (e.g. `OPENAI_API_KEY`).

use async_trait::async_trait;
use genai::Client;
use genai::chat::{ChatMessage, ChatRequest};
use tracing::error;

use super::{OracleError, OracleResult, TextGenerationOracle};

/// Single-turn chat completion against `model`.
pub struct GenaiOracle {
    client: Client,
    model: String,
}

impl GenaiOracle {
    pub fn new(model: impl Into<String>) -> Self {
        Self::with_client(Client::default(), model)
    }

    pub fn with_client(client: Client, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerationOracle for GenaiOracle {
    async fn generate(&self, prompt: &str) -> OracleResult<String> {
        let request = ChatRequest::new(vec![ChatMessage::user(prompt.to_string())]);
        let response = self
            .client
            .exec_chat(&self.model, request, None)
            .await
            .map_err(|e| {
                error!(model = %self.model, "Provider error: {}", e);
                OracleError::backend(e.to_string())
            })?;

        Ok(response.first_text().unwrap_or_default().to_string())
    }
}
