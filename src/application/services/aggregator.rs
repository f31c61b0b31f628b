//! Prompt fan-out across providers

use futures::future::join_all;

use crate::application::errors::ValidationError;
use crate::domain::entities::{AggregatedResponse, PromptRequest, ProviderId, ProviderResult};
use crate::infrastructure::llm::{resolve_max_tokens, LLMConfig, ProviderRegistry};

/// Sends one prompt to every selected provider and collects the answers
pub struct Aggregator {
    registry: ProviderRegistry,
    max_tokens: Option<String>,
}

impl Aggregator {
    /// `max_tokens` is the raw configured budget; it is resolved on every call.
    pub fn new(registry: ProviderRegistry, max_tokens: Option<String>) -> Self {
        Self { registry, max_tokens }
    }

    pub fn from_config(config: &LLMConfig) -> Self {
        Self::new(ProviderRegistry::from_config(config), config.max_tokens.clone())
    }

    /// Validate the input, then query every requested provider concurrently.
    ///
    /// Fails only on invalid input, before any network call. Once validation
    /// passes, provider failures end up in the matching result's `error`.
    pub async fn aggregate<S: AsRef<str>>(
        &self,
        prompt: &str,
        providers: &[S],
    ) -> Result<AggregatedResponse, ValidationError> {
        let request = PromptRequest::new(prompt, providers)?;
        Ok(self.run(&request).await)
    }

    /// Query the providers of an already validated request
    pub async fn run(&self, request: &PromptRequest) -> AggregatedResponse {
        let max_tokens = resolve_max_tokens(self.max_tokens.as_deref());
        let ids: Vec<&str> = request.providers().iter().map(ProviderId::as_str).collect();
        tracing::info!("Querying models [{}] with max_tokens={}", ids.join(","), max_tokens);

        // join_all keeps input order regardless of completion order
        let calls = request
            .providers()
            .iter()
            .map(|&id| self.query(id, request.prompt(), max_tokens));
        let results = join_all(calls).await;

        AggregatedResponse {
            prompt: request.prompt().to_string(),
            results,
        }
    }

    async fn query(&self, id: ProviderId, prompt: &str, max_tokens: u32) -> ProviderResult {
        let Some(adapter) = self.registry.get(id) else {
            let message = format!("No adapter registered for {}.", id.label());
            tracing::error!("Model {} failed: {}", id, message);
            return ProviderResult::failure(id, message);
        };

        match adapter.complete(prompt, max_tokens).await {
            Ok(response) => {
                tracing::debug!("Model {} answered using {}", id, response.model);
                ProviderResult::success(
                    id,
                    response.content,
                    response.usage.total_tokens,
                    response.usage.remaining_tokens,
                )
            }
            Err(e) => {
                tracing::error!("Model {} failed: {}", id, e);
                ProviderResult::failure(id, e.to_string())
            }
        }
    }
}
