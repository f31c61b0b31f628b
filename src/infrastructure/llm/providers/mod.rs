//! LLM Providers

pub mod claude;
pub mod gemini;
pub mod openai;
pub mod shared;

pub use claude::ClaudeProvider;
pub use gemini::GeminiProvider;
pub use openai::OpenAIProvider;
pub use shared::placeholder;

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::entities::ProviderId;
use crate::infrastructure::llm::{LLMConfig, LLM};

/// Adapters keyed by the provider they talk to
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    adapters: HashMap<ProviderId, Arc<dyn LLM>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// One adapter per supported provider, configured from `config`.
    ///
    /// Adapters are registered even without a credential; the missing key
    /// surfaces as that provider's error when it is queried.
    pub fn from_config(config: &LLMConfig) -> Self {
        let openai = OpenAIProvider::new(
            config.api_key(ProviderId::OpenAI),
            Some(config.model(ProviderId::OpenAI)),
        );
        let gemini = GeminiProvider::new(
            config.api_key(ProviderId::Gemini),
            Some(config.model(ProviderId::Gemini)),
        );
        let claude = ClaudeProvider::new(
            config.api_key(ProviderId::Claude),
            Some(config.model(ProviderId::Claude)),
        );

        let openai = match config.base_url(ProviderId::OpenAI) {
            Some(url) => openai.with_base_url(url),
            None => openai,
        };
        let gemini = match config.base_url(ProviderId::Gemini) {
            Some(url) => gemini.with_base_url(url),
            None => gemini,
        };
        let claude = match config.base_url(ProviderId::Claude) {
            Some(url) => claude.with_base_url(url),
            None => claude,
        };

        Self::new()
            .with_adapter(Arc::new(openai))
            .with_adapter(Arc::new(gemini))
            .with_adapter(Arc::new(claude))
    }

    /// Register an adapter under its own id, replacing any previous one
    pub fn with_adapter(mut self, adapter: Arc<dyn LLM>) -> Self {
        self.adapters.insert(adapter.id(), adapter);
        self
    }

    pub fn get(&self, id: ProviderId) -> Option<Arc<dyn LLM>> {
        self.adapters.get(&id).cloned()
    }
}
