//! LLM integration - Multi-provider AI support

pub mod config;
pub mod providers;
pub mod traits;


pub use config::{resolve_max_tokens, LLMConfig, DEFAULT_MAX_TOKENS, MAX_TOKENS_LIMIT};
pub use providers::{ClaudeProvider, GeminiProvider, OpenAIProvider, ProviderRegistry};
pub use traits::{LLMError, LLMResponse, LLMResult, LLMUsage, LLM, TEMPERATURE};
