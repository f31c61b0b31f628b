//! LLM traits - Unified provider interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::ProviderId;

/// Sampling temperature sent with every request
pub const TEMPERATURE: f32 = 0.7;

/// Normalized provider answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LLMResponse {
    /// Response text, never empty
    pub content: String,
    /// Model that was asked
    pub model: String,
    pub usage: LLMUsage,
}

/// Token accounting, as far as the provider reports it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LLMUsage {
    pub total_tokens: Option<u64>,
    /// Not part of any documented provider API; read when present.
    pub remaining_tokens: Option<u64>,
}

/// LLM errors
///
/// Messages are already prefixed with the provider label where relevant, so
/// `to_string()` is what ends up in a result's `error` field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LLMError {
    /// Credential missing from configuration; holds the variable name
    #[error("Environment variable {0} is not configured.")]
    MissingApiKey(String),

    /// Provider answered with an error status
    #[error("{0}")]
    ApiError(String),

    /// Request never got a response
    #[error("{0}")]
    NetworkError(String),

    /// Successful status but an undecodable body
    #[error("{0}")]
    ParseError(String),
}

/// Result type for LLM operations
pub type LLMResult<T> = Result<T, LLMError>;

/// LLM Provider trait
///
/// Each implementation issues exactly one outbound request per call.
#[async_trait]
pub trait LLM: Send + Sync {
    /// Which provider this adapter talks to
    fn id(&self) -> ProviderId;

    /// Send a single user prompt
    async fn complete(&self, prompt: &str, max_tokens: u32) -> LLMResult<LLMResponse>;
}
