//! Anthropic Claude Provider

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::shared::{self, text_or_placeholder};
use crate::domain::entities::ProviderId;
use crate::infrastructure::llm::{LLMConfig, LLMError, LLMResponse, LLMResult, LLMUsage, LLM, TEMPERATURE};

/// Claude API endpoint
const API_BASE: &str = "https://api.anthropic.com/v1";

/// Messages API version header value
const API_VERSION: &str = "2023-06-01";

/// Claude provider
pub struct ClaudeProvider {
    api_key: Option<String>,
    client: Client,
    model: String,
    base_url: String,
}

impl ClaudeProvider {
    pub fn new(api_key: Option<&str>, model: Option<&str>) -> Self {
        Self {
            api_key: api_key.map(str::to_string),
            client: Client::new(),
            model: model
                .unwrap_or_else(|| LLMConfig::default_model(ProviderId::Claude))
                .to_string(),
            base_url: API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Get URL for the messages API
    fn endpoint(&self) -> String {
        format!("{}/messages", shared::trim_base(&self.base_url))
    }
}

/// API request structure
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: [ClaudeMessage<'a>; 1],
}

/// Claude message format
#[derive(Serialize)]
struct ClaudeMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// API response structure
#[derive(Deserialize, Debug, Default)]
struct ChatResponse {
    #[serde(default)]
    content: Vec<Segment>,
    usage: Option<Usage>,
}

/// Content segment; only text segments carry `text`
#[derive(Deserialize, Debug)]
struct Segment {
    text: Option<String>,
}

/// Usage information
#[derive(Deserialize, Debug)]
struct Usage {
    #[serde(default, deserialize_with = "shared::lenient_count")]
    total_tokens: Option<u64>,
    #[serde(default, deserialize_with = "shared::lenient_count")]
    output_tokens: Option<u64>,
    #[serde(default, deserialize_with = "shared::lenient_count")]
    tokens_remaining: Option<u64>,
}

impl ChatResponse {
    fn text(&self) -> String {
        self.content
            .iter()
            .map(|segment| segment.text.as_deref().unwrap_or(""))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn usage(&self) -> LLMUsage {
        self.usage
            .as_ref()
            .map(|u| LLMUsage {
                total_tokens: u.total_tokens.or(u.output_tokens),
                remaining_tokens: u.tokens_remaining,
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl LLM for ClaudeProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Claude
    }

    async fn complete(&self, prompt: &str, max_tokens: u32) -> LLMResult<LLMResponse> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| LLMError::MissingApiKey(LLMConfig::api_key_var(ProviderId::Claude).to_string()))?;

        let request = ChatRequest {
            model: &self.model,
            max_tokens,
            temperature: TEMPERATURE,
            messages: [ClaudeMessage { role: "user", content: prompt }],
        };

        tracing::debug!("Sending prompt to Claude model {}", self.model);

        let builder = self
            .client
            .post(self.endpoint())
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request);
        let response: ChatResponse = shared::send(ProviderId::Claude, builder).await?;

        Ok(LLMResponse {
            content: text_or_placeholder(ProviderId::Claude, &response.text()),
            model: self.model.clone(),
            usage: response.usage(),
        })
    }
}
