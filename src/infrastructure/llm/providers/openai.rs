//! OpenAI Provider

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::shared::{self, text_or_placeholder};
use crate::domain::entities::ProviderId;
use crate::infrastructure::llm::{LLMConfig, LLMError, LLMResponse, LLMResult, LLMUsage, LLM, TEMPERATURE};

/// OpenAI API endpoint
const API_BASE: &str = "https://api.openai.com/v1";

/// OpenAI provider
pub struct OpenAIProvider {
    api_key: Option<String>,
    client: Client,
    model: String,
    base_url: String,
}

impl OpenAIProvider {
    /// A missing key is only reported when the provider is called.
    pub fn new(api_key: Option<&str>, model: Option<&str>) -> Self {
        Self {
            api_key: api_key.map(str::to_string),
            client: Client::new(),
            model: model
                .unwrap_or_else(|| LLMConfig::default_model(ProviderId::OpenAI))
                .to_string(),
            base_url: API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Get URL for chat completions
    fn endpoint(&self) -> String {
        format!("{}/chat/completions", shared::trim_base(&self.base_url))
    }
}

/// API request structure
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// API response structure
#[derive(Deserialize, Debug, Default)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Deserialize, Debug)]
struct ResponseMessage {
    content: Option<MessageContent>,
}

/// Content is usually a string, but some compatible servers send a list
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum ContentPart {
    Text(String),
    Block { text: Option<String> },
}

/// Usage information
#[derive(Deserialize, Debug)]
struct Usage {
    #[serde(default, deserialize_with = "shared::lenient_count")]
    total_tokens: Option<u64>,
    #[serde(default, deserialize_with = "shared::lenient_count")]
    remaining_tokens: Option<u64>,
    #[serde(default, deserialize_with = "shared::lenient_count")]
    tokens_remaining: Option<u64>,
}

impl ChatResponse {
    fn text(&self) -> String {
        let content = self
            .choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .and_then(|message| message.content.as_ref());

        match content {
            Some(MessageContent::Text(text)) => text.clone(),
            Some(MessageContent::Parts(parts)) => parts
                .iter()
                .map(|part| match part {
                    ContentPart::Text(text) => text.as_str(),
                    ContentPart::Block { text } => text.as_deref().unwrap_or(""),
                })
                .collect::<Vec<_>>()
                .join("\n\n"),
            None => String::new(),
        }
    }

    fn usage(&self) -> LLMUsage {
        self.usage
            .as_ref()
            .map(|u| LLMUsage {
                total_tokens: u.total_tokens,
                remaining_tokens: u.remaining_tokens.or(u.tokens_remaining),
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl LLM for OpenAIProvider {
    fn id(&self) -> ProviderId {
        ProviderId::OpenAI
    }

    async fn complete(&self, prompt: &str, max_tokens: u32) -> LLMResult<LLMResponse> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| LLMError::MissingApiKey(LLMConfig::api_key_var(ProviderId::OpenAI).to_string()))?;

        let request = ChatRequest {
            model: &self.model,
            temperature: TEMPERATURE,
            max_tokens,
            messages: [ChatMessage { role: "user", content: prompt }],
        };

        tracing::debug!("Sending prompt to OpenAI model {}", self.model);

        let builder = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&request);
        let response: ChatResponse = shared::send(ProviderId::OpenAI, builder).await?;

        Ok(LLMResponse {
            content: text_or_placeholder(ProviderId::OpenAI, &response.text()),
            model: self.model.clone(),
            usage: response.usage(),
        })
    }
}
