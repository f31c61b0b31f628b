//! Google Gemini Provider

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::shared::{self, text_or_placeholder};
use crate::domain::entities::ProviderId;
use crate::infrastructure::llm::{LLMConfig, LLMError, LLMResponse, LLMResult, LLMUsage, LLM, TEMPERATURE};

/// Gemini API endpoint
const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini provider
pub struct GeminiProvider {
    api_key: Option<String>,
    client: Client,
    model: String,
    base_url: String,
}

impl GeminiProvider {
    pub fn new(api_key: Option<&str>, model: Option<&str>) -> Self {
        Self {
            api_key: api_key.map(str::to_string),
            client: Client::new(),
            model: model
                .unwrap_or_else(|| LLMConfig::default_model(ProviderId::Gemini))
                .to_string(),
            base_url: API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The key is sent as a query parameter, not part of this URL
    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", shared::trim_base(&self.base_url), self.model)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Debug)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default, deserialize_with = "shared::lenient_count")]
    total_token_count: Option<u64>,
    #[serde(default, deserialize_with = "shared::lenient_count")]
    remaining_token_count: Option<u64>,
}

impl GenerateResponse {
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .map(|part| part.text.as_deref().unwrap_or(""))
                    .collect::<Vec<_>>()
                    .join("\n\n")
            })
            .unwrap_or_default()
    }

    fn usage(&self) -> LLMUsage {
        self.usage_metadata
            .as_ref()
            .map(|u| LLMUsage {
                total_tokens: u.total_token_count,
                remaining_tokens: u.remaining_token_count,
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl LLM for GeminiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Gemini
    }

    async fn complete(&self, prompt: &str, max_tokens: u32) -> LLMResult<LLMResponse> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| LLMError::MissingApiKey(LLMConfig::api_key_var(ProviderId::Gemini).to_string()))?;

        let request = GenerateRequest {
            contents: [Content {
                role: "user",
                parts: [RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: max_tokens,
            },
        };

        tracing::debug!("Sending prompt to Gemini model {}", self.model);

        let builder = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(&request);
        let response: GenerateResponse = shared::send(ProviderId::Gemini, builder).await?;

        Ok(LLMResponse {
            content: text_or_placeholder(ProviderId::Gemini, &response.text()),
            model: self.model.clone(),
            usage: response.usage(),
        })
    }
}
