//! LLM Configuration

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::entities::ProviderId;

/// Budget used when none (or an unusable one) is configured
pub const DEFAULT_MAX_TOKENS: u32 = 800;

/// Upper bound for any configured budget
pub const MAX_TOKENS_LIMIT: u32 = 4000;

/// LLM Configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct LLMConfig {
    /// Provider-specific API keys
    pub openai_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub claude_api_key: Option<String>,

    /// Model overrides; defaults apply when unset
    pub openai_model: Option<String>,
    pub gemini_model: Option<String>,
    pub claude_model: Option<String>,

    /// Endpoint overrides, mostly for proxies and tests
    pub openai_base_url: Option<String>,
    pub gemini_base_url: Option<String>,
    pub claude_base_url: Option<String>,

    /// Raw token budget, see [`resolve_max_tokens`]
    #[serde(deserialize_with = "string_or_number")]
    pub max_tokens: Option<String>,
}

impl LLMConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Override fields with any environment variables that are set
    pub fn apply_env(&mut self) {
        for id in ProviderId::ALL {
            if let Some(key) = env_value(Self::api_key_var(id)) {
                *self.api_key_slot(id) = Some(key);
            }
            if let Some(model) = env_value(Self::model_var(id)) {
                *self.model_slot(id) = Some(model);
            }
        }

        if let Some(max_tokens) = env_value("MAX_TOKENS") {
            self.max_tokens = Some(max_tokens);
        }
    }

    /// Environment variable holding a provider's credential
    pub fn api_key_var(provider: ProviderId) -> &'static str {
        match provider {
            ProviderId::OpenAI => "OPENAI_API_KEY",
            ProviderId::Gemini => "GEMINI_API_KEY",
            ProviderId::Claude => "CLAUDE_API_KEY",
        }
    }

    /// Environment variable holding a provider's model override
    pub fn model_var(provider: ProviderId) -> &'static str {
        match provider {
            ProviderId::OpenAI => "OPENAI_MODEL",
            ProviderId::Gemini => "GEMINI_MODEL",
            ProviderId::Claude => "CLAUDE_MODEL",
        }
    }

    /// Model used when no override is configured
    pub fn default_model(provider: ProviderId) -> &'static str {
        match provider {
            ProviderId::OpenAI => "gpt-4o-mini",
            ProviderId::Gemini => "gemini-1.5-flash-latest",
            ProviderId::Claude => "claude-3-5-sonnet-20240620",
        }
    }

    /// Get API key for a provider; empty strings count as unset
    pub fn api_key(&self, provider: ProviderId) -> Option<&str> {
        let key = match provider {
            ProviderId::OpenAI => &self.openai_api_key,
            ProviderId::Gemini => &self.gemini_api_key,
            ProviderId::Claude => &self.claude_api_key,
        };
        non_empty(key)
    }

    /// Get model for a provider
    pub fn model(&self, provider: ProviderId) -> &str {
        let model = match provider {
            ProviderId::OpenAI => &self.openai_model,
            ProviderId::Gemini => &self.gemini_model,
            ProviderId::Claude => &self.claude_model,
        };
        non_empty(model).unwrap_or_else(|| Self::default_model(provider))
    }

    /// Get endpoint override for a provider
    pub fn base_url(&self, provider: ProviderId) -> Option<&str> {
        let url = match provider {
            ProviderId::OpenAI => &self.openai_base_url,
            ProviderId::Gemini => &self.gemini_base_url,
            ProviderId::Claude => &self.claude_base_url,
        };
        non_empty(url)
    }

    fn api_key_slot(&mut self, provider: ProviderId) -> &mut Option<String> {
        match provider {
            ProviderId::OpenAI => &mut self.openai_api_key,
            ProviderId::Gemini => &mut self.gemini_api_key,
            ProviderId::Claude => &mut self.claude_api_key,
        }
    }

    fn model_slot(&mut self, provider: ProviderId) -> &mut Option<String> {
        match provider {
            ProviderId::OpenAI => &mut self.openai_model,
            ProviderId::Gemini => &mut self.gemini_model,
            ProviderId::Claude => &mut self.claude_model,
        }
    }
}

/// Turn a configured budget into the token limit sent to providers.
///
/// The value is parsed as a number after trimming. Anything unparsable,
/// non-finite or below one falls back to [`DEFAULT_MAX_TOKENS`]; fractions
/// are floored and the result is capped at [`MAX_TOKENS_LIMIT`].
pub fn resolve_max_tokens(raw: Option<&str>) -> u32 {
    let parsed = raw.and_then(|value| value.trim().parse::<f64>().ok());
    match parsed {
        Some(value) if value.is_finite() && value >= 1.0 => {
            value.floor().min(MAX_TOKENS_LIMIT as f64) as u32
        }
        _ => DEFAULT_MAX_TOKENS,
    }
}

/// YAML writes `max-tokens: 1200` as a number; keep it as text either way
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
    }))
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
