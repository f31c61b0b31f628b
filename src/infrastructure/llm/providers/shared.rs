//! Helpers shared by the provider adapters

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::entities::ProviderId;
use crate::infrastructure::llm::{LLMError, LLMResult};

/// Error envelope common to all three providers
#[derive(Deserialize, Debug, Default)]
struct ErrorEnvelope {
    error: Option<ErrorBody>,
}

#[derive(Deserialize, Debug, Default)]
struct ErrorBody {
    message: Option<Value>,
    code: Option<Value>,
    #[serde(rename = "type")]
    kind: Option<Value>,
}

/// Send a request and decode a successful JSON body.
///
/// Error statuses become [`LLMError::ApiError`] built from the provider's
/// error payload; transport failures become [`LLMError::NetworkError`].
pub(crate) async fn send<T: DeserializeOwned>(provider: ProviderId, request: RequestBuilder) -> LLMResult<T> {
    let response = request
        .send()
        .await
        .map_err(|e| LLMError::NetworkError(format!("{}: request failed: {}", provider.label(), e)))?;

    let (status, body) = read_body(provider, response).await?;

    if !status.is_success() {
        tracing::debug!("{} returned status {}", provider.label(), status);
        return Err(LLMError::ApiError(format_api_error(provider, &body)));
    }

    serde_json::from_str(&body)
        .map_err(|e| LLMError::ParseError(format!("{}: invalid response payload: {}", provider.label(), e)))
}

async fn read_body(provider: ProviderId, response: Response) -> LLMResult<(reqwest::StatusCode, String)> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| LLMError::NetworkError(format!("{}: request failed: {}", provider.label(), e)))?;
    Ok((status, body))
}

/// Build a readable message from a provider error body.
///
/// Uses `error.message`, `error.code` and `error.type`, skipping blank ones,
/// joined with ` | `. Falls back to a generic message otherwise.
pub(crate) fn format_api_error(provider: ProviderId, body: &str) -> String {
    let envelope: ErrorEnvelope = serde_json::from_str(body).unwrap_or_default();

    if let Some(error) = envelope.error {
        let parts: Vec<String> = [error.message, error.code, error.kind]
            .iter()
            .filter_map(|field| field.as_ref().and_then(field_text))
            .collect();
        if !parts.is_empty() {
            return format!("{}: {}", provider.label(), parts.join(" | "));
        }
    }

    format!("{}: Failed to query {}.", provider.label(), provider.label())
}

fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// Trim the extracted answer, substituting a placeholder when nothing is left
pub(crate) fn text_or_placeholder(provider: ProviderId, text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        placeholder(provider)
    } else {
        text.to_string()
    }
}

/// Text used when a provider answers without any content
pub fn placeholder(provider: ProviderId) -> String {
    format!("(No content returned by {}.)", provider.label())
}

/// Read a token count, treating anything but a non-negative integer as unset
pub(crate) fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(|value| value.as_u64()))
}

/// Strip a trailing slash so paths can be appended
pub(crate) fn trim_base(url: &str) -> &str {
    url.trim_end_matches('/')
}
