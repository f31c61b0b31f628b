use serde::{Deserialize, Serialize};

use super::ProviderId;

/// Outcome of querying a single provider.
///
/// On completion exactly one of `text` and `error` is set. Token counts are
/// left unset when the provider did not report them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderResult {
    pub id: ProviderId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens_remaining: Option<u64>,
}

impl ProviderResult {
    pub fn success(
        id: ProviderId,
        text: impl Into<String>,
        tokens_used: Option<u64>,
        tokens_remaining: Option<u64>,
    ) -> Self {
        Self {
            id,
            text: Some(text.into()),
            error: None,
            tokens_used,
            tokens_remaining,
        }
    }

    pub fn failure(id: ProviderId, error: impl Into<String>) -> Self {
        Self {
            id,
            text: None,
            error: Some(error.into()),
            tokens_used: None,
            tokens_remaining: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Response to one prompt: one result per requested provider, in request order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedResponse {
    pub prompt: String,
    pub results: Vec<ProviderResult>,
}

impl AggregatedResponse {
    pub fn result(&self, id: ProviderId) -> Option<&ProviderResult> {
        self.results.iter().find(|r| r.id == id)
    }
}
