use super::ProviderId;
use crate::application::errors::ValidationError;

/// A validated prompt together with the providers it should be sent to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    prompt: String,
    providers: Vec<ProviderId>,
}

impl PromptRequest {
    /// Validate raw input from a caller.
    ///
    /// The prompt is trimmed and must not be empty. Provider identifiers are
    /// deduplicated keeping the first occurrence, then checked against the
    /// supported set. Checks run in that order, so an empty prompt is
    /// reported even when the provider list is also invalid.
    pub fn new<S: AsRef<str>>(prompt: &str, providers: &[S]) -> Result<Self, ValidationError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(ValidationError::PromptRequired);
        }

        if providers.is_empty() {
            return Err(ValidationError::ProviderSelectionRequired);
        }

        let mut unique: Vec<&str> = Vec::with_capacity(providers.len());
        for raw in providers {
            let raw = raw.as_ref();
            if !unique.contains(&raw) {
                unique.push(raw);
            }
        }

        let mut ids = Vec::with_capacity(unique.len());
        let mut unsupported = Vec::new();
        for raw in unique {
            match raw.parse::<ProviderId>() {
                Ok(id) => ids.push(id),
                Err(_) => unsupported.push(raw.to_string()),
            }
        }

        if !unsupported.is_empty() {
            return Err(ValidationError::UnsupportedProviders(unsupported));
        }

        Ok(Self {
            prompt: prompt.to_string(),
            providers: ids,
        })
    }

    /// The trimmed prompt
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Deduplicated providers in request order
    pub fn providers(&self) -> &[ProviderId] {
        &self.providers
    }
}
