use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a supported LLM backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    OpenAI,
    Gemini,
    Claude,
}

impl ProviderId {
    /// Every supported provider, in display order
    pub const ALL: [ProviderId; 3] = [ProviderId::OpenAI, ProviderId::Gemini, ProviderId::Claude];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenAI => "openai",
            ProviderId::Gemini => "gemini",
            ProviderId::Claude => "claude",
        }
    }

    /// Human readable provider name, used in error messages and cards
    pub fn label(&self) -> &'static str {
        match self {
            ProviderId::OpenAI => "OpenAI",
            ProviderId::Gemini => "Gemini",
            ProviderId::Claude => "Claude",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a supported provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownProvider(pub String);

impl FromStr for ProviderId {
    type Err = UnknownProvider;

    /// Matching is exact: identifiers are lowercase on the wire.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "openai" => Ok(ProviderId::OpenAI),
            "gemini" => Ok(ProviderId::Gemini),
            "claude" => Ok(ProviderId::Claude),
            other => Err(UnknownProvider(other.to_string())),
        }
    }
}
