//! Application layer errors

use thiserror::Error;

/// Input errors, detected before any provider is called.
///
/// The `Display` form is the machine readable code returned to HTTP clients.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("PROMPT_REQUIRED")]
    PromptRequired,

    #[error("MODEL_SELECTION_REQUIRED")]
    ProviderSelectionRequired,

    #[error("UNSUPPORTED_MODELS:{}", .0.join(","))]
    UnsupportedProviders(Vec<String>),
}

impl ValidationError {
    /// Message shown to a person rather than a client program
    pub fn describe(&self) -> String {
        match self {
            ValidationError::PromptRequired => "Please enter a prompt before submitting.".to_string(),
            ValidationError::ProviderSelectionRequired => "Select at least one model.".to_string(),
            ValidationError::UnsupportedProviders(names) => {
                format!("Unsupported models: {}", names.join(", "))
            }
        }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Top level errors surfaced by the binary
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Server error: {0}")]
    Server(String),
}
