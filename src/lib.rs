//! Send one prompt to several LLM providers at once and compare the answers.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::errors::{AppError, ConfigError, ValidationError};
pub use application::services::Aggregator;
pub use domain::entities::{AggregatedResponse, PromptRequest, ProviderId, ProviderResult};
pub use infrastructure::config::Config;
