//! Domain entities - Core business objects with no external dependencies

pub mod provider;
pub mod prompt;
pub mod result;

pub use provider::{ProviderId, UnknownProvider};
pub use prompt::PromptRequest;
pub use result::{AggregatedResponse, ProviderResult};
