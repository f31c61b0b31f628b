//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - LLM: Provider adapters and their registry
//! - HTTP: The prompt submission API
//! - Adapters: Console presentation

pub mod adapters;
pub mod config;
pub mod http;
pub mod llm;
