//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Services: Prompt fan-out and aggregation
//! - Errors: Validation, configuration and top level errors

pub mod errors;
pub mod services;
