//! Domain layer - Core business objects
//!
//! This layer contains:
//! - Entities: Provider identifiers, validated prompt requests, results

pub mod entities;
