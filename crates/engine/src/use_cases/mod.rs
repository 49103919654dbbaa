//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific area. Use cases
//! orchestrate across domain types and infrastructure ports.

pub mod generation;
pub mod templates;

pub use generation::{GenerateContent, GeneratedContent, GenerationError};
