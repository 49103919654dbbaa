//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod clock;
pub mod gemini;
pub mod ports;
pub mod rate_limit;
pub mod resilient_llm;
