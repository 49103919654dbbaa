//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is
//! concrete types. Ports exist for:
//! - LLM calls (could swap Gemini -> Ollama/Claude/OpenAI)
//! - Clock (for testing)

use async_trait::async_trait;
use chrono::{DateTime, Utc};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum LlmError {
    /// The request never produced a usable HTTP response (network,
    /// timeout, decode failure).
    #[error("LLM request failed: {0}")]
    RequestFailed(String),
    /// The upstream service answered with a non-success status. The status
    /// is preserved so callers can mirror it to clients.
    #[error("LLM upstream returned {status}: {message}")]
    Upstream { status: u16, message: String },
    /// The response body decoded but carried no usable completion text.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

// =============================================================================
// External Service Ports
// =============================================================================

/// Single-turn text completion.
///
/// The only capability the pipeline needs from the model: a prompt in,
/// raw completion text out. Everything about the model's identity and
/// authentication lives behind the implementation.
#[async_trait]
pub trait LlmPort: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

// =============================================================================
// Testability Ports
// =============================================================================

pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
