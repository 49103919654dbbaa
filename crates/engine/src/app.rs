//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::ports::{ClockPort, LlmPort};
use crate::infrastructure::rate_limit::RateLimiter;
use crate::use_cases::generation::GenerateContent;

/// Rate limiting bounds for the generation endpoint.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitSettings {
    /// Requests allowed per window, per client key.
    pub max: u32,
    pub window: chrono::Duration,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            max: 30,
            window: chrono::Duration::milliseconds(60_000),
        }
    }
}

/// Main application state.
///
/// Holds the generation pipeline and the process-wide rate limiter.
/// Passed to HTTP handlers via Axum state. The rate limiter's bucket map
/// is the only state shared across requests.
pub struct App {
    pub generate: GenerateContent,
    pub rate_limiter: RateLimiter,
    pub rate_limit: RateLimitSettings,
}

impl App {
    pub fn new(
        llm: Option<Arc<dyn LlmPort>>,
        clock: Arc<dyn ClockPort>,
        rate_limit: RateLimitSettings,
    ) -> Self {
        Self {
            generate: GenerateContent::new(llm),
            rate_limiter: RateLimiter::new(clock),
            rate_limit,
        }
    }
}
