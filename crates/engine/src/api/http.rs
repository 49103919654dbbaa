//! HTTP routes.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::app::App;
use crate::infrastructure::ports::LlmError;
use crate::use_cases::generation::{GeneratedContent, GenerationError};
use crate::use_cases::templates::demo_templates;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/generate", post(generate))
        .route("/api/templates", get(list_templates))
}

async fn health() -> &'static str {
    "OK"
}

/// POST /api/generate - the full pipeline behind one endpoint.
///
/// Rate limiting runs before the body is even parsed; a throttled client
/// learns nothing about payload handling.
async fn generate(
    State(app): State<Arc<App>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<GeneratedContent>, ApiError> {
    let ip = client_ip(&headers);
    let decision = app.rate_limiter.check(
        &format!("gen:{ip}"),
        app.rate_limit.max,
        app.rate_limit.window,
    );
    if !decision.allowed {
        tracing::debug!(client = %ip, reset_at = %decision.reset_at, "Rate limited");
        return Err(ApiError::RateLimited {
            remaining: decision.remaining,
            reset_at_ms: decision.reset_at.timestamp_millis(),
        });
    }

    let payload: Value = serde_json::from_slice(&body)
        .map_err(|_| ApiError::BadRequest("Invalid JSON body".to_string()))?;

    let content = app.generate.execute(&payload).await?;
    Ok(Json(content))
}

#[derive(Debug, Deserialize)]
struct TemplatesQuery {
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// GET /api/templates - static demo catalog, optionally filtered.
async fn list_templates(Query(query): Query<TemplatesQuery>) -> impl IntoResponse {
    Json(demo_templates(query.kind.as_deref()))
}

/// The client identifier used for rate limiting.
///
/// First forwarded address wins, then the real-ip header; everything else
/// shares a single "anonymous" bucket (a known weakness at this scale).
fn client_ip(headers: &HeaderMap) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }
    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        let real_ip = real_ip.trim();
        if !real_ip.is_empty() {
            return real_ip.to_string();
        }
    }
    "anonymous".to_string()
}

/// Client-facing error responses: `{error, details?}` JSON bodies.
#[derive(Debug, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    RateLimited { remaining: u32, reset_at_ms: i64 },
    Misconfigured,
    /// Completion service failed; mirrors the upstream status when known.
    Upstream { status: Option<u16> },
    /// The model answered, but with output that could not be normalized.
    BadModelOutput(&'static str),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Misconfigured => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Upstream { status } => status
                .and_then(|s| StatusCode::from_u16(s).ok())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            ApiError::BadModelOutput(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn body(&self) -> Value {
        match self {
            ApiError::BadRequest(message) => json!({ "error": message }),
            ApiError::RateLimited {
                remaining,
                reset_at_ms,
            } => json!({
                "error": "Rate limit exceeded. Please wait before retrying.",
                "details": { "remaining": remaining, "resetAt": reset_at_ms },
            }),
            ApiError::Misconfigured => {
                json!({ "error": "Server is not configured. Missing GEMINI_API_KEY." })
            }
            ApiError::Upstream { status } => {
                let status = status.unwrap_or(500);
                let mut details = json!({
                    "status": status,
                    "suggestion": "Check your input and try again",
                });
                if status == 429 {
                    details["retryAfter"] = json!(60);
                    details["suggestion"] = json!("Try again in 1 minute");
                }
                json!({ "error": "Failed to generate content", "details": details })
            }
            ApiError::BadModelOutput(message) => json!({
                "error": message,
                "details": { "suggestion": "Retry the request; the model output was unusable" },
            }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

impl From<GenerationError> for ApiError {
    fn from(error: GenerationError) -> Self {
        match error {
            GenerationError::InvalidInput(e) => ApiError::BadRequest(e.to_string()),
            GenerationError::Misconfigured => ApiError::Misconfigured,
            GenerationError::Upstream(LlmError::Upstream { status, message }) => {
                // Log the raw upstream message, but never forward it
                tracing::error!(status, message = %message, "Upstream completion failure");
                ApiError::Upstream {
                    status: Some(status),
                }
            }
            GenerationError::Upstream(e) => {
                tracing::error!(error = %e, "Completion transport failure");
                ApiError::Upstream { status: None }
            }
            GenerationError::UnparsableOutput => {
                ApiError::BadModelOutput("AI returned unstructured output")
            }
            GenerationError::SchemaMismatch => {
                ApiError::BadModelOutput("AI output did not match expected schema")
            }
        }
    }
}
