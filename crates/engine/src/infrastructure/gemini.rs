//! Gemini LLM client (generateContent REST API)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::infrastructure::ports::{LlmError, LlmPort};

/// Client for Google's Gemini generateContent API.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

/// Default Gemini base URL.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model for Gemini.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash-latest";

impl GeminiClient {
    pub fn new(base_url: &str, model: &str, api_key: &str) -> Self {
        // Use 120 second timeout for LLM requests (they can be slow)
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Create a client from environment variables.
    ///
    /// Uses `GEMINI_BASE_URL` and `GEMINI_MODEL`, falling back to defaults
    /// if not set. Returns None when `GEMINI_API_KEY` is absent; callers
    /// surface that as a misconfiguration at request time so the rest of
    /// the API stays usable without credentials.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.trim().is_empty())?;
        let base_url = std::env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string());
        let model =
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string());
        Some(Self::new(&base_url, &model, &api_key))
    }
}

#[async_trait]
impl LlmPort for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let api_request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, self.model
            ))
            .query(&[("key", self.api_key.as_str())])
            .json(&api_request)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .map_err(|e| LlmError::RequestFailed(e.to_string()))?;
            return Err(LlmError::Upstream {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let api_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        convert_response(api_response)
    }
}

fn convert_response(response: GenerateContentResponse) -> Result<String, LlmError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::InvalidResponse("No candidates in LLM response".to_string()))?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().map(|p| p.text).collect::<Vec<_>>().join(""))
        .unwrap_or_default();

    if text.is_empty() {
        return Err(LlmError::InvalidResponse(
            "Candidate carried no text parts".to_string(),
        ));
    }

    Ok(text)
}

// =============================================================================
// Gemini API types
// =============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_response_joins_text_parts() {
        let response = GenerateContentResponse {
            candidates: vec![Candidate {
                content: Some(CandidateContent {
                    parts: vec![
                        Part {
                            text: "{\"type\":".to_string(),
                        },
                        Part {
                            text: "\"quest\"}".to_string(),
                        },
                    ],
                }),
            }],
        };
        assert_eq!(convert_response(response).unwrap(), "{\"type\":\"quest\"}");
    }

    #[test]
    fn convert_response_rejects_empty_candidates() {
        let response = GenerateContentResponse { candidates: vec![] };
        assert!(matches!(
            convert_response(response),
            Err(LlmError::InvalidResponse(_))
        ));
    }

    #[test]
    fn convert_response_rejects_textless_candidate() {
        let response = GenerateContentResponse {
            candidates: vec![Candidate { content: None }],
        };
        assert!(matches!(
            convert_response(response),
            Err(LlmError::InvalidResponse(_))
        ));
    }
}
