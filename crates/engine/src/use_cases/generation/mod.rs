//! The generation pipeline.
//!
//! Orchestrates validate -> prompt -> complete -> extract -> coerce. Rate
//! limiting happens before this use case runs (in the API layer), so
//! everything here is per-request and stateless apart from the injected
//! LLM port.

pub mod coerce;
pub mod extract;
pub mod prompt;
pub mod validate;

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::infrastructure::ports::{LlmError, LlmPort};
use questweaver_domain::{DialogueResult, GenerationRequest, QuestResult};

pub use validate::InvalidRequest;

/// Why a generation attempt failed.
///
/// The taxonomy distinguishes "your input was rejected" from "the AI
/// produced garbage"; only the latter is worth an automatic retry by the
/// caller.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("{0}")]
    InvalidInput(#[from] InvalidRequest),
    #[error("Server is not configured. Missing GEMINI_API_KEY.")]
    Misconfigured,
    #[error(transparent)]
    Upstream(#[from] LlmError),
    #[error("AI returned unstructured output")]
    UnparsableOutput,
    #[error("AI output did not match expected schema")]
    SchemaMismatch,
}

/// A coerced generation result, tagged on the wire like the request.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GeneratedContent {
    Dialogue(DialogueResult),
    Quest(QuestResult),
}

/// Generate dialogue or quest content from a raw request payload.
pub struct GenerateContent {
    llm: Option<Arc<dyn LlmPort>>,
}

impl GenerateContent {
    /// `llm` is None when the service is running without upstream
    /// credentials; requests then fail as misconfigured after validation,
    /// so clients still get accurate 400s for bad payloads.
    pub fn new(llm: Option<Arc<dyn LlmPort>>) -> Self {
        Self { llm }
    }

    pub async fn execute(&self, payload: &Value) -> Result<GeneratedContent, GenerationError> {
        let request = validate::validate(payload)?;

        let llm = self.llm.as_ref().ok_or(GenerationError::Misconfigured)?;

        let prompt = prompt::build_prompt(&request);
        tracing::debug!(
            kind = request.kind(),
            prompt_chars = prompt.len(),
            "Invoking completion service"
        );

        let raw = llm.complete(&prompt).await?;

        let parsed = extract::extract_json(&raw).ok_or_else(|| {
            tracing::warn!(completion_chars = raw.len(), "Completion contained no parsable JSON");
            GenerationError::UnparsableOutput
        })?;

        let content = match &request {
            GenerationRequest::Dialogue { .. } => {
                coerce::coerce_dialogue(&parsed).map(GeneratedContent::Dialogue)
            }
            GenerationRequest::Quest { .. } => {
                coerce::coerce_quest(&parsed).map(GeneratedContent::Quest)
            }
        };

        content.ok_or_else(|| {
            tracing::warn!(kind = request.kind(), "Completion JSON did not match the schema");
            GenerationError::SchemaMismatch
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Mock LLM returning a canned completion and recording prompts.
    struct CannedLlm {
        completion: Result<String, LlmError>,
        prompts: Mutex<Vec<String>>,
    }

    impl CannedLlm {
        fn returning(completion: &str) -> Arc<Self> {
            Arc::new(Self {
                completion: Ok(completion.to_string()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn failing(error: LlmError) -> Arc<Self> {
            Arc::new(Self {
                completion: Err(error),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn prompt_count(&self) -> usize {
            self.prompts.lock().expect("mutex poisoned").len()
        }
    }

    #[async_trait]
    impl LlmPort for CannedLlm {
        async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts
                .lock()
                .expect("mutex poisoned")
                .push(prompt.to_string());
            self.completion.clone()
        }
    }

    fn dialogue_payload() -> Value {
        json!({
            "type": "dialogue",
            "gameLore": "A city built on ancient tunnels and guild rivalries.",
            "npcPersonality": "Serious",
        })
    }

    #[tokio::test]
    async fn validation_failure_never_invokes_the_llm() {
        let llm = CannedLlm::returning("{}");
        let pipeline = GenerateContent::new(Some(llm.clone()));

        let result = pipeline.execute(&json!({"type": "epic"})).await;

        assert!(matches!(result, Err(GenerationError::InvalidInput(_))));
        assert_eq!(llm.prompt_count(), 0);
    }

    #[tokio::test]
    async fn missing_llm_is_misconfigured_after_validation() {
        let pipeline = GenerateContent::new(None);

        let invalid = pipeline.execute(&json!({"type": "epic"})).await;
        assert!(matches!(invalid, Err(GenerationError::InvalidInput(_))));

        let valid = pipeline.execute(&dialogue_payload()).await;
        assert!(matches!(valid, Err(GenerationError::Misconfigured)));
    }

    #[tokio::test]
    async fn end_to_end_dialogue_coercion() {
        let llm = CannedLlm::returning("{\"type\":\"dialogue\",\"dialogue\":[]}");
        let pipeline = GenerateContent::new(Some(llm.clone()));

        let result = pipeline
            .execute(&dialogue_payload())
            .await
            .expect("pipeline succeeds");

        let GeneratedContent::Dialogue(dialogue) = result else {
            panic!("expected dialogue content");
        };
        assert_eq!(dialogue.npc_name, "Unknown");
        assert!(dialogue.dialogue.is_empty());
        assert_eq!(dialogue.metadata.difficulty.as_str(), "Medium");

        // The built prompt carried the requested personality and the schema
        let prompts = llm.prompts.lock().expect("mutex poisoned");
        assert!(prompts[0].contains("Serious"));
        assert!(prompts[0].contains("Return JSON exactly matching this schema"));
    }

    #[tokio::test]
    async fn prose_completion_is_unparsable_output() {
        let llm = CannedLlm::returning("I am sorry, I cannot help with that.");
        let pipeline = GenerateContent::new(Some(llm));

        let result = pipeline.execute(&dialogue_payload()).await;
        assert!(matches!(result, Err(GenerationError::UnparsableOutput)));
    }

    #[tokio::test]
    async fn wrong_type_tag_is_schema_mismatch() {
        // Model answered with a quest for a dialogue request
        let llm = CannedLlm::returning("{\"type\":\"quest\",\"title\":\"Nope\"}");
        let pipeline = GenerateContent::new(Some(llm));

        let result = pipeline.execute(&dialogue_payload()).await;
        assert!(matches!(result, Err(GenerationError::SchemaMismatch)));
    }

    #[tokio::test]
    async fn upstream_failure_propagates() {
        let llm = CannedLlm::failing(LlmError::Upstream {
            status: 503,
            message: "overloaded".into(),
        });
        let pipeline = GenerateContent::new(Some(llm));

        let result = pipeline.execute(&dialogue_payload()).await;
        assert!(matches!(
            result,
            Err(GenerationError::Upstream(LlmError::Upstream { status: 503, .. }))
        ));
    }

    #[tokio::test]
    async fn serialized_content_is_tagged() {
        let llm = CannedLlm::returning("{\"type\":\"quest\"}");
        let pipeline = GenerateContent::new(Some(llm));

        let payload = json!({
            "type": "quest",
            "gameLore": "A city built on ancient tunnels and guild rivalries.",
        });
        let result = pipeline.execute(&payload).await.expect("pipeline succeeds");
        let json = serde_json::to_value(&result).expect("serializes");

        assert_eq!(json["type"], "quest");
        assert_eq!(json["title"], "Untitled Quest");
        assert_eq!(json["rewards"]["experience"], 100);
    }
}
