//! Inbound request validation.
//!
//! The body arrives as untyped JSON and is checked rule by rule, first
//! failure wins. A validated request carries sanitized text and preserves
//! optionality: absent fields stay absent so the prompt builder owns the
//! defaults.

use serde_json::Value;

use questweaver_domain::{is_nonempty_string, sanitize_text, GenerationRequest, Personality};

/// Minimum trimmed length for the lore field.
const MIN_LORE_LENGTH: usize = 10;

/// A rejected generation request. Maps to a client-facing 400.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidRequest {
    #[error("Request body must be a JSON object")]
    NotAnObject,
    #[error("Field 'type' must be \"dialogue\" or \"quest\"")]
    UnknownKind,
    #[error("Field 'gameLore' must be a string of at least {MIN_LORE_LENGTH} characters")]
    LoreTooShort,
    #[error("Field 'npcPersonality' must be one of Goofy, Serious, Mysterious, Aggressive")]
    UnknownPersonality,
    #[error("Field '{0}' must be a string")]
    NotAString(&'static str),
}

/// Validates a raw JSON payload into a [`GenerationRequest`].
///
/// Rules, in order:
/// 1. the payload is a JSON object
/// 2. `type` is exactly `"dialogue"` or `"quest"`
/// 3. `gameLore` is a string with trimmed length >= 10
/// 4. a supplied `npcPersonality` names one of the four personalities
///    (dialogue only)
/// 5. remaining free-text fields, when present, are strings
pub fn validate(raw: &Value) -> Result<GenerationRequest, InvalidRequest> {
    let object = raw.as_object().ok_or(InvalidRequest::NotAnObject)?;

    let kind = object
        .get("type")
        .and_then(Value::as_str)
        .ok_or(InvalidRequest::UnknownKind)?;
    if kind != "dialogue" && kind != "quest" {
        return Err(InvalidRequest::UnknownKind);
    }

    let lore = object
        .get("gameLore")
        .and_then(Value::as_str)
        .filter(|lore| is_nonempty_string(lore, MIN_LORE_LENGTH))
        .ok_or(InvalidRequest::LoreTooShort)?;
    let lore = sanitize_text(lore);

    if kind == "dialogue" {
        let personality = match object.get("npcPersonality") {
            None | Some(Value::Null) => None,
            Some(Value::String(value)) => {
                Some(Personality::parse(value).ok_or(InvalidRequest::UnknownPersonality)?)
            }
            Some(_) => return Err(InvalidRequest::UnknownPersonality),
        };

        Ok(GenerationRequest::Dialogue {
            lore,
            npc_name: optional_text(object.get("npcName"), "npcName")?,
            personality,
            situation: optional_text(object.get("situation"), "situation")?,
        })
    } else {
        Ok(GenerationRequest::Quest {
            lore,
            location: optional_text(object.get("location"), "location")?,
            primary_objective: optional_text(object.get("primaryObjective"), "primaryObjective")?,
        })
    }
}

/// An absent or null field stays absent; a present field must be a string
/// and comes back sanitized.
fn optional_text(
    value: Option<&Value>,
    field: &'static str,
) -> Result<Option<String>, InvalidRequest> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(sanitize_text(text))),
        Some(_) => Err(InvalidRequest::NotAString(field)),
    }
}
