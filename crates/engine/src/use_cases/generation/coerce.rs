//! Response coercion.
//!
//! Takes the untyped JSON recovered from the model and normalizes it into
//! the strict result schema. Coercion is lenient per field (defaults for
//! anything missing or malformed) but all-or-nothing per response: the
//! only total failure is a wrong or missing type tag. Model text is as
//! untrusted as client text, so every free-text field is sanitized on the
//! way out.

use serde_json::Value;

use questweaver_domain::{
    generate_id, is_nonempty_string, sanitize_text, Difficulty, DialogueMetadata, DialogueNode,
    DialogueOption, DialogueResult, QuestObjective, QuestObjectiveKind, QuestResult, QuestRewards,
};

const DEFAULT_NPC_NAME: &str = "Unknown";
const DEFAULT_PERSONALITY: &str = "Unknown";
const DEFAULT_MOOD: &str = "Neutral";
const DEFAULT_TITLE: &str = "Untitled Quest";
const DEFAULT_DURATION: &str = "30-60 minutes";
const DEFAULT_EXPERIENCE: u32 = 100;
const DEFAULT_GOLD: u32 = 25;

/// Normalizes a dialogue response, or None when the value's own type tag
/// is not `"dialogue"`.
pub fn coerce_dialogue(value: &Value) -> Option<DialogueResult> {
    if value.get("type").and_then(Value::as_str) != Some("dialogue") {
        return None;
    }

    let nodes = value
        .get("dialogue")
        .and_then(Value::as_array)
        .map(|nodes| nodes.iter().map(coerce_node).collect())
        .unwrap_or_default();

    let metadata = value.get("metadata");

    Some(DialogueResult {
        npc_name: text_or(value.get("npcName"), DEFAULT_NPC_NAME),
        dialogue: nodes,
        metadata: DialogueMetadata {
            personality: text_or(
                metadata.and_then(|m| m.get("personality")),
                DEFAULT_PERSONALITY,
            ),
            mood: text_or(metadata.and_then(|m| m.get("mood")), DEFAULT_MOOD),
            difficulty: difficulty_or_default(metadata.and_then(|m| m.get("difficulty"))),
        },
    })
}

/// Normalizes a quest response, or None when the value's own type tag is
/// not `"quest"`.
pub fn coerce_quest(value: &Value) -> Option<QuestResult> {
    if value.get("type").and_then(Value::as_str) != Some("quest") {
        return None;
    }

    let objectives = value
        .get("objectives")
        .and_then(Value::as_array)
        .map(|objectives| objectives.iter().map(coerce_objective).collect())
        .unwrap_or_default();

    let rewards = value.get("rewards");

    Some(QuestResult {
        title: text_or(value.get("title"), DEFAULT_TITLE),
        description: text_or(value.get("description"), ""),
        objectives,
        estimated_duration: text_or(value.get("estimatedDuration"), DEFAULT_DURATION),
        difficulty: difficulty_or_default(value.get("difficulty")),
        rewards: QuestRewards {
            experience: number_or(rewards.and_then(|r| r.get("experience")), DEFAULT_EXPERIENCE),
            gold: number_or(rewards.and_then(|r| r.get("gold")), DEFAULT_GOLD),
            items: rewards
                .and_then(|r| r.get("items"))
                .and_then(Value::as_array)
                .map(|items| items.iter().map(|item| text_or(Some(item), "")).collect()),
        },
    })
}

fn coerce_node(node: &Value) -> DialogueNode {
    let options = node
        .get("options")
        .and_then(Value::as_array)
        .map(|options| options.iter().map(coerce_option).collect())
        .unwrap_or_default();

    DialogueNode {
        id: id_or_generated(node.get("id"), "node"),
        text: text_or(node.get("text"), ""),
        options,
    }
}

fn coerce_option(option: &Value) -> DialogueOption {
    DialogueOption {
        id: id_or_generated(option.get("id"), "opt"),
        text: text_or(option.get("text"), ""),
        // Kept verbatim when non-empty; referential integrity against node
        // ids is deliberately not enforced (renderers treat unresolvable
        // references as end-of-conversation). Candidate for strictness.
        next_id: nonempty_string(option.get("nextId")),
        consequence: nonempty_string(option.get("consequence")).map(|s| sanitize_text(&s)),
    }
}

fn coerce_objective(objective: &Value) -> QuestObjective {
    let kind = match objective.get("type").and_then(Value::as_str) {
        Some("optional") => QuestObjectiveKind::Optional,
        _ => QuestObjectiveKind::Main,
    };

    QuestObjective {
        id: id_or_generated(objective.get("id"), "obj"),
        description: text_or(objective.get("description"), ""),
        kind,
        reward: nonempty_string(objective.get("reward")).map(|s| sanitize_text(&s)),
    }
}

/// A usable id from the model, or a freshly generated one.
fn id_or_generated(value: Option<&Value>, prefix: &str) -> String {
    match nonempty_string(value) {
        Some(id) => id,
        None => generate_id(prefix),
    }
}

fn nonempty_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| is_nonempty_string(s, 1))
        .map(str::to_string)
}

/// Stringifies scalars, drops structures, sanitizes, then falls back to
/// `default` when nothing usable remains.
fn text_or(value: Option<&Value>, default: &str) -> String {
    let raw = match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    };
    let sanitized = sanitize_text(&raw);
    if sanitized.is_empty() && !default.is_empty() {
        default.to_string()
    } else {
        sanitized
    }
}

fn difficulty_or_default(value: Option<&Value>) -> Difficulty {
    value
        .and_then(Value::as_str)
        .and_then(Difficulty::parse)
        .unwrap_or_default()
}

/// Numeric coercion for rewards: JSON numbers and numeric strings are
/// accepted (truncated toward zero, clamped at zero); anything else takes
/// the default.
fn number_or(value: Option<&Value>, default: u32) -> u32 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(n) if n.is_finite() => n.max(0.0).min(u32::MAX as f64) as u32,
        _ => default,
    }
}
