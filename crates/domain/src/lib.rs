//! QuestWeaver domain types.
//!
//! Value objects for the generation pipeline: requests coming in from
//! clients, results going back out, and the text/id helpers both sides
//! share. Everything here is request-scoped and immutable once built;
//! the crate performs no I/O.

pub mod content;
pub mod id;
pub mod request;
pub mod text;

pub use content::{
    DialogueMetadata, DialogueNode, DialogueOption, DialogueResult, Difficulty, QuestObjective,
    QuestObjectiveKind, QuestResult, QuestRewards,
};
pub use id::generate_id;
pub use request::{GenerationRequest, Personality};
pub use text::{is_nonempty_string, sanitize_text};
