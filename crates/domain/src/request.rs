//! Inbound generation requests.

use serde::{Deserialize, Serialize};
use std::fmt;

/// NPC personality for dialogue generation.
///
/// Unknown values are rejected during validation rather than coerced;
/// this enum only ever holds one of the four supported personalities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Personality {
    Goofy,
    Serious,
    #[default]
    Mysterious,
    Aggressive,
}

impl Personality {
    /// All supported personalities, for validation messages and UI dropdowns.
    pub fn all() -> &'static [Personality] {
        &[
            Personality::Goofy,
            Personality::Serious,
            Personality::Mysterious,
            Personality::Aggressive,
        ]
    }

    /// Parses the wire form, accepting only the exact four names.
    pub fn parse(value: &str) -> Option<Personality> {
        match value {
            "Goofy" => Some(Personality::Goofy),
            "Serious" => Some(Personality::Serious),
            "Mysterious" => Some(Personality::Mysterious),
            "Aggressive" => Some(Personality::Aggressive),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Personality::Goofy => "Goofy",
            Personality::Serious => "Serious",
            Personality::Mysterious => "Mysterious",
            Personality::Aggressive => "Aggressive",
        }
    }
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated generation request.
///
/// The discriminant fixes which optional fields are meaningful. All
/// free-text fields have already been sanitized by the validator; absent
/// fields stay absent so the prompt builder owns the defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationRequest {
    Dialogue {
        lore: String,
        npc_name: Option<String>,
        personality: Option<Personality>,
        situation: Option<String>,
    },
    Quest {
        lore: String,
        location: Option<String>,
        primary_objective: Option<String>,
    },
}

impl GenerationRequest {
    /// The shared lore field, regardless of variant.
    pub fn lore(&self) -> &str {
        match self {
            GenerationRequest::Dialogue { lore, .. } => lore,
            GenerationRequest::Quest { lore, .. } => lore,
        }
    }

    /// The wire discriminant for this variant.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationRequest::Dialogue { .. } => "dialogue",
            GenerationRequest::Quest { .. } => "quest",
        }
    }
}
