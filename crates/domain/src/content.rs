//! Generated content results.
//!
//! These are the strict output schemas the coercers normalize model output
//! into. Wire names are camelCase to match the public API contract.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Content difficulty rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Parses the wire form; anything other than the three exact names is
    /// rejected (coercers substitute [`Difficulty::Medium`]).
    pub fn parse(value: &str) -> Option<Difficulty> {
        match value {
            "Easy" => Some(Difficulty::Easy),
            "Medium" => Some(Difficulty::Medium),
            "Hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selectable response within a dialogue node.
///
/// `next_id` should reference another node's id but referential integrity
/// is not enforced; renderers treat unresolvable references as
/// end-of-conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueOption {
    pub id: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consequence: Option<String>,
}

/// A single NPC utterance with its branching options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueNode {
    pub id: String,
    pub text: String,
    pub options: Vec<DialogueOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueMetadata {
    pub personality: String,
    pub mood: String,
    pub difficulty: Difficulty,
}

/// A normalized dialogue tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueResult {
    pub npc_name: String,
    pub dialogue: Vec<DialogueNode>,
    pub metadata: DialogueMetadata,
}

/// Whether an objective is required to complete the quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuestObjectiveKind {
    #[default]
    Main,
    Optional,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestObjective {
    pub id: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: QuestObjectiveKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestRewards {
    pub experience: u32,
    pub gold: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>,
}

/// A normalized side quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestResult {
    pub title: String,
    pub description: String,
    pub objectives: Vec<QuestObjective>,
    pub estimated_duration: String,
    pub difficulty: Difficulty,
    pub rewards: QuestRewards,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_parse_is_exact() {
        assert_eq!(Difficulty::parse("Hard"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::parse("hard"), None);
        assert_eq!(Difficulty::parse("Impossible"), None);
    }

    #[test]
    fn dialogue_result_serializes_camel_case() {
        let result = DialogueResult {
            npc_name: "Mira Stoneveil".into(),
            dialogue: vec![DialogueNode {
                id: "node_1".into(),
                text: "The forge stirs.".into(),
                options: vec![DialogueOption {
                    id: "opt_1".into(),
                    text: "Tell me more.".into(),
                    next_id: Some("node_2".into()),
                    consequence: None,
                }],
            }],
            metadata: DialogueMetadata {
                personality: "Serious".into(),
                mood: "Grave".into(),
                difficulty: Difficulty::Medium,
            },
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["npcName"], "Mira Stoneveil");
        assert_eq!(json["dialogue"][0]["options"][0]["nextId"], "node_2");
        assert_eq!(json["metadata"]["difficulty"], "Medium");
        // Absent optionals are omitted, not null
        assert!(json["dialogue"][0]["options"][0]
            .as_object()
            .unwrap()
            .get("consequence")
            .is_none());
    }

    #[test]
    fn quest_objective_kind_uses_type_field() {
        let objective = QuestObjective {
            id: "obj_1".into(),
            description: "Reach the tunnels".into(),
            kind: QuestObjectiveKind::Optional,
            reward: Some("50 gold".into()),
        };
        let json = serde_json::to_value(&objective).unwrap();
        assert_eq!(json["type"], "optional");
    }

    #[test]
    fn quest_result_round_trips() {
        let quest = QuestResult {
            title: "Ember Core Retrieval".into(),
            description: "Stabilize the city's forges.".into(),
            objectives: vec![],
            estimated_duration: "30-60 minutes".into(),
            difficulty: Difficulty::Hard,
            rewards: QuestRewards {
                experience: 100,
                gold: 25,
                items: None,
            },
        };
        let json = serde_json::to_string(&quest).unwrap();
        let back: QuestResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, quest);
    }
}
