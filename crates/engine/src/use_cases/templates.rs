//! Demo template catalog.
//!
//! A fixed set of example generation requests around the Emberreach
//! setting, served so the UI can offer one-click starting points. Static
//! data, no persistence.

use serde::Serialize;

/// An example request a client can submit as-is.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: TemplateData,
}

/// The request body fields for a template.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateData {
    pub game_lore: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub npc_name: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub npc_personality: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub situation: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_objective: Option<&'static str>,
}

const EMBERREACH_LORE: &str = "The city of Emberreach was built atop ancient lava tunnels. \
The Ember Core, a relic that stabilizes the city's forges, is weakening. Guilds compete for \
influence, and the Night Wardens patrol shadowed alleys. Magic is regulated; contraband \
runes circulate in the black market.";

const fn dialogue_data(
    npc_name: &'static str,
    npc_personality: &'static str,
    situation: &'static str,
) -> TemplateData {
    TemplateData {
        game_lore: EMBERREACH_LORE,
        npc_name: Some(npc_name),
        npc_personality: Some(npc_personality),
        situation: Some(situation),
        location: None,
        primary_objective: None,
    }
}

const fn quest_data(location: &'static str, primary_objective: &'static str) -> TemplateData {
    TemplateData {
        game_lore: EMBERREACH_LORE,
        npc_name: None,
        npc_personality: None,
        situation: None,
        location: Some(location),
        primary_objective: Some(primary_objective),
    }
}

const DEMO_TEMPLATES: &[DemoTemplate] = &[
    DemoTemplate {
        id: "blacksmith-dialogue",
        name: "Blacksmith's Warning",
        description: "A serious blacksmith warns about an ancient forge awakening",
        kind: "dialogue",
        data: dialogue_data(
            "Mira Stoneveil",
            "Serious",
            "The blacksmith warns about an ancient forge awakening beneath the city",
        ),
    },
    DemoTemplate {
        id: "mysterious-merchant",
        name: "Mysterious Merchant",
        description: "A cryptic merchant offers dangerous deals",
        kind: "dialogue",
        data: dialogue_data(
            "Zara the Veiled",
            "Mysterious",
            "A hooded merchant offers rare magical items at suspiciously low prices",
        ),
    },
    DemoTemplate {
        id: "goofy-innkeeper",
        name: "Goofy Innkeeper",
        description: "A cheerful innkeeper shares local gossip",
        kind: "dialogue",
        data: dialogue_data(
            "Bartholomew Bright",
            "Goofy",
            "The innkeeper shares humorous stories about local characters",
        ),
    },
    DemoTemplate {
        id: "ember-core-quest",
        name: "Ember Core Quest",
        description: "Retrieve the unstable Ember Core from lava tunnels",
        kind: "quest",
        data: quest_data(
            "Emberreach Lava Tunnels",
            "Retrieve the unstable Ember Core before it causes a catastrophic eruption",
        ),
    },
    DemoTemplate {
        id: "night-warden-quest",
        name: "Night Warden Investigation",
        description: "Help the Night Wardens investigate contraband runes",
        kind: "quest",
        data: quest_data(
            "Emberreach Market District",
            "Investigate the source of illegal magical runes circulating in the black market",
        ),
    },
    DemoTemplate {
        id: "guild-conflict",
        name: "Guild Conflict",
        description: "Navigate tensions between competing guilds",
        kind: "dialogue",
        data: dialogue_data(
            "Captain Thorne",
            "Aggressive",
            "A guild captain demands support in their conflict with rival guilds",
        ),
    },
];

/// The full catalog, optionally filtered by discriminant. An unknown
/// filter value returns the full catalog rather than an error; the
/// endpoint always answers 200.
pub fn demo_templates(kind: Option<&str>) -> Vec<&'static DemoTemplate> {
    match kind {
        Some(kind @ ("dialogue" | "quest")) => DEMO_TEMPLATES
            .iter()
            .filter(|t| t.kind == kind)
            .collect(),
        _ => DEMO_TEMPLATES.iter().collect(),
    }
}
