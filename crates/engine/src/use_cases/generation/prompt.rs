//! Prompt construction.
//!
//! Renders the instruction sent to the model: a fixed preamble, the
//! task-specific section with defaults substituted for absent fields, and
//! a literal description of the JSON schema the completion must match.
//! Pure and deterministic; the same request always yields the same text.

use questweaver_domain::{GenerationRequest, Personality};

const PREAMBLE: &str = "You are QuestWeaver, an expert AI assistant that generates structured RPG content.
- Always return STRICT JSON matching the requested schema exactly.
- Do not include markdown, code fences, or explanatory text.
- Keep output consistent with the game's lore and world-building.
- Create engaging, branching content that feels natural and immersive.
- Ensure dialogue flows naturally and quests have clear objectives.
";

const DEFAULT_NPC_NAME: &str = "Unknown";
const DEFAULT_SITUATION: &str = "General conversation";
const DEFAULT_LOCATION: &str = "Various";
const DEFAULT_OBJECTIVE: &str = "Assist locals";

/// Style directive injected for each personality.
fn personality_guide(personality: Personality) -> &'static str {
    match personality {
        Personality::Goofy => {
            "Use humor, puns, and lighthearted language. Include jokes and playful responses."
        }
        Personality::Serious => {
            "Use formal, grave language. Focus on important matters and urgent concerns."
        }
        Personality::Mysterious => {
            "Use cryptic language, hints, and secrets. Be vague but intriguing."
        }
        Personality::Aggressive => {
            "Use confrontational language, threats, and hostile responses."
        }
    }
}

/// Renders the full prompt for a validated request.
pub fn build_prompt(request: &GenerationRequest) -> String {
    match request {
        GenerationRequest::Dialogue {
            lore,
            npc_name,
            personality,
            situation,
        } => {
            let npc_name = npc_name.as_deref().unwrap_or(DEFAULT_NPC_NAME);
            let personality = personality.unwrap_or_default();
            let situation = situation.as_deref().unwrap_or(DEFAULT_SITUATION);

            format!(
                r#"{PREAMBLE}
Task: Generate an NPC dialogue tree with branching conversations.

NPC Name: {npc_name}
Personality: {personality} - {guide}
Situation: {situation}
Game Lore: {lore}

Requirements:
- Create 3-5 dialogue nodes with natural branching
- Each node should have 2-3 response options
- Use the NPC's personality consistently throughout
- Reference the game lore naturally in dialogue
- Include consequences for some choices
- Make dialogue feel authentic and engaging

Return JSON exactly matching this schema:
{{
  "type": "dialogue",
  "npcName": string,
  "dialogue": Array<{{"id": string, "text": string, "options": Array<{{"id": string, "text": string, "nextId"?: string, "consequence"?: string}}>}}>,
  "metadata": {{"personality": string, "mood": string, "difficulty": "Easy" | "Medium" | "Hard"}}
}}"#,
                guide = personality_guide(personality),
            )
        }
        GenerationRequest::Quest {
            lore,
            location,
            primary_objective,
        } => {
            let location = location.as_deref().unwrap_or(DEFAULT_LOCATION);
            let primary_objective = primary_objective.as_deref().unwrap_or(DEFAULT_OBJECTIVE);

            format!(
                r#"{PREAMBLE}
Task: Generate a compelling side quest with clear objectives.

Location: {location}
Primary Objective: {primary_objective}
Game Lore: {lore}

Requirements:
- Create 2-4 main objectives and 1-2 optional objectives
- Include meaningful rewards (experience, gold, items)
- Reference the game lore and location naturally
- Make objectives feel connected and progressive
- Include estimated duration and difficulty
- Create engaging quest description

Return JSON exactly matching this schema:
{{
  "type": "quest",
  "title": string,
  "description": string,
  "objectives": Array<{{"id": string, "description": string, "type": "main" | "optional", "reward"?: string}}>,
  "estimatedDuration": string,
  "difficulty": "Easy" | "Medium" | "Hard",
  "rewards": {{"experience": number, "gold": number, "items"?: string[]}}
}}"#,
            )
        }
    }
}
