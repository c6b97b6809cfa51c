use serde::{Deserialize, Serialize};

// ============================================================================
// Wire shapes returned by the two structured prompt calls
// ============================================================================

/// Element tag used by the generation call (six-way taxonomy).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratedElementKind {
    SceneHeading,
    Action,
    Character,
    Dialogue,
    Parenthetical,
    Shot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedElement {
    #[serde(rename = "type")]
    pub kind: GeneratedElementKind,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedCharacter {
    pub name: String,
    pub description: String,
}

/// Response of the generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedScene {
    pub scene_title: String,
    pub estimated_runtime: String,
    pub setting_description: String,
    pub characters: Vec<GeneratedCharacter>,
    pub script_elements: Vec<GeneratedElement>,
}

/// Block emitted by the regeneration call (three-way taxonomy).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptBlock {
    /// A spoken line with its speaker
    Dialogue { character: String, content: String },

    /// Narrative description or scene direction
    Action { content: String },

    /// Camera direction (CLOSE UP, WIDE SHOT, ...)
    Camera { content: String },
}

/// Response of the regeneration call. Characters are bare names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegeneratedScene {
    pub scene_title: String,
    pub estimated_runtime: String,
    pub setting_description: String,
    pub character_list: Vec<String>,
    pub script_blocks: Vec<ScriptBlock>,
}
