use serde_json::{Value, json};

// ============================================================================
// Prompt templates
// ============================================================================

pub const GENERATE_PROMPT_NAME: &str = "generateMovieSceneScript";
pub const REGENERATE_PROMPT_NAME: &str = "regenerateMovieSceneScript";

const MOOD_PLACEHOLDER: &str = "{mood}";

const GENERATE_TEMPLATE: &str = r#"You are a seasoned screenwriter and director. Write one professional movie scene for the mood or theme given below, formatted as a structured screenplay.

The scene must move through a complete cinematic arc:
1. Opening shot that establishes the place visually.
2. Introduction of the key characters in the spirit of the mood.
3. A clear conflict or inciting moment.
4. A climax where the tension peaks or resolves.
5. An ending shot that leaves an impression or sets up what comes next.

Produce:
- sceneTitle: a standard scene heading such as "INT. LOCATION - NIGHT".
- estimatedRuntime: a realistic duration such as "1-2 minutes".
- settingDescription: a vivid description of the environment and atmosphere.
- characters: every character in the scene, each with an ALL CAPS name and a short physical and personality description.
- scriptElements: the scene in order, each element with a "type" and "content":
  - "scene_heading" for location and time (INT. CAFE - DAY)
  - "action" for what happens, what characters do, sensory detail
  - "character" for the ALL CAPS name of whoever speaks next
  - "parenthetical" for tone or a small action while speaking, in parentheses, only between a character and their dialogue
  - "dialogue" for the spoken line
  - "shot" for camera directions (CLOSE UP - JOHN'S FACE, WIDE SHOT, TRACKING SHOT)

Open with a scene_heading. Keep standard screenplay order throughout and let the tension or emotion build according to the mood.

Respond with ONLY JSON matching the provided schema.

Mood/Theme: {mood}"#;

const REGENERATE_TEMPLATE: &str = r#"You are a professional screenwriter. Write a completely new, distinct take on a movie scene for the mood or theme given below. It must be cinematic and well structured: an opening shot, character introduction, conflict, climax and an ending shot.

Give an alternate interpretation with fresh dialogue, actions and camera directions. Use a variety of block types:
- "dialogue" blocks with the speaking "character" and the spoken "content"
- "action" blocks for actions and scene direction
- "camera" blocks for camera directions (CLOSE UP, WIDE SHOT, TRACKING SHOT)

Keep the estimated runtime a realistic range such as "1-2 minutes". List every character present in characterList.

Respond with ONLY JSON matching the provided schema.

Mood/Theme: {mood}"#;

pub fn render_generate_prompt(mood: &str) -> String {
    GENERATE_TEMPLATE.replace(MOOD_PLACEHOLDER, mood)
}

pub fn render_regenerate_prompt(mood: &str) -> String {
    REGENERATE_TEMPLATE.replace(MOOD_PLACEHOLDER, mood)
}

// ============================================================================
// JSON Schemas (sent as the structured output format)
// ============================================================================

pub fn generate_output_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "sceneTitle": { "type": "string" },
            "estimatedRuntime": { "type": "string" },
            "settingDescription": { "type": "string" },
            "characters": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "description": { "type": "string" }
                    },
                    "required": ["name", "description"]
                }
            },
            "scriptElements": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "type": {
                            "type": "string",
                            "enum": ["scene_heading", "action", "character", "dialogue", "parenthetical", "shot"]
                        },
                        "content": { "type": "string" }
                    },
                    "required": ["type", "content"]
                }
            }
        },
        "required": ["sceneTitle", "estimatedRuntime", "settingDescription", "characters", "scriptElements"]
    })
}

pub fn regenerate_output_schema() -> Value {
    let text_block = |tag: &str| {
        json!({
            "type": "object",
            "properties": {
                "type": { "type": "string", "const": tag },
                "content": { "type": "string" }
            },
            "required": ["type", "content"]
        })
    };

    json!({
        "type": "object",
        "properties": {
            "sceneTitle": { "type": "string" },
            "estimatedRuntime": { "type": "string" },
            "settingDescription": { "type": "string" },
            "characterList": {
                "type": "array",
                "items": { "type": "string" }
            },
            "scriptBlocks": {
                "type": "array",
                "items": {
                    "anyOf": [
                        {
                            "type": "object",
                            "properties": {
                                "type": { "type": "string", "const": "dialogue" },
                                "character": { "type": "string" },
                                "content": { "type": "string" }
                            },
                            "required": ["type", "character", "content"]
                        },
                        text_block("action"),
                        text_block("camera")
                    ]
                }
            }
        },
        "required": ["sceneTitle", "estimatedRuntime", "settingDescription", "characterList", "scriptBlocks"]
    })
}
