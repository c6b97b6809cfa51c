#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use scene_scripter::generation::backend::{PromptRequest, StructuredPrompt};
use scene_scripter::generation::error::GenerationError;
use scene_scripter::script::script_model::{Character, ElementKind, Script, ScriptElement};

// =========================================================================
// Script fixtures
// =========================================================================

pub fn interrogation_script() -> Script {
    Script::new(
        "INT. ROOM - DAY",
        "1 minute",
        "A bare room.",
        vec![Character::new("Joe", "A tired detective.")],
        vec![
            ScriptElement::new(ElementKind::SceneHeading, "int. room - day"),
            ScriptElement::new(ElementKind::Action, "Joe sits."),
            ScriptElement::new(ElementKind::Character, "joe"),
            ScriptElement::new(ElementKind::Dialogue, "Hello."),
            ScriptElement::new(ElementKind::Character, "anna"),
            ScriptElement::new(ElementKind::Parenthetical, "(quietly)"),
            ScriptElement::new(ElementKind::Dialogue, "Hi."),
            ScriptElement::new(ElementKind::Shot, "CLOSE UP - Joe."),
        ],
    )
}

pub const GENERATED_JSON: &str = r#"{
  "sceneTitle": "INT. DINER - NIGHT",
  "estimatedRuntime": "2 minutes",
  "settingDescription": "Neon hums over empty booths.",
  "characters": [
    { "name": "JOE", "description": "A tired detective." },
    { "name": "MAE", "description": "The night waitress." }
  ],
  "scriptElements": [
    { "type": "scene_heading", "content": "INT. DINER - NIGHT" },
    { "type": "action", "content": "Joe stirs cold coffee." },
    { "type": "character", "content": "MAE" },
    { "type": "dialogue", "content": "Refill?" }
  ]
}"#;

pub const REGENERATED_JSON: &str = r#"{
  "sceneTitle": "EXT. ALLEY - NIGHT",
  "estimatedRuntime": "1-2 minutes",
  "settingDescription": "Rain and steam.",
  "characterList": ["Joe", "Stranger"],
  "scriptBlocks": [
    { "type": "camera", "content": "WIDE SHOT - the alley." },
    { "type": "dialogue", "character": "Joe", "content": "Who's there?" },
    { "type": "action", "content": "A shadow moves." }
  ]
}"#;

// =========================================================================
// Test backends
// =========================================================================

/// Backend that records every request and answers with a fixed response.
#[derive(Clone)]
pub struct RecordingBackend {
    pub requests: Rc<RefCell<Vec<PromptRequest>>>,
    pub response: Option<String>,
}

impl RecordingBackend {
    pub fn answering(response: &str) -> Self {
        Self {
            requests: Rc::new(RefCell::new(Vec::new())),
            response: Some(response.to_string()),
        }
    }

    pub fn silent() -> Self {
        Self {
            requests: Rc::new(RefCell::new(Vec::new())),
            response: None,
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl StructuredPrompt for RecordingBackend {
    fn call(&self, request: &PromptRequest) -> Result<String, GenerationError> {
        self.requests.borrow_mut().push(request.clone());
        self.response.clone().ok_or_else(|| GenerationError::NoOutput {
            prompt: request.name.clone(),
        })
    }
}
