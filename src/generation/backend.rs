use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::generation::error::GenerationError;
use crate::generation::prompts::{GENERATE_PROMPT_NAME, REGENERATE_PROMPT_NAME};

pub const DEFAULT_OLLAMA_ENDPOINT: &str = "http://localhost:11434/api/generate";
pub const DEFAULT_OLLAMA_MODEL: &str = "qwen2.5:1.5b";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

// ============================================================================
// StructuredPrompt trait: the boundary to the generation service
// ============================================================================

/// One structured prompt call: the rendered prompt and the JSON Schema the
/// answer must match.
#[derive(Debug, Clone)]
pub struct PromptRequest {
    pub name: String,
    pub prompt: String,
    pub output_schema: Value,
}

/// Sends a structured prompt and returns the raw JSON text of the answer.
///
/// Parsing into the typed shape happens in `SceneGenerator`, so every
/// backend fails closed the same way.
pub trait StructuredPrompt {
    fn call(&self, request: &PromptRequest) -> Result<String, GenerationError>;
}

// ============================================================================
// Ollama Backend
// ============================================================================

pub struct OllamaBackend {
    pub endpoint: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for OllamaBackend {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_OLLAMA_ENDPOINT.to_string(),
            model: DEFAULT_OLLAMA_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    format: &'a Value,
}

#[derive(Deserialize)]
struct OllamaResponse {
    #[serde(default)]
    response: String,
}

impl OllamaBackend {
    pub fn new(endpoint: &str, model: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            model: model.to_string(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl StructuredPrompt for OllamaBackend {
    fn call(&self, request: &PromptRequest) -> Result<String, GenerationError> {
        let body = OllamaRequest {
            model: &self.model,
            prompt: &request.prompt,
            stream: false,
            format: &request.output_schema,
        };

        debug!(
            prompt = %request.name,
            model = %self.model,
            endpoint = %self.endpoint,
            "sending structured prompt"
        );

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let response = client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let ollama_response: OllamaResponse = response
            .json()
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        if ollama_response.response.trim().is_empty() {
            return Err(GenerationError::NoOutput {
                prompt: request.name.clone(),
            });
        }

        debug!(
            prompt = %request.name,
            bytes = ollama_response.response.len(),
            "received structured output"
        );
        Ok(ollama_response.response)
    }
}

// ============================================================================
// Mock Backend (for testing and offline demos)
// ============================================================================

/// Canned responses keyed by prompt name. A prompt with no canned response
/// yields `NoOutput`.
pub struct MockBackend {
    responses: HashMap<String, String>,
}

impl MockBackend {
    /// Backend answering both prompts with the bundled demo scenes.
    pub fn new() -> Self {
        Self::with_responses(DEMO_GENERATED_SCENE, DEMO_REGENERATED_SCENE)
    }

    pub fn with_responses(generate: &str, regenerate: &str) -> Self {
        let mut responses = HashMap::new();
        responses.insert(GENERATE_PROMPT_NAME.to_string(), generate.to_string());
        responses.insert(REGENERATE_PROMPT_NAME.to_string(), regenerate.to_string());
        Self { responses }
    }

    /// Backend that never produces output.
    pub fn failing() -> Self {
        Self {
            responses: HashMap::new(),
        }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StructuredPrompt for MockBackend {
    fn call(&self, request: &PromptRequest) -> Result<String, GenerationError> {
        self.responses
            .get(&request.name)
            .cloned()
            .ok_or_else(|| GenerationError::NoOutput {
                prompt: request.name.clone(),
            })
    }
}

pub const DEMO_GENERATED_SCENE: &str = r#"{
  "sceneTitle": "INT. ABANDONED WAREHOUSE - NIGHT",
  "estimatedRuntime": "1-2 minutes",
  "settingDescription": "Rain hammers a corrugated roof. A single bulb swings over crates stacked like tombstones.",
  "characters": [
    { "name": "MARLOWE", "description": "A tired detective in a soaked trench coat." },
    { "name": "VERA", "description": "A smuggler with a steady hand and a nervous smile." }
  ],
  "scriptElements": [
    { "type": "scene_heading", "content": "INT. ABANDONED WAREHOUSE - NIGHT" },
    { "type": "shot", "content": "WIDE SHOT - the warehouse floor, water pooling under the bulb." },
    { "type": "action", "content": "MARLOWE steps out of the dark, gun low." },
    { "type": "character", "content": "MARLOWE" },
    { "type": "dialogue", "content": "You picked a lousy place to hide, Vera." },
    { "type": "character", "content": "VERA" },
    { "type": "parenthetical", "content": "(without turning)" },
    { "type": "dialogue", "content": "I didn't pick it. It picked me." },
    { "type": "action", "content": "The bulb flickers. When it steadies, Vera is holding the ledger." },
    { "type": "shot", "content": "CLOSE UP - the ledger, stamped with a city seal." }
  ]
}"#;

pub const DEMO_REGENERATED_SCENE: &str = r#"{
  "sceneTitle": "EXT. HARBOR PIER - DAWN",
  "estimatedRuntime": "1-2 minutes",
  "settingDescription": "Fog rolls over black water. Gulls circle a lone fishing boat.",
  "characterList": ["Marlowe", "Dock Hand"],
  "scriptBlocks": [
    { "type": "camera", "content": "TRACKING SHOT - along the pier through the fog." },
    { "type": "action", "content": "Marlowe waits at the end of the pier, collar up." },
    { "type": "dialogue", "character": "Dock Hand", "content": "Boat's late. Boat's never late." },
    { "type": "dialogue", "character": "Marlowe", "content": "Then somebody told it to be." },
    { "type": "camera", "content": "CLOSE UP - Marlowe's eyes on the horizon." }
  ]
}"#;
