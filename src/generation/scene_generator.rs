use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::generation::backend::{PromptRequest, StructuredPrompt};
use crate::generation::error::GenerationError;
use crate::generation::generation_model::{GeneratedScene, RegeneratedScene};
use crate::generation::prompts::{
    GENERATE_PROMPT_NAME, REGENERATE_PROMPT_NAME, generate_output_schema, regenerate_output_schema,
    render_generate_prompt, render_regenerate_prompt,
};

/// Runs the generation and regeneration prompts against a backend and
/// parses the answers into their typed shapes.
pub struct SceneGenerator {
    backend: Box<dyn StructuredPrompt>,
}

impl SceneGenerator {
    pub fn new(backend: Box<dyn StructuredPrompt>) -> Self {
        Self { backend }
    }

    pub fn generate(&self, mood: &str) -> Result<GeneratedScene, GenerationError> {
        let request = build_request(
            GENERATE_PROMPT_NAME,
            mood,
            render_generate_prompt,
            generate_output_schema(),
        )?;
        self.run(&request)
    }

    pub fn regenerate(&self, mood: &str) -> Result<RegeneratedScene, GenerationError> {
        let request = build_request(
            REGENERATE_PROMPT_NAME,
            mood,
            render_regenerate_prompt,
            regenerate_output_schema(),
        )?;
        self.run(&request)
    }

    fn run<T: DeserializeOwned>(&self, request: &PromptRequest) -> Result<T, GenerationError> {
        let raw = self.backend.call(request)?;
        parse_structured_output(&request.name, &raw)
    }
}

fn build_request(
    name: &str,
    mood: &str,
    render: fn(&str) -> String,
    output_schema: Value,
) -> Result<PromptRequest, GenerationError> {
    if mood.trim().is_empty() {
        return Err(GenerationError::EmptyMood);
    }

    // The mood goes into the prompt exactly as typed.
    let prompt = render(mood);
    debug!(prompt = name, chars = prompt.len(), "built prompt request");

    Ok(PromptRequest {
        name: name.to_string(),
        prompt,
        output_schema,
    })
}

/// Parse a model answer into `T`, failing closed on anything that does not
/// match. Markdown code fences around the JSON are tolerated.
pub fn parse_structured_output<T: DeserializeOwned>(
    prompt: &str,
    raw: &str,
) -> Result<T, GenerationError> {
    let body = strip_code_fence(raw);
    if body.is_empty() {
        return Err(GenerationError::NoOutput {
            prompt: prompt.to_string(),
        });
    }

    serde_json::from_str(body).map_err(|source| {
        warn!(prompt, error = %source, "structured output rejected");
        GenerationError::InvalidOutput {
            prompt: prompt.to_string(),
            source,
        }
    })
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop an optional language tag on the opening fence line.
    let rest = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}
