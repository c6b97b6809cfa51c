use scene_scripter::generation::{
    backend::{DEMO_GENERATED_SCENE, MockBackend},
    error::GenerationError,
    generation_model::{GeneratedElementKind, GeneratedScene, ScriptBlock},
    prompts::{GENERATE_PROMPT_NAME, REGENERATE_PROMPT_NAME},
    scene_generator::{SceneGenerator, parse_structured_output},
};

use crate::common::{GENERATED_JSON, REGENERATED_JSON, RecordingBackend};

mod common;

// =========================================================================
// Successful calls
// =========================================================================

#[test]
fn generate_parses_structured_output() {
    let generator = SceneGenerator::new(Box::new(RecordingBackend::answering(GENERATED_JSON)));
    let scene = generator.generate("Tense mystery").unwrap();

    assert_eq!(scene.scene_title, "INT. DINER - NIGHT");
    assert_eq!(scene.characters.len(), 2);
    assert_eq!(scene.script_elements[0].kind, GeneratedElementKind::SceneHeading);
}

#[test]
fn regenerate_parses_tagged_blocks() {
    let generator = SceneGenerator::new(Box::new(RecordingBackend::answering(REGENERATED_JSON)));
    let scene = generator.regenerate("Tense mystery").unwrap();

    assert_eq!(scene.character_list, vec!["Joe", "Stranger"]);
    assert_eq!(
        scene.script_blocks[1],
        ScriptBlock::Dialogue {
            character: "Joe".into(),
            content: "Who's there?".into(),
        }
    );
    assert!(matches!(scene.script_blocks[0], ScriptBlock::Camera { .. }));
}

#[test]
fn generate_request_carries_mood_as_typed_and_schema() {
    let backend = RecordingBackend::answering(GENERATED_JSON);
    let generator = SceneGenerator::new(Box::new(backend.clone()));
    generator.generate("  Romantic drama ").unwrap();

    let requests = backend.requests.borrow();
    let request = &requests[0];
    assert_eq!(request.name, GENERATE_PROMPT_NAME);
    assert!(request.prompt.ends_with("Mood/Theme:   Romantic drama "));

    let required = request.output_schema["required"].as_array().unwrap();
    assert!(required.iter().any(|f| *f == "scriptElements"));
    let kinds = request.output_schema["properties"]["scriptElements"]["items"]["properties"]["type"]["enum"]
        .as_array()
        .unwrap();
    assert_eq!(kinds.len(), 6);
}

#[test]
fn regenerate_request_uses_block_schema() {
    let backend = RecordingBackend::answering(REGENERATED_JSON);
    let generator = SceneGenerator::new(Box::new(backend.clone()));
    generator.regenerate("Noir").unwrap();

    let requests = backend.requests.borrow();
    assert_eq!(requests[0].name, REGENERATE_PROMPT_NAME);
    let variants = requests[0].output_schema["properties"]["scriptBlocks"]["items"]["anyOf"]
        .as_array()
        .unwrap();
    assert_eq!(variants.len(), 3);
}

#[test]
fn code_fenced_output_is_accepted() {
    let fenced = format!("```json\n{}\n```", GENERATED_JSON);
    let scene: GeneratedScene = parse_structured_output("test", &fenced).unwrap();
    assert_eq!(scene.estimated_runtime, "2 minutes");
}

#[test]
fn mock_backend_answers_both_prompts() {
    let generator = SceneGenerator::new(Box::new(MockBackend::new()));
    assert!(generator.generate("anything").is_ok());
    assert!(generator.regenerate("anything").is_ok());
}

// =========================================================================
// Failures (fail closed)
// =========================================================================

#[test]
fn empty_mood_never_calls_backend() {
    let backend = RecordingBackend::answering(GENERATED_JSON);
    let generator = SceneGenerator::new(Box::new(backend.clone()));

    let err = generator.generate("   ").unwrap_err();
    assert!(matches!(err, GenerationError::EmptyMood));
    assert_eq!(backend.calls(), 0);
}

#[test]
fn no_output_is_a_failure() {
    let generator = SceneGenerator::new(Box::new(MockBackend::failing()));
    let err = generator.generate("Noir").unwrap_err();
    assert!(matches!(err, GenerationError::NoOutput { .. }));
}

#[test]
fn blank_output_is_a_failure() {
    let err = parse_structured_output::<GeneratedScene>("test", "  \n ").unwrap_err();
    assert!(matches!(err, GenerationError::NoOutput { .. }));
}

#[test]
fn unknown_element_type_is_rejected() {
    let bad = GENERATED_JSON.replace("\"action\"", "\"montage\"");
    let generator = SceneGenerator::new(Box::new(RecordingBackend::answering(&bad)));

    let err = generator.generate("Noir").unwrap_err();
    assert!(matches!(err, GenerationError::InvalidOutput { .. }));
}

#[test]
fn missing_field_is_rejected() {
    let bad = r#"{ "sceneTitle": "INT. X - DAY", "estimatedRuntime": "1 minute" }"#;
    let err = parse_structured_output::<GeneratedScene>("test", bad).unwrap_err();
    assert!(matches!(err, GenerationError::InvalidOutput { .. }));
}

#[test]
fn generation_shape_does_not_pass_as_regeneration() {
    let generator = SceneGenerator::new(Box::new(MockBackend::with_responses(
        DEMO_GENERATED_SCENE,
        DEMO_GENERATED_SCENE,
    )));

    let err = generator.regenerate("Noir").unwrap_err();
    assert!(matches!(err, GenerationError::InvalidOutput { .. }));
}

#[test]
fn dialogue_block_without_speaker_is_rejected() {
    let bad = REGENERATED_JSON.replace(r#""character": "Joe", "#, "");
    let generator = SceneGenerator::new(Box::new(RecordingBackend::answering(&bad)));
    assert!(generator.regenerate("Noir").is_err());
}
