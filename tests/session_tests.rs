use std::io::{BufRead, BufReader};

use scene_scripter::{
    export::clipboard::{MemoryClipboard, copy_script},
    generation::{
        backend::{DEMO_GENERATED_SCENE, MockBackend},
        error::GenerationError,
        scene_generator::SceneGenerator,
    },
    render::text::format_script_text,
    script::{normalize::DEFAULT_CHARACTER_DESCRIPTION, script_model::ElementKind},
    session::session::{
        EMPTY_MOOD_MESSAGE, GENERATE_FAILED_MESSAGE, REGENERATE_FAILED_MESSAGE, RequestKind,
        SceneDraft, Session, SessionError, SessionState,
    },
    trace::logger::TraceLogger,
};

use crate::common::{GENERATED_JSON, RecordingBackend, interrogation_script};

mod common;

// =========================================================================
// Helpers
// =========================================================================

fn mock_session(mood: &str) -> Session {
    let mut session = Session::with_mock();
    session.set_mood(mood).unwrap();
    session
}

fn quiet() -> TraceLogger {
    TraceLogger::disabled()
}

// =========================================================================
// Generate / regenerate flow
// =========================================================================

#[test]
fn new_session_is_idle() {
    let session = Session::with_mock();
    assert_eq!(session.state, SessionState::Idle);
    assert!(session.script().is_none());
    assert!(session.error_message().is_none());
}

#[test]
fn generate_reaches_ready_with_heading_first() {
    let mut session = mock_session("Tense mystery");
    let script = session.generate(&quiet()).unwrap();

    assert!(!script.elements().is_empty());
    assert_eq!(script.elements()[0].kind, ElementKind::SceneHeading);
    assert!(matches!(session.state, SessionState::Ready(_)));
}

#[test]
fn regenerate_carries_descriptions_forward_by_name() {
    let mut session = mock_session("Noir");
    session.generate(&quiet()).unwrap();

    let script = session.regenerate(&quiet()).unwrap();
    let marlowe = script.character("Marlowe").unwrap();
    assert_eq!(marlowe.description, "A tired detective in a soaked trench coat.");

    let dock_hand = script.character("dock hand").unwrap();
    assert_eq!(dock_hand.name, "DOCK HAND");
    assert_eq!(dock_hand.description, DEFAULT_CHARACTER_DESCRIPTION);
}

#[test]
fn regenerate_without_previous_script_uses_placeholders() {
    let mut session = mock_session("Noir");
    let script = session.regenerate(&quiet()).unwrap();

    assert!(
        script
            .characters()
            .iter()
            .all(|c| c.description == DEFAULT_CHARACTER_DESCRIPTION)
    );
}

#[test]
fn restored_script_feeds_regeneration() {
    let mut session = Session::new(SceneGenerator::new(Box::new(RecordingBackend::answering(
        common::REGENERATED_JSON,
    ))));
    session.restore(interrogation_script()).unwrap();
    session.set_mood("Noir").unwrap();

    let script = session.regenerate(&quiet()).unwrap();
    assert_eq!(script.character("JOE").unwrap().description, "A tired detective.");
}

// =========================================================================
// Validation
// =========================================================================

#[test]
fn empty_mood_is_rejected_locally() {
    let backend = RecordingBackend::answering(GENERATED_JSON);
    let mut session = Session::new(SceneGenerator::new(Box::new(backend.clone())));
    session.set_mood("  \t ").unwrap();

    let err = session.generate(&quiet()).unwrap_err();
    assert_eq!(err, SessionError::EmptyMood);
    assert_eq!(err.to_string(), EMPTY_MOOD_MESSAGE);
    assert_eq!(backend.calls(), 0);
    assert_eq!(session.error_message(), Some(EMPTY_MOOD_MESSAGE));
}

#[test]
fn empty_mood_replaces_earlier_failure_message() {
    let mut session = Session::with_mock();
    session.state = SessionState::Failed(GENERATE_FAILED_MESSAGE.to_string());
    session.set_mood(" ").unwrap();

    assert_eq!(session.regenerate(&quiet()).unwrap_err(), SessionError::EmptyMood);
    assert_eq!(session.error_message(), Some(EMPTY_MOOD_MESSAGE));
}

#[test]
fn mood_reaches_prompt_untrimmed() {
    let backend = RecordingBackend::answering(GENERATED_JSON);
    let mut session = Session::new(SceneGenerator::new(Box::new(backend.clone())));
    session.set_mood("  Quiet dread\t").unwrap();
    session.generate(&quiet()).unwrap();

    assert!(backend.requests.borrow()[0].prompt.ends_with("Mood/Theme:   Quiet dread\t"));
}

#[test]
fn empty_mood_keeps_current_script() {
    let mut session = mock_session("Noir");
    session.generate(&quiet()).unwrap();
    session.set_mood("").unwrap();

    assert_eq!(session.regenerate(&quiet()).unwrap_err(), SessionError::EmptyMood);
    assert!(session.script().is_some());
}

// =========================================================================
// Failures
// =========================================================================

#[test]
fn failed_generate_sets_fixed_message() {
    let mut session = Session::new(SceneGenerator::new(Box::new(MockBackend::failing())));
    session.set_mood("Noir").unwrap();

    let err = session.generate(&quiet()).unwrap_err();
    assert_eq!(err, SessionError::Failed(RequestKind::Generate));
    assert_eq!(err.to_string(), GENERATE_FAILED_MESSAGE);
    assert_eq!(session.error_message(), Some(GENERATE_FAILED_MESSAGE));
    assert!(session.script().is_none());
}

#[test]
fn failed_regenerate_discards_previous_script() {
    let mut session = Session::new(SceneGenerator::new(Box::new(MockBackend::with_responses(
        DEMO_GENERATED_SCENE,
        "{ not json",
    ))));
    session.set_mood("Noir").unwrap();
    session.generate(&quiet()).unwrap();

    let err = session.regenerate(&quiet()).unwrap_err();
    assert_eq!(err.to_string(), REGENERATE_FAILED_MESSAGE);
    assert_eq!(
        session.state,
        SessionState::Failed(REGENERATE_FAILED_MESSAGE.to_string())
    );
}

#[test]
fn next_request_clears_previous_error() {
    let mut session = Session::with_mock();
    session.set_mood("Noir").unwrap();
    session.state = SessionState::Failed(GENERATE_FAILED_MESSAGE.to_string());

    session.generate(&quiet()).unwrap();
    assert!(session.error_message().is_none());
}

// =========================================================================
// Single request in flight
// =========================================================================

#[test]
fn begin_clears_script_and_enters_loading() {
    let mut session = mock_session("Noir");
    session.generate(&quiet()).unwrap();

    let pending = session.begin(RequestKind::Regenerate).unwrap();
    assert_eq!(session.state, SessionState::Loading(RequestKind::Regenerate));
    assert!(session.script().is_none());
    assert_eq!(pending.previous_characters.len(), 2);
}

#[test]
fn second_request_while_loading_is_refused() {
    let mut session = mock_session("Noir");
    let pending = session.begin(RequestKind::Generate).unwrap();

    assert_eq!(
        session.begin(RequestKind::Regenerate).unwrap_err(),
        SessionError::Busy(RequestKind::Generate)
    );
    assert_eq!(
        session.set_mood("Comedy").unwrap_err(),
        SessionError::Busy(RequestKind::Generate)
    );
    assert!(session.restore(interrogation_script()).is_err());

    let outcome = Err(GenerationError::NoOutput {
        prompt: "test".into(),
    });
    assert!(session.finish(pending, outcome, &quiet()).is_err());
    assert!(!session.is_loading());
    assert!(session.begin(RequestKind::Generate).is_ok());
}

#[test]
fn finish_normalizes_draft() {
    let mut session = mock_session("Noir");
    let pending = session.begin(RequestKind::Generate).unwrap();
    let scene = serde_json::from_str(GENERATED_JSON).unwrap();

    let script = session
        .finish(pending, Ok(SceneDraft::Generated(scene)), &quiet())
        .unwrap();
    assert_eq!(script.scene_title(), "INT. DINER - NIGHT");
}

// =========================================================================
// Copy
// =========================================================================

#[test]
fn copy_writes_plain_text_and_confirms() {
    let mut session = mock_session("Noir");
    session.generate(&quiet()).unwrap();
    let mut clipboard = MemoryClipboard::default();

    let notice = session.copy(&mut clipboard).unwrap();
    assert_eq!(notice.title, "Script Copied!");
    assert_eq!(
        notice.description,
        "The formatted script has been copied to your clipboard."
    );

    let expected = format_script_text(session.script().unwrap());
    assert_eq!(clipboard.contents.as_deref(), Some(expected.as_str()));
}

#[test]
fn copy_without_script_fails() {
    let session = Session::with_mock();
    let mut clipboard = MemoryClipboard::default();

    assert_eq!(session.copy(&mut clipboard).unwrap_err(), SessionError::NoScript);
    assert!(clipboard.contents.is_none());
}

#[test]
fn copy_script_uses_export_format() {
    let mut clipboard = MemoryClipboard::default();
    copy_script(&interrogation_script(), &mut clipboard).unwrap();
    assert!(clipboard.contents.unwrap().starts_with("INT. ROOM - DAY\n\nEstimated Runtime"));
}

// =========================================================================
// Request trace
// =========================================================================

#[test]
fn requests_are_traced_as_jsonl() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trace.jsonl");
    let tracer = TraceLogger::new(path.to_str().unwrap());
    assert!(tracer.is_enabled());

    let mut session = mock_session("Noir");
    session.generate(&tracer).unwrap();
    let mut failing = Session::new(SceneGenerator::new(Box::new(MockBackend::failing())));
    failing.set_mood("Noir").unwrap();
    let _ = failing.regenerate(&tracer);

    let file = std::fs::File::open(&path).unwrap();
    let events: Vec<serde_json::Value> = BufReader::new(file)
        .lines()
        .map(|l| serde_json::from_str(&l.unwrap()).unwrap())
        .collect();

    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["kind"], "generate");
    assert_eq!(events[0]["outcome"], "ready");
    assert_eq!(events[0]["scene_title"], "INT. ABANDONED WAREHOUSE - NIGHT");
    assert_eq!(events[1]["kind"], "regenerate");
    assert_eq!(events[1]["outcome"], "failed");
    assert!(events[1]["error"].as_str().unwrap().contains("no output"));
}
