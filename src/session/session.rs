use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};

use crate::{
    export::clipboard::{ClipboardError, ClipboardSink, CopyNotice, copy_script},
    generation::{
        backend::MockBackend,
        error::GenerationError,
        generation_model::{GeneratedScene, RegeneratedScene},
        scene_generator::SceneGenerator,
    },
    script::{
        normalize::{normalize_generated, normalize_regenerated},
        script_model::{Character, Script},
    },
    trace::{logger::TraceLogger, trace::TraceEvent},
};

pub const EMPTY_MOOD_MESSAGE: &str = "Please enter a mood or theme to generate a script.";
pub const GENERATE_FAILED_MESSAGE: &str = "Failed to generate script. Please try again.";
pub const REGENERATE_FAILED_MESSAGE: &str = "Failed to regenerate script. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    Generate,
    Regenerate,
}

impl RequestKind {
    pub fn failure_message(&self) -> &'static str {
        match self {
            RequestKind::Generate => GENERATE_FAILED_MESSAGE,
            RequestKind::Regenerate => REGENERATE_FAILED_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Loading(RequestKind),
    Ready(Script),
    Failed(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// Mood/theme was empty or whitespace-only; nothing was sent
    #[error("{}", EMPTY_MOOD_MESSAGE)]
    EmptyMood,

    /// A request is already in flight
    #[error("a {0:?} request is already in progress")]
    Busy(RequestKind),

    /// The generation call failed; the state holds the user-facing message
    #[error("{}", .0.failure_message())]
    Failed(RequestKind),

    /// Copy requested with no script on screen
    #[error("there is no script to copy")]
    NoScript,

    #[error("copy failed: {0}")]
    Clipboard(String),
}

impl From<ClipboardError> for SessionError {
    fn from(e: ClipboardError) -> Self {
        SessionError::Clipboard(e.to_string())
    }
}

/// Raw answer of either call, before normalization.
#[derive(Debug, Clone)]
pub enum SceneDraft {
    Generated(GeneratedScene),
    Regenerated(RegeneratedScene),
}

/// A request that has been admitted and owns the loading state.
#[derive(Debug)]
pub struct PendingRequest {
    pub request: u64,
    pub kind: RequestKind,
    pub mood: String,
    /// Characters of the script being replaced; regeneration reuses their
    /// descriptions by name.
    pub previous_characters: Vec<Character>,
}

/// Orchestrates generate / regenerate / copy over one in-memory script.
///
/// State moves `Idle -> Loading -> Ready | Failed -> Loading -> ...`. At most
/// one request is in flight: `begin` refuses while loading.
pub struct Session {
    pub state: SessionState,
    mood: String,
    request: u64,
    generator: SceneGenerator,
}

impl Session {
    pub fn new(generator: SceneGenerator) -> Session {
        Session {
            state: SessionState::Idle,
            mood: String::new(),
            request: 0,
            generator,
        }
    }

    /// Session with the bundled demo scenes (no service needed)
    pub fn with_mock() -> Session {
        Session::new(SceneGenerator::new(Box::new(MockBackend::new())))
    }

    pub fn mood(&self) -> &str {
        &self.mood
    }

    /// Replace the mood text. Input is locked while a request is in flight.
    pub fn set_mood(&mut self, mood: &str) -> Result<(), SessionError> {
        if let SessionState::Loading(kind) = self.state {
            return Err(SessionError::Busy(kind));
        }
        self.mood = mood.to_string();
        Ok(())
    }

    /// Put a previously saved script on screen, e.g. before regenerating it.
    pub fn restore(&mut self, script: Script) -> Result<(), SessionError> {
        if let SessionState::Loading(kind) = self.state {
            return Err(SessionError::Busy(kind));
        }
        self.state = SessionState::Ready(script);
        Ok(())
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SessionState::Loading(_))
    }

    pub fn script(&self) -> Option<&Script> {
        match &self.state {
            SessionState::Ready(script) => Some(script),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            SessionState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Admit a request: validate the mood, clear the previous script and
    /// error, and enter `Loading`.
    ///
    /// An empty mood never reaches the generator. The validation message
    /// replaces any earlier error; a script on screen stays where it is.
    pub fn begin(&mut self, kind: RequestKind) -> Result<PendingRequest, SessionError> {
        if let SessionState::Loading(current) = self.state {
            return Err(SessionError::Busy(current));
        }

        if self.mood.trim().is_empty() {
            if !matches!(self.state, SessionState::Ready(_)) {
                self.state = SessionState::Failed(EMPTY_MOOD_MESSAGE.to_string());
            }
            return Err(SessionError::EmptyMood);
        }
        let mood = self.mood.clone();

        let previous_characters = self
            .script()
            .map(|s| s.characters().to_vec())
            .unwrap_or_default();

        self.request += 1;
        self.state = SessionState::Loading(kind);

        Ok(PendingRequest {
            request: self.request,
            kind,
            mood,
            previous_characters,
        })
    }

    /// Resolve an admitted request with the call's outcome.
    pub fn finish(
        &mut self,
        pending: PendingRequest,
        outcome: Result<SceneDraft, GenerationError>,
        tracer: &TraceLogger,
    ) -> Result<&Script, SessionError> {
        let trace = TraceEvent::now(pending.request, pending.kind, &pending.mood);

        match outcome {
            Ok(draft) => {
                let script = match draft {
                    SceneDraft::Generated(scene) => normalize_generated(scene),
                    SceneDraft::Regenerated(scene) => {
                        normalize_regenerated(scene, &pending.previous_characters)
                    }
                };

                info!(
                    request = pending.request,
                    kind = ?pending.kind,
                    title = script.scene_title(),
                    elements = script.elements().len(),
                    "script ready"
                );
                tracer.log(&trace.ready(
                    script.scene_title(),
                    script.elements().len(),
                    script.characters().len(),
                ));

                self.state = SessionState::Ready(script);
                self.script().ok_or(SessionError::NoScript)
            }
            Err(e) => {
                error!(request = pending.request, kind = ?pending.kind, error = %e, "request failed");
                tracer.log(&trace.failed(&e));

                self.state = SessionState::Failed(pending.kind.failure_message().to_string());
                Err(SessionError::Failed(pending.kind))
            }
        }
    }

    pub fn generate(&mut self, tracer: &TraceLogger) -> Result<&Script, SessionError> {
        let pending = self.begin(RequestKind::Generate)?;
        let outcome = self
            .generator
            .generate(&pending.mood)
            .map(SceneDraft::Generated);
        self.finish(pending, outcome, tracer)
    }

    pub fn regenerate(&mut self, tracer: &TraceLogger) -> Result<&Script, SessionError> {
        let pending = self.begin(RequestKind::Regenerate)?;
        let outcome = self
            .generator
            .regenerate(&pending.mood)
            .map(SceneDraft::Regenerated);
        self.finish(pending, outcome, tracer)
    }

    /// Copy the current script to the clipboard as plain text.
    pub fn copy(&self, clipboard: &mut dyn ClipboardSink) -> Result<CopyNotice, SessionError> {
        let script = self.script().ok_or(SessionError::NoScript)?;
        Ok(copy_script(script, clipboard)?)
    }
}
