use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::session::session::RequestKind;

/// One line of the request trace (JSONL).
#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub request: u64,

    pub kind: RequestKind,
    pub mood: String,

    pub outcome: String,

    pub scene_title: Option<String>,
    pub elements: Option<usize>,
    pub characters: Option<usize>,
    pub error: Option<String>,
}

impl TraceEvent {
    pub fn now(request: u64, kind: RequestKind, mood: &str) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            request,
            kind,
            mood: mood.to_string(),
            outcome: "pending".to_string(),
            scene_title: None,
            elements: None,
            characters: None,
            error: None,
        }
    }

    pub fn ready(mut self, scene_title: &str, elements: usize, characters: usize) -> Self {
        self.outcome = "ready".to_string();
        self.scene_title = Some(scene_title.to_string());
        self.elements = Some(elements);
        self.characters = Some(characters);
        self
    }

    pub fn failed(mut self, error: impl ToString) -> Self {
        self.outcome = "failed".to_string();
        self.error = Some(error.to_string());
        self
    }
}
