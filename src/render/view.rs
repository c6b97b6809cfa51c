use serde::Serialize;

use crate::script::script_model::{ElementKind, Script, ScriptElement};

// ============================================================================
// Structured view of a Script: what a screen shows, independent of medium
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BlockStyle {
    /// Scene heading: bold, upper-cased
    Heading,
    /// Action and shot lines
    Body,
    /// Speaker label: centered, upper-cased
    CharacterCue,
    /// Spoken line: centered
    Dialogue,
    /// Delivery note: centered, italic
    Parenthetical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Alignment {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Emphasis {
    Plain,
    Bold,
    Italic,
}

impl BlockStyle {
    pub fn alignment(&self) -> Alignment {
        match self {
            BlockStyle::Heading | BlockStyle::Body => Alignment::Left,
            BlockStyle::CharacterCue | BlockStyle::Dialogue | BlockStyle::Parenthetical => {
                Alignment::Center
            }
        }
    }

    pub fn emphasis(&self) -> Emphasis {
        match self {
            BlockStyle::Heading => Emphasis::Bold,
            BlockStyle::Parenthetical => Emphasis::Italic,
            _ => Emphasis::Plain,
        }
    }

    /// CSS class used by the HTML renderer.
    pub fn css_class(&self) -> &'static str {
        match self {
            BlockStyle::Heading => "heading",
            BlockStyle::Body => "body",
            BlockStyle::CharacterCue => "cue",
            BlockStyle::Dialogue => "dialogue",
            BlockStyle::Parenthetical => "parenthetical",
        }
    }
}

/// One labeled visual block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewBlock {
    pub style: BlockStyle,
    pub text: String,
}

/// Everything a renderer needs to draw one script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptView {
    pub title: String,
    pub runtime_label: String,
    pub setting: String,
    pub character_badges: Vec<String>,
    pub blocks: Vec<ViewBlock>,
}

/// Map one element to its visual block. Kept in step with the plain-text
/// layout in `render::text`.
pub fn view_block(element: &ScriptElement) -> ViewBlock {
    let (style, text) = match element.kind {
        ElementKind::SceneHeading => (BlockStyle::Heading, element.content.to_uppercase()),
        ElementKind::Action | ElementKind::Shot => (BlockStyle::Body, element.content.clone()),
        ElementKind::Character => (BlockStyle::CharacterCue, element.content.to_uppercase()),
        ElementKind::Dialogue => (BlockStyle::Dialogue, element.content.clone()),
        ElementKind::Parenthetical => (BlockStyle::Parenthetical, element.content.clone()),
    };
    ViewBlock { style, text }
}

pub fn build_view(script: &Script) -> ScriptView {
    ScriptView {
        title: script.scene_title().to_string(),
        runtime_label: format!("Estimated runtime: {}", script.estimated_runtime()),
        setting: script.setting_description().to_string(),
        character_badges: script
            .characters()
            .iter()
            .map(|c| c.display_name())
            .collect(),
        blocks: script.elements().iter().map(view_block).collect(),
    }
}
