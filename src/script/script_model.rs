use serde::{Deserialize, Serialize};

use crate::script::normalize::{dedupe_characters, ensure_scene_heading};

// ============================================================================
// Canonical screenplay model shared by both generation paths
// ============================================================================

/// Kind of a single screenplay element.
///
/// The legacy `camera` tag is read as `Shot`: both mean a camera direction,
/// and only one kind flows through rendering and export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    SceneHeading,
    Action,
    Character,
    Dialogue,
    Parenthetical,
    #[serde(alias = "camera")]
    Shot,
}

impl ElementKind {
    /// Dialogue and parentheticals belong to the speaker block above them.
    pub fn is_speech(&self) -> bool {
        matches!(self, ElementKind::Dialogue | ElementKind::Parenthetical)
    }
}

/// One typed unit of screenplay content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptElement {
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub content: String,
}

impl ScriptElement {
    pub fn new(kind: ElementKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }

    pub fn scene_heading(content: impl Into<String>) -> Self {
        Self::new(ElementKind::SceneHeading, content)
    }
}

/// A character in the scene. Identity is the name, compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub description: String,
}

impl Character {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Name as shown in cues, badges and the export header.
    pub fn display_name(&self) -> String {
        self.name.to_uppercase()
    }

    pub fn same_as(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// One generated screenplay scene.
///
/// Built by normalization (or loaded from a saved export) and never mutated
/// afterwards: a regeneration produces a new `Script`. Loading goes through
/// `Script::canonical`, so a hand-edited file cannot drop the opening heading
/// or repeat a character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "SavedScript")]
pub struct Script {
    scene_title: String,
    estimated_runtime: String,
    setting_description: String,
    characters: Vec<Character>,
    script_elements: Vec<ScriptElement>,
}

impl Script {
    pub fn new(
        scene_title: impl Into<String>,
        estimated_runtime: impl Into<String>,
        setting_description: impl Into<String>,
        characters: Vec<Character>,
        script_elements: Vec<ScriptElement>,
    ) -> Self {
        Self {
            scene_title: scene_title.into(),
            estimated_runtime: estimated_runtime.into(),
            setting_description: setting_description.into(),
            characters,
            script_elements,
        }
    }

    /// Build a script under the canonical rules: the elements open with a
    /// scene heading and characters are unique by case-insensitive name.
    pub fn canonical(
        scene_title: impl Into<String>,
        estimated_runtime: impl Into<String>,
        setting_description: impl Into<String>,
        characters: Vec<Character>,
        script_elements: Vec<ScriptElement>,
    ) -> Self {
        let scene_title = scene_title.into();
        let script_elements = ensure_scene_heading(script_elements, &scene_title);
        Self::new(
            scene_title,
            estimated_runtime,
            setting_description,
            dedupe_characters(characters.into_iter()),
            script_elements,
        )
    }

    pub fn scene_title(&self) -> &str {
        &self.scene_title
    }

    pub fn estimated_runtime(&self) -> &str {
        &self.estimated_runtime
    }

    pub fn setting_description(&self) -> &str {
        &self.setting_description
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn elements(&self) -> &[ScriptElement] {
        &self.script_elements
    }

    /// Case-insensitive character lookup.
    pub fn character(&self, name: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.same_as(name))
    }

    /// Count of elements of one kind.
    pub fn count_of(&self, kind: ElementKind) -> usize {
        self.script_elements.iter().filter(|e| e.kind == kind).count()
    }
}

/// On-disk shape of a saved script.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SavedScript {
    scene_title: String,
    estimated_runtime: String,
    setting_description: String,
    characters: Vec<Character>,
    script_elements: Vec<ScriptElement>,
}

impl From<SavedScript> for Script {
    fn from(saved: SavedScript) -> Self {
        Script::canonical(
            saved.scene_title,
            saved.estimated_runtime,
            saved.setting_description,
            saved.characters,
            saved.script_elements,
        )
    }
}
