use crate::generation::generation_model::{
    GeneratedElementKind, GeneratedScene, RegeneratedScene, ScriptBlock,
};
use crate::script::script_model::{Character, ElementKind, Script, ScriptElement};

/// Description given to regenerated characters with no earlier match.
pub const DEFAULT_CHARACTER_DESCRIPTION: &str = "A character in the scene.";

// ============================================================================
// Generation output -> Script
// ============================================================================

pub fn normalize_generated(scene: GeneratedScene) -> Script {
    let characters = scene
        .characters
        .into_iter()
        .map(|c| Character::new(c.name, c.description))
        .collect();

    let elements = scene
        .script_elements
        .into_iter()
        .map(|e| ScriptElement::new(element_kind(e.kind), e.content))
        .collect();

    Script::canonical(
        scene.scene_title,
        scene.estimated_runtime,
        scene.setting_description,
        characters,
        elements,
    )
}

fn element_kind(kind: GeneratedElementKind) -> ElementKind {
    match kind {
        GeneratedElementKind::SceneHeading => ElementKind::SceneHeading,
        GeneratedElementKind::Action => ElementKind::Action,
        GeneratedElementKind::Character => ElementKind::Character,
        GeneratedElementKind::Dialogue => ElementKind::Dialogue,
        GeneratedElementKind::Parenthetical => ElementKind::Parenthetical,
        GeneratedElementKind::Shot => ElementKind::Shot,
    }
}

// ============================================================================
// Regeneration output -> Script
// ============================================================================

/// Normalize a regenerated scene, carrying descriptions forward from the
/// characters of the script being regenerated away from.
pub fn normalize_regenerated(scene: RegeneratedScene, previous: &[Character]) -> Script {
    let elements = scene
        .script_blocks
        .into_iter()
        .flat_map(expand_block)
        .collect();

    let characters = scene
        .character_list
        .iter()
        .map(|name| resolve_character(name, previous))
        .collect();

    Script::canonical(
        scene.scene_title,
        scene.estimated_runtime,
        scene.setting_description,
        characters,
        elements,
    )
}

/// Expand one regeneration block into canonical elements.
///
/// A dialogue block becomes a character cue followed by the line; action
/// and camera blocks map one-to-one (camera -> shot).
pub fn expand_block(block: ScriptBlock) -> Vec<ScriptElement> {
    match block {
        ScriptBlock::Dialogue { character, content } => vec![
            ScriptElement::new(ElementKind::Character, character.to_uppercase()),
            ScriptElement::new(ElementKind::Dialogue, content),
        ],
        ScriptBlock::Action { content } => vec![ScriptElement::new(ElementKind::Action, content)],
        ScriptBlock::Camera { content } => vec![ScriptElement::new(ElementKind::Shot, content)],
    }
}

/// Reuse a previous character on name match, else synthesize a placeholder.
pub fn resolve_character(name: &str, previous: &[Character]) -> Character {
    previous
        .iter()
        .find(|c| c.same_as(name))
        .cloned()
        .unwrap_or_else(|| Character::new(name.to_uppercase(), DEFAULT_CHARACTER_DESCRIPTION))
}

// ============================================================================
// Shared rules
// ============================================================================

/// Prepend a heading built from the scene title unless the sequence already
/// opens with one.
pub fn ensure_scene_heading(mut elements: Vec<ScriptElement>, scene_title: &str) -> Vec<ScriptElement> {
    let opens_with_heading = elements
        .first()
        .is_some_and(|e| e.kind == ElementKind::SceneHeading);

    if !opens_with_heading {
        elements.insert(0, ScriptElement::scene_heading(scene_title));
    }
    elements
}

/// Same name under case-insensitive comparison is the same character;
/// the first occurrence wins.
pub(crate) fn dedupe_characters(characters: impl Iterator<Item = Character>) -> Vec<Character> {
    let mut out: Vec<Character> = Vec::new();
    for character in characters {
        if !out.iter().any(|c| c.same_as(&character.name)) {
            out.push(character);
        }
    }
    out
}
