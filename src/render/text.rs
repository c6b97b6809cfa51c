use crate::script::script_model::{ElementKind, Script};

const CUE_INDENT: &str = "    ";
const SPEECH_INDENT: &str = "        ";

// ============================================================================
// Plain-text screenplay export
// ============================================================================

/// Format a script as plain-text screenplay for clipboard export.
///
/// Produces output like:
/// ```text
/// INT. ROOM - DAY
///
/// Estimated Runtime: 1 minute
///
/// Setting: A bare room.
///
/// CHARACTERS:
/// - JOE: A tired detective.
///
/// ---
///
/// INT. ROOM - DAY
///
///     JOE
///         Hello.
/// ```
pub fn format_script_text(script: &Script) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n\n", script.scene_title()));
    out.push_str(&format!("Estimated Runtime: {}\n\n", script.estimated_runtime()));
    out.push_str(&format!("Setting: {}\n\n", script.setting_description()));
    out.push_str("CHARACTERS:\n");
    for character in script.characters() {
        out.push_str(&format!(
            "- {}: {}\n",
            character.display_name(),
            character.description
        ));
    }
    out.push_str("\n---\n\n");

    let mut previous: Option<ElementKind> = None;
    for element in script.elements() {
        match element.kind {
            ElementKind::SceneHeading => {
                out.push_str(&format!("{}\n\n", element.content.to_uppercase()));
            }
            ElementKind::Action | ElementKind::Shot => {
                out.push_str(&format!("{}\n\n", element.content));
            }
            ElementKind::Character => {
                // New speaker right after someone else's lines
                if previous.is_some_and(|k| k.is_speech()) {
                    out.push('\n');
                }
                out.push_str(&format!("{}{}\n", CUE_INDENT, element.content.to_uppercase()));
            }
            ElementKind::Dialogue | ElementKind::Parenthetical => {
                out.push_str(&format!("{}{}\n", SPEECH_INDENT, element.content));
            }
        }
        previous = Some(element.kind);
    }

    collapse_blank_lines(&out)
}

/// Collapse every run of three or more newlines to exactly two.
pub fn collapse_blank_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = 0usize;

    for c in text.chars() {
        if c == '\n' {
            run += 1;
            if run <= 2 {
                out.push(c);
            }
        } else {
            run = 0;
            out.push(c);
        }
    }
    out
}
