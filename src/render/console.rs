use crate::render::view::{Alignment, BlockStyle, Emphasis, ScriptView, ViewBlock};

pub const PAGE_WIDTH: usize = 72;
const SPEECH_WIDTH: usize = 40;

// ============================================================================
// Console renderer: the on-screen view in a terminal
// ============================================================================

/// Render a script view for terminal output.
///
/// Headings are framed with `=`, body text is wrapped at the page width,
/// cues and dialogue are centered in a narrower column. Parentheticals are
/// wrapped in underscores to stand in for italics.
pub fn render_console(view: &ScriptView) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== {} ===\n", view.title));
    out.push_str(&format!("{}\n", view.runtime_label));
    for line in wrap(&view.setting, PAGE_WIDTH) {
        out.push_str(&format!("{}\n", line));
    }

    if !view.character_badges.is_empty() {
        let badges: Vec<String> = view
            .character_badges
            .iter()
            .map(|b| format!("[{}]", b))
            .collect();
        out.push_str(&format!("\nCharacters: {}\n", badges.join(" ")));
    }

    out.push_str(&format!("\n{}\n", "-".repeat(PAGE_WIDTH)));

    let mut previous: Option<BlockStyle> = None;
    for block in &view.blocks {
        if needs_gap(previous, block.style) {
            out.push('\n');
        }
        out.push_str(&render_block(block));
        previous = Some(block.style);
    }

    out
}

fn needs_gap(previous: Option<BlockStyle>, current: BlockStyle) -> bool {
    match (previous, current) {
        (None, _) => true,
        (Some(_), BlockStyle::Heading | BlockStyle::Body | BlockStyle::CharacterCue) => true,
        (Some(_), BlockStyle::Dialogue | BlockStyle::Parenthetical) => false,
    }
}

fn render_block(block: &ViewBlock) -> String {
    let text = match block.style.emphasis() {
        Emphasis::Bold => format!("== {} ==", block.text),
        Emphasis::Italic => format!("_{}_", block.text),
        Emphasis::Plain => block.text.clone(),
    };

    let width = match block.style {
        BlockStyle::Dialogue | BlockStyle::Parenthetical => SPEECH_WIDTH,
        _ => PAGE_WIDTH,
    };

    let mut out = String::new();
    for line in wrap(&text, width) {
        match block.style.alignment() {
            Alignment::Left => out.push_str(&line),
            Alignment::Center => out.push_str(&center(&line, PAGE_WIDTH)),
        }
        out.push('\n');
    }
    out
}

/// Greedy word wrap. Words longer than `width` get a line of their own.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn center(line: &str, width: usize) -> String {
    let len = line.chars().count();
    if len >= width {
        return line.to_string();
    }
    let pad = (width - len) / 2;
    format!("{}{}", " ".repeat(pad), line)
}
