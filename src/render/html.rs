use crate::render::view::{BlockStyle, ScriptView};

// ============================================================================
// HTML renderer: self-contained page for the on-screen view
// ============================================================================

/// Generate a self-contained HTML page for a script.
///
/// Features:
/// - Title, runtime and setting in a header card
/// - Character badges
/// - One element per block, styled by its CSS class
/// - Inline CSS (no external dependencies)
pub fn render_html(view: &ScriptView) -> String {
    let badges: String = view
        .character_badges
        .iter()
        .map(|b| format!("<span class=\"badge\">{}</span>", escape_html(b)))
        .collect::<Vec<_>>()
        .join("\n");

    let mut blocks = String::new();
    for block in &view.blocks {
        let tag = match block.style {
            BlockStyle::Heading => "h3",
            _ => "p",
        };
        blocks.push_str(&format!(
            "<{tag} class=\"{class}\">{text}</{tag}>\n",
            tag = tag,
            class = block.style.css_class(),
            text = escape_html(&block.text),
        ));
    }

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<style>
body {{ font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; margin: 0; padding: 0; background: #f5f5f5; }}
.header {{ background: #263238; color: white; padding: 20px 30px; }}
.header h1 {{ margin: 0 0 8px 0; font-size: 24px; }}
.header p {{ margin: 4px 0; font-size: 15px; opacity: 0.9; }}
.content {{ max-width: 900px; margin: 20px auto; padding: 0 20px; }}
.badges {{ margin-bottom: 16px; }}
.badge {{ display: inline-block; background: #e0e0e0; border-radius: 12px; padding: 2px 10px; margin: 0 6px 6px 0; font-size: 13px; }}
.script {{ font-family: "Courier Prime", Courier, monospace; background: white; border-radius: 6px; padding: 24px; }}
.script .heading {{ font-weight: bold; font-size: 18px; text-transform: uppercase; margin: 16px 0; }}
.script .body {{ color: #555; margin: 12px 0; }}
.script .cue {{ text-align: center; text-transform: uppercase; font-weight: 500; margin: 16px 0 4px 0; }}
.script .dialogue {{ text-align: center; max-width: 28em; margin: 0 auto; }}
.script .parenthetical {{ text-align: center; font-style: italic; color: #555; font-size: 14px; margin: 0; }}
</style>
</head>
<body>
<div class="header">
<h1>{title}</h1>
<p>{runtime}</p>
<p>{setting}</p>
</div>
<div class="content">
<h4>Characters</h4>
<div class="badges">
{badges}
</div>
<div class="script">
{blocks}</div>
</div>
</body>
</html>"##,
        title = escape_html(&view.title),
        runtime = escape_html(&view.runtime_label),
        setting = escape_html(&view.setting),
        badges = badges,
        blocks = blocks,
    )
}

/// Escape HTML special characters.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
