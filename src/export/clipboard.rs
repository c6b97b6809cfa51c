use std::io::Write;
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::{debug, info};

use crate::render::text::format_script_text;
use crate::script::script_model::Script;

#[derive(Debug, Error)]
pub enum ClipboardError {
    /// None of the platform clipboard tools could be started
    #[error("no clipboard tool available (tried {tried})")]
    Unavailable { tried: String },

    /// The clipboard tool started but failed
    #[error("{tool} failed: {detail}")]
    ToolFailed { tool: String, detail: String },
}

/// Destination for exported script text.
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Confirmation shown after a successful copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyNotice {
    pub title: String,
    pub description: String,
}

impl CopyNotice {
    pub fn copied() -> Self {
        Self {
            title: "Script Copied!".to_string(),
            description: "The formatted script has been copied to your clipboard.".to_string(),
        }
    }
}

/// Format the script as plain text and write it to the clipboard.
pub fn copy_script(
    script: &Script,
    clipboard: &mut dyn ClipboardSink,
) -> Result<CopyNotice, ClipboardError> {
    let text = format_script_text(script);
    clipboard.write_text(&text)?;
    info!(bytes = text.len(), "script copied to clipboard");
    Ok(CopyNotice::copied())
}

// ============================================================================
// System clipboard via platform tools
// ============================================================================

/// Candidate clipboard commands, tried in order.
const CLIPBOARD_TOOLS: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("clip", &[]),
];

#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    fn pipe_into(tool: &str, args: &[&str], text: &str) -> Result<bool, ClipboardError> {
        let mut child = match Command::new(tool)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                debug!(tool, error = %e, "clipboard tool not usable");
                return Ok(false);
            }
        };

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .map_err(|e| ClipboardError::ToolFailed {
                    tool: tool.to_string(),
                    detail: e.to_string(),
                })?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| ClipboardError::ToolFailed {
                tool: tool.to_string(),
                detail: e.to_string(),
            })?;

        if output.status.success() {
            Ok(true)
        } else {
            Err(ClipboardError::ToolFailed {
                tool: tool.to_string(),
                detail: format!(
                    "exited with {}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            })
        }
    }
}

impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        for (tool, args) in CLIPBOARD_TOOLS {
            if Self::pipe_into(tool, args, text)? {
                debug!(tool, "clipboard written");
                return Ok(());
            }
        }

        let tried = CLIPBOARD_TOOLS
            .iter()
            .map(|(tool, _)| *tool)
            .collect::<Vec<_>>()
            .join(", ");
        Err(ClipboardError::Unavailable { tried })
    }
}

// ============================================================================
// In-memory clipboard (tests, headless runs)
// ============================================================================

#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl ClipboardSink for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}
