use std::io::{BufRead, Write};
use std::time::Duration;

use tracing::{debug, info};

use crate::cli::config::{AppConfig, BackendSettings, OutputArgs, resolve_output};
use crate::export::clipboard::{ClipboardSink, SystemClipboard, copy_script};
use crate::generation::backend::{MockBackend, OllamaBackend};
use crate::generation::scene_generator::SceneGenerator;
use crate::render::console::render_console;
use crate::render::html::render_html;
use crate::render::text::format_script_text;
use crate::render::view::build_view;
use crate::script::script_model::Script;
use crate::session::session::Session;
use crate::trace::logger::TraceLogger;

// ============================================================================
// generate subcommand
// ============================================================================

pub fn cmd_generate(
    mood: &str,
    save: Option<&str>,
    output: &OutputArgs,
    config: &AppConfig,
    backend: &BackendSettings,
    tracer: &TraceLogger,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::new(build_generator(backend)?);
    session.set_mood(mood)?;

    let script = session.generate(tracer)?;
    deliver(script, save, output, config)
}

// ============================================================================
// regenerate subcommand
// ============================================================================

pub fn cmd_regenerate(
    mood: &str,
    previous: Option<&str>,
    save: Option<&str>,
    output: &OutputArgs,
    config: &AppConfig,
    backend: &BackendSettings,
    tracer: &TraceLogger,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::new(build_generator(backend)?);
    if let Some(path) = previous {
        let script = load_script(path)?;
        debug!(path, characters = script.characters().len(), "restored previous script");
        session.restore(script)?;
    }
    session.set_mood(mood)?;

    let script = session.regenerate(tracer)?;
    deliver(script, save, output, config)
}

// ============================================================================
// format subcommand
// ============================================================================

pub fn cmd_format(
    script_path: &str,
    output: &OutputArgs,
    config: &AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let script = load_script(script_path)?;
    deliver(&script, None, output, config)
}

// ============================================================================
// interactive subcommand
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// `None` reuses the current mood (`/gen` without an argument)
    Generate(Option<String>),
    Regenerate,
    Copy,
    Show,
    Text,
    Save(String),
    Help,
    Quit,
    Unknown(String),
}

/// Parse one line of interactive input. Anything that is not a slash
/// command is a mood to generate from, including a blank line.
pub fn parse_repl_line(line: &str) -> ReplCommand {
    let line = line.trim();
    let Some(command) = line.strip_prefix('/') else {
        return ReplCommand::Generate(Some(line.to_string()));
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    match name {
        "gen" | "generate" if arg.is_empty() => ReplCommand::Generate(None),
        "gen" | "generate" => ReplCommand::Generate(Some(arg.to_string())),
        "regen" | "regenerate" => ReplCommand::Regenerate,
        "copy" => ReplCommand::Copy,
        "show" => ReplCommand::Show,
        "text" => ReplCommand::Text,
        "save" if !arg.is_empty() => ReplCommand::Save(arg.to_string()),
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" | "q" => ReplCommand::Quit,
        _ => ReplCommand::Unknown(line.to_string()),
    }
}

const REPL_HELP: &str = "\
Type a mood or theme and press enter to generate a scene.
  /gen [mood]   generate again (optionally with a new mood)
  /regen        alternate take on the current mood
  /copy         copy the plain-text script to the clipboard
  /show         show the current script
  /text         print the plain-text export
  /save <path>  save the current script as JSON
  /quit         leave
";

/// Drive a session from line input until EOF or `/quit`.
pub fn run_interactive(
    session: &mut Session,
    tracer: &TraceLogger,
    clipboard: &mut dyn ClipboardSink,
    input: impl BufRead,
    mut out: impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    writeln!(out, "scene-scripter interactive session. /help for commands.")?;

    for line in input.lines() {
        let line = line?;
        match parse_repl_line(&line) {
            ReplCommand::Generate(mood) => {
                if let Some(mood) = mood {
                    session.set_mood(&mood)?;
                }
                writeln!(out, "Generating...")?;
                match session.generate(tracer) {
                    Ok(script) => write!(out, "{}", render_console(&build_view(script)))?,
                    Err(e) => writeln!(out, "Error: {}", e)?,
                }
            }
            ReplCommand::Regenerate => {
                writeln!(out, "Regenerating...")?;
                match session.regenerate(tracer) {
                    Ok(script) => write!(out, "{}", render_console(&build_view(script)))?,
                    Err(e) => writeln!(out, "Error: {}", e)?,
                }
            }
            ReplCommand::Copy => match session.copy(clipboard) {
                Ok(notice) => writeln!(out, "{} {}", notice.title, notice.description)?,
                Err(e) => writeln!(out, "Error: {}", e)?,
            },
            ReplCommand::Show => match session.script() {
                Some(script) => write!(out, "{}", render_console(&build_view(script)))?,
                None => writeln!(
                    out,
                    "{}",
                    session
                        .error_message()
                        .unwrap_or("No script yet. Type a mood to generate one.")
                )?,
            },
            ReplCommand::Text => match session.script() {
                Some(script) => write!(out, "{}", format_script_text(script))?,
                None => writeln!(out, "No script yet. Type a mood to generate one.")?,
            },
            ReplCommand::Save(path) => match session.script() {
                Some(script) => {
                    save_script(script, &path)?;
                    writeln!(out, "Saved {}", path)?;
                }
                None => writeln!(out, "No script yet. Type a mood to generate one.")?,
            },
            ReplCommand::Help => write!(out, "{}", REPL_HELP)?,
            ReplCommand::Quit => break,
            ReplCommand::Unknown(cmd) => writeln!(out, "Unknown command: {} (try /help)", cmd)?,
        }
        out.flush()?;
    }

    Ok(())
}

pub fn cmd_interactive(
    backend: &BackendSettings,
    tracer: &TraceLogger,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::new(build_generator(backend)?);
    let mut clipboard = SystemClipboard;
    let stdin = std::io::stdin();
    run_interactive(
        &mut session,
        tracer,
        &mut clipboard,
        stdin.lock(),
        std::io::stdout(),
    )
}

// ============================================================================
// Helpers
// ============================================================================

/// Build the scene generator for the configured backend.
pub fn build_generator(
    settings: &BackendSettings,
) -> Result<SceneGenerator, Box<dyn std::error::Error>> {
    match settings.backend.as_str() {
        "ollama" => {
            let backend = OllamaBackend::new(&settings.ollama_endpoint, &settings.ollama_model)
                .with_timeout(Duration::from_secs(settings.timeout_secs));
            Ok(SceneGenerator::new(Box::new(backend)))
        }
        "mock" => Ok(SceneGenerator::new(Box::new(MockBackend::new()))),
        other => Err(format!("unknown backend '{}' (expected ollama or mock)", other).into()),
    }
}

/// Render a script in one of the output formats.
pub fn render_script(script: &Script, format: &str) -> Result<String, Box<dyn std::error::Error>> {
    let content = match format {
        "text" => format_script_text(script),
        "html" => render_html(&build_view(script)),
        "json" => {
            let mut json = serde_json::to_string_pretty(script)?;
            json.push('\n');
            json
        }
        _ => render_console(&build_view(script)),
    };
    Ok(content)
}

pub fn load_script(path: &str) -> Result<Script, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let script: Script = serde_json::from_str(&content)?;
    Ok(script)
}

pub fn save_script(script: &Script, path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(script)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Save, render, write or print, and optionally copy a finished script.
fn deliver(
    script: &Script,
    save: Option<&str>,
    output: &OutputArgs,
    config: &AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = save {
        save_script(script, path)?;
        info!(path, "script saved");
    }

    let (format, copy) = resolve_output(output, config);
    let content = render_script(script, &format)?;

    match output.output.as_deref() {
        Some(path) => std::fs::write(path, &content)?,
        None => print!("{}", content),
    }

    if copy {
        let notice = copy_script(script, &mut SystemClipboard)?;
        eprintln!("{} {}", notice.title, notice.description);
    }

    Ok(())
}
