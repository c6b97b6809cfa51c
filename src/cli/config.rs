use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::generation::backend::{DEFAULT_OLLAMA_ENDPOINT, DEFAULT_OLLAMA_MODEL, DEFAULT_TIMEOUT_SECS};

pub const DEFAULT_CONFIG_PATH: &str = "scene-scripter.yaml";

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "scene-scripter",
    version,
    about = "Turn a mood or theme into a formatted screenplay scene"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Generation backend: ollama or mock
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Ollama API endpoint
    #[arg(long, global = true)]
    pub ollama_endpoint: Option<String>,

    /// Ollama model name
    #[arg(long, global = true)]
    pub ollama_model: Option<String>,

    /// Append a JSONL record of every request to this file
    #[arg(long, global = true)]
    pub trace: Option<String>,

    /// Path to config file (default: scene-scripter.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

/// Output options shared by the commands that print a script.
#[derive(clap::Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output format: console, text, html, json
    #[arg(long)]
    pub format: Option<String>,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Also copy the plain-text script to the clipboard
    #[arg(long, default_value_t = false)]
    pub copy: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a new scene for a mood or theme
    Generate {
        /// Mood, genre or theme (e.g. "Tense mystery")
        #[arg(long)]
        mood: String,

        /// Save the script as JSON (input for `regenerate --previous` and `format`)
        #[arg(long)]
        save: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Generate an alternate take, keeping character descriptions from a previous script
    Regenerate {
        /// Mood, genre or theme
        #[arg(long)]
        mood: String,

        /// Previously saved script JSON
        #[arg(long)]
        previous: Option<String>,

        /// Save the new script as JSON
        #[arg(long)]
        save: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Render a saved script JSON
    Format {
        /// Saved script JSON
        #[arg(long)]
        script: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Interactive session: type a mood to generate, /help for commands
    Interactive,
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `scene-scripter.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub ollama: OllamaConfig,
    #[serde(default)]
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_backend")]
    pub backend: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_console")]
    pub format: String,

    #[serde(default)]
    pub copy: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_console(),
            copy: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OllamaConfig {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TraceConfig {
    pub path: Option<String>,
}

// Serde default helpers
fn default_backend() -> String { "ollama".to_string() }
fn default_console() -> String { "console".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = config_path, error = %e, "malformed config, using defaults");
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Resolved settings (CLI > config > defaults)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendSettings {
    pub backend: String,
    pub ollama_endpoint: String,
    pub ollama_model: String,
    pub timeout_secs: u64,
}

pub fn resolve_backend(cli: &Cli, config: &AppConfig) -> BackendSettings {
    BackendSettings {
        backend: cli
            .backend
            .clone()
            .unwrap_or_else(|| config.generation.backend.clone()),
        ollama_endpoint: cli
            .ollama_endpoint
            .clone()
            .or_else(|| config.ollama.endpoint.clone())
            .unwrap_or_else(|| DEFAULT_OLLAMA_ENDPOINT.to_string()),
        ollama_model: cli
            .ollama_model
            .clone()
            .or_else(|| config.ollama.model.clone())
            .unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.to_string()),
        timeout_secs: config.ollama.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
    }
}

pub fn resolve_trace_path(cli: &Cli, config: &AppConfig) -> Option<String> {
    cli.trace.clone().or_else(|| config.trace.path.clone())
}

/// Output format and copy flag after merging CLI args with config.
pub fn resolve_output(args: &OutputArgs, config: &AppConfig) -> (String, bool) {
    let format = args
        .format
        .clone()
        .unwrap_or_else(|| config.output.format.clone());
    (format, args.copy || config.output.copy)
}
