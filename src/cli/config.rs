use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "form-designer",
    version,
    about = "Drag-and-drop form designer core: palette, previews, validation and replay"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: form-designer.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Append one JSON line per drag gesture to this file
    #[arg(long, global = true)]
    pub trace: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the element palette
    Palette,

    /// Render stored form content as text
    Preview {
        /// JSON file holding the encoded element list
        #[arg(long)]
        content: String,

        /// Which view to draw: designer, form, properties
        #[arg(long, default_value = "designer")]
        view: String,
    },

    /// Check a submission against a form's elements
    Validate {
        /// JSON file holding the encoded element list
        #[arg(long)]
        content: String,

        /// JSON file mapping element id to submitted value
        #[arg(long)]
        values: String,

        /// Output format: console, json
        #[arg(long)]
        format: Option<String>,
    },

    /// Replay designer scripts from YAML files
    Replay {
        /// Script YAML file or directory of YAML files
        #[arg(long)]
        script: String,

        /// JSON file with the starting element list (default: empty canvas)
        #[arg(long)]
        content: Option<String>,

        /// Output format: console, junit, json
        #[arg(long)]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Visit and submission statistics for stored forms
    Stats {
        /// JSON file of stored form records and submissions
        #[arg(long)]
        forms: String,

        /// Also print the submissions table of this form
        #[arg(long)]
        form_id: Option<u64>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `form-designer.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub trace: TraceConfig,
    #[serde(default)]
    pub ids: IdsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_console")]
    pub format: String,

    pub path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_console(),
            path: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceConfig {
    pub path: Option<String>,
}

/// How new element ids are minted: `uuid` (default) or `sequential`
/// (`<prefix>-1`, `<prefix>-2`, ...) for reproducible replays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdsConfig {
    #[serde(default = "default_uuid")]
    pub strategy: String,

    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for IdsConfig {
    fn default() -> Self {
        Self {
            strategy: default_uuid(),
            prefix: default_prefix(),
        }
    }
}

// Serde default helpers
fn default_console() -> String { "console".to_string() }
fn default_uuid() -> String { "uuid".to_string() }
fn default_prefix() -> String { "el".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("form-designer.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Resolution (CLI > config file > defaults)
// ============================================================================

pub fn resolve_format<'a>(cli: Option<&'a str>, config: &'a AppConfig) -> &'a str {
    cli.unwrap_or(&config.output.format)
}

pub fn resolve_output<'a>(cli: Option<&'a str>, config: &'a AppConfig) -> Option<&'a str> {
    cli.or(config.output.path.as_deref())
}

pub fn resolve_trace<'a>(cli: Option<&'a str>, config: &'a AppConfig) -> Option<&'a str> {
    cli.or(config.trace.path.as_deref())
}
