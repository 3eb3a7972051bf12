/// Configuration schema and defaults for codelens.
///
/// Defines the TOML-serializable configuration structure with all sections:
/// `[display]`, `[request]`, and `[logging]`.
///
/// Every field has a sensible built-in default. Users only need to set the
/// values they want to override.
use serde::{Deserialize, Serialize};

use crate::interpret::Theme;
use crate::response::AnalysisOption;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level codelens configuration.
///
/// Maps directly to the `~/.codelens/config.toml` and `.codelens.toml` file
/// schemas. All sections and fields are optional; missing values fall back
/// to built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CodelensConfig {
    pub display: DisplayConfig,
    pub request: RequestConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [display]
// ---------------------------------------------------------------------------

/// Output format for the interpreted dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Colored terminal dashboard (default).
    #[default]
    Table,
    /// The full report as pretty-printed JSON.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Palette and level wording: `standard` or `hacker`.
    pub theme: Theme,
    /// Default output format: `table` or `json`.
    pub format: OutputFormat,
    /// Echo the raw complexity text under the parsed summary.
    pub show_source: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            format: OutputFormat::default(),
            show_source: false,
        }
    }
}

// ---------------------------------------------------------------------------
// [request]
// ---------------------------------------------------------------------------

/// Defaults for the request descriptor when the CLI is given code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestConfig {
    /// Declared source language sent with the code.
    pub language: String,
    /// Analysis modules selected by default.
    pub options: Vec<AnalysisOption>,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            language: "python".to_string(),
            options: AnalysisOption::ALL.to_vec(),
        }
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Whether analysis logging is enabled.
    pub enabled: bool,
    /// Path to the analysis summary log. `~` is expanded to the home directory.
    pub path: String,
    /// Path to the warning/error event log.
    pub events_path: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "~/.codelens/analysis-log.jsonl".to_string(),
            events_path: "~/.codelens/events.jsonl".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default TOML content
// ---------------------------------------------------------------------------

impl CodelensConfig {
    /// Generate the annotated default TOML config file content.
    ///
    /// Used by `codelens config init` to create a starting config file with
    /// all settings documented.
    pub fn default_toml() -> String {
        r#"# codelens Configuration
#
# Configuration hierarchy (highest precedence wins):
#   1. Environment variables (CODELENS_*)
#   2. Project config (.codelens.toml in current directory)
#   3. User global config (~/.codelens/config.toml)
#   4. Built-in defaults

[display]
theme = "standard"    # standard | hacker
format = "table"      # table | json
show_source = false   # Echo raw complexity text under the summary

[request]
language = "python"
options = ["complexity", "documentation", "refactoring", "structure", "improvements"]

[logging]
enabled = true
path = "~/.codelens/analysis-log.jsonl"
events_path = "~/.codelens/events.jsonl"
"#
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
