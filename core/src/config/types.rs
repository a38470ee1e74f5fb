use serde::{Deserialize, Serialize};

use crate::prune::DEFAULT_MAX_DEPTH;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub console: ConsoleConfig,

    #[serde(default)]
    pub prune: PruneConfig,

    /// Settings file holding the four debugger flags. Resolved by
    /// `load_default` when unset.
    #[serde(default)]
    pub settings_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default)]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "prompt_debugger=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: false,
            level: default_logging_level(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Colour group titles. Ignored when stdout is not a terminal.
    #[serde(default = "default_console_ansi")]
    pub ansi: bool,

    #[serde(default = "default_console_indent")]
    pub indent: usize,
}

fn default_console_ansi() -> bool {
    true
}

fn default_console_indent() -> usize {
    2
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            ansi: default_console_ansi(),
            indent: default_console_indent(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PruneConfig {
    #[serde(default = "default_prune_max_depth")]
    pub max_depth: usize,
}

fn default_prune_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for PruneConfig {
    fn default() -> Self {
        Self {
            max_depth: default_prune_max_depth(),
        }
    }
}
