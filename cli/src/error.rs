use prompt_debugger_core::error::DebuggerError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),
    #[error("command failed: {0}")]
    Command(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid json input: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Debugger(#[from] DebuggerError),
}

impl CliError {
    // 0: success
    // 11: config error
    // 20: IO error
    // 30: bad input
    // 50: internal/uncategorized
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) => 11,
            CliError::Io(_) => 20,
            CliError::Json(_) => 30,
            CliError::Command(_) => 30,
            CliError::Debugger(DebuggerError::Io { .. }) => 20,
            CliError::Debugger(DebuggerError::TomlDe(_)) => 11,
            CliError::Debugger(_) => 50,
        }
    }
}
