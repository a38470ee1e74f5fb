use prompt_debugger_core::api::StaticContext;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncReadExt, BufReader};

use crate::error::CliError;

pub const STDIN_MARKER: &str = "-";

/// Whole input as a string, from a file or stdin.
pub async fn read_input(path: &str) -> Result<String, CliError> {
    let mut buf = String::new();
    if path == STDIN_MARKER {
        tokio::io::stdin().read_to_string(&mut buf).await?;
    } else {
        buf = tokio::fs::read_to_string(path).await?;
    }
    Ok(buf)
}

/// Line reader over a file or stdin.
pub async fn open_lines(path: &str) -> Result<Box<dyn AsyncBufRead + Unpin + Send>, CliError> {
    if path == STDIN_MARKER {
        return Ok(Box::new(BufReader::new(tokio::io::stdin())));
    }
    let file = tokio::fs::File::open(path).await?;
    Ok(Box::new(BufReader::new(file)))
}

pub async fn load_context(path: Option<&str>) -> Result<Option<StaticContext>, CliError> {
    let Some(path) = path else {
        return Ok(None);
    };
    let raw = read_input(path).await?;
    let value: Value = serde_json::from_str(&raw)?;
    Ok(Some(StaticContext(value)))
}

pub fn stdout_is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}
