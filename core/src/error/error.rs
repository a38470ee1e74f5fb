use thiserror::Error;

#[derive(Error, Debug)]
pub enum DebuggerError {
    #[error("settings error: {0}")]
    Settings(String),
    #[error("io error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("console write failed: {0}")]
    Console(#[from] std::io::Error),
    #[error("serialize failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("settings parse failed: {0}")]
    TomlDe(#[from] toml::de::Error),
    #[error("settings encode failed: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

impl DebuggerError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
