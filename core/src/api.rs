//! Stable re-exports for consumers (`cli` and host integration crates).
//!
//! Prefer importing from `prompt_debugger_core::api` instead of reaching into internal modules.

pub use crate::commands::{CommandOutcome, DebugCommand, HELP_TEXT};
pub use crate::config::{load_default, load_from_path, AppConfig, ConsoleConfig, LoggingConfig};
pub use crate::context::AppContext;
pub use crate::error::DebuggerError;
pub use crate::hooks::{
    ContextProvider, HookPoint, HookResponse, HostEvent, PromptCapture, PromptDebugger,
    PromptObserver, StaticContext,
};
pub use crate::logger::{ConsoleSink, PromptLogger, Tone, WriterSink};
pub use crate::prune::{prune, Pruner, DEFAULT_MAX_DEPTH};
pub use crate::settings::{
    load_or_default, DebuggerSettings, MemoryStore, SettingFlag, SettingsStore, TomlFileStore,
};
