pub mod store;
pub mod types;

pub use store::{load_or_default, MemoryStore, SettingsStore, TomlFileStore};
pub use types::{DebuggerSettings, SettingFlag};
