use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::DebuggerError;

use super::types::DebuggerSettings;

/// Where the flags live between sessions.
pub trait SettingsStore {
    fn load(&self) -> Result<Option<DebuggerSettings>, DebuggerError>;
    fn save(&mut self, settings: &DebuggerSettings) -> Result<(), DebuggerError>;
}

/// Falls back to defaults when nothing has been stored yet.
pub fn load_or_default(store: &dyn SettingsStore) -> Result<DebuggerSettings, DebuggerError> {
    Ok(store.load()?.unwrap_or_default())
}

#[derive(Debug, Clone)]
pub struct TomlFileStore {
    path: PathBuf,
}

impl TomlFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for TomlFileStore {
    fn load(&self) -> Result<Option<DebuggerSettings>, DebuggerError> {
        if self.path.is_dir() {
            return Err(DebuggerError::Settings(format!(
                "{} is a directory, expected a settings file",
                self.path.display()
            )));
        }
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(DebuggerError::io(self.path.display().to_string(), e)),
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(toml::from_str::<DebuggerSettings>(&raw)?))
    }

    fn save(&mut self, settings: &DebuggerSettings) -> Result<(), DebuggerError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| DebuggerError::io(parent.display().to_string(), e))?;
        }
        let body = toml::to_string_pretty(settings)?;
        std::fs::write(&self.path, body)
            .map_err(|e| DebuggerError::io(self.path.display().to_string(), e))?;
        tracing::debug!(target: "prompt_debugger", path = %self.path.display(), "settings saved");
        Ok(())
    }
}

/// In-process store. Clones share the same slot, so a host can keep one
/// handle and hand another to the debugger.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Rc<RefCell<Option<DebuggerSettings>>>,
    saves: Rc<RefCell<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: DebuggerSettings) -> Self {
        let store = Self::default();
        *store.slot.borrow_mut() = Some(settings);
        store
    }

    pub fn current(&self) -> Option<DebuggerSettings> {
        *self.slot.borrow()
    }

    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self) -> Result<Option<DebuggerSettings>, DebuggerError> {
        Ok(self.current())
    }

    fn save(&mut self, settings: &DebuggerSettings) -> Result<(), DebuggerError> {
        *self.slot.borrow_mut() = Some(*settings);
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlFileStore::new(dir.path().join("settings.toml"));
        assert!(store.load().unwrap().is_none());
        assert_eq!(load_or_default(&store).unwrap(), DebuggerSettings::default());
    }

    #[test]
    fn file_store_round_trip_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = TomlFileStore::new(dir.path().join("nested").join("settings.toml"));
        let settings = DebuggerSettings {
            verbose_logging: true,
            hook_all_events: false,
            ..DebuggerSettings::default()
        };
        store.save(&settings).unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("verboseLogging = true"));
        assert_eq!(store.load().unwrap(), Some(settings));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "enabled = false\n").unwrap();
        let loaded = TomlFileStore::new(&path).load().unwrap().unwrap();
        assert!(!loaded.enabled);
        assert!(loaded.filter_out_empty_fields);
        assert!(loaded.hook_all_events);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "enabled = maybe\n").unwrap();
        let err = TomlFileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, DebuggerError::TomlDe(_)));
    }

    #[test]
    fn directory_path_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = TomlFileStore::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, DebuggerError::Settings(_)));
    }

    #[test]
    fn memory_store_clones_share_state() {
        let observer = MemoryStore::new();
        let mut handle = observer.clone();
        handle.save(&DebuggerSettings::default()).unwrap();
        assert_eq!(observer.current(), Some(DebuggerSettings::default()));
        assert_eq!(observer.save_count(), 1);
    }
}
