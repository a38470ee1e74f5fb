use std::path::PathBuf;

use crate::config::AppConfig;
use crate::hooks::{ContextProvider, PromptDebugger};
use crate::logger::PromptLogger;
use crate::prune::Pruner;
use crate::settings::{SettingsStore, TomlFileStore};

/// Builds the debugger pieces from a loaded `AppConfig`.
#[derive(Debug, Clone)]
pub struct AppContext {
    cfg: AppConfig,
}

impl AppContext {
    pub fn new(cfg: AppConfig) -> Self {
        Self { cfg }
    }

    pub fn settings_path(&self) -> PathBuf {
        self.cfg
            .settings_path
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("settings.toml"))
    }

    pub fn settings_store(&self) -> TomlFileStore {
        TomlFileStore::new(self.settings_path())
    }

    pub fn pruner(&self, enabled: bool) -> Pruner {
        Pruner::new(enabled).with_max_depth(self.cfg.prune.max_depth)
    }

    /// `stdout_is_tty` gates ANSI styling on top of the console config.
    pub fn stdout_logger(&self, stdout_is_tty: bool) -> PromptLogger {
        PromptLogger::stdout(
            self.cfg.console.ansi && stdout_is_tty,
            self.cfg.console.indent,
        )
    }

    pub fn build_debugger(
        &self,
        logger: PromptLogger,
        context_provider: Option<Box<dyn ContextProvider>>,
    ) -> PromptDebugger {
        let store: Box<dyn SettingsStore> = Box::new(self.settings_store());
        let debugger =
            PromptDebugger::new(store, logger).with_max_depth(self.cfg.prune.max_depth);
        match context_provider {
            Some(provider) => debugger.with_context_provider(provider),
            None => debugger,
        }
    }
}
