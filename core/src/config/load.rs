use std::path::{Path, PathBuf};

use super::types::AppConfig;

pub const SETTINGS_PATH_ENV: &str = "PROMPT_DEBUGGER_SETTINGS";
pub const LOG_LEVEL_ENV: &str = "PROMPT_DEBUGGER_LOG_LEVEL";

/// Get the default data directory: ~/.prompt-debugger
pub fn get_data_dir() -> anyhow::Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".prompt-debugger"))
        .ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.prompt-debugger/config.toml
    let data_dir = get_data_dir()?;
    let user_config = data_dir.join("config.toml");

    // Priority 2: ./config.toml
    let local_config = Path::new("config.toml");

    let cfg = if user_config.exists() {
        load_from_path(&user_config)?
    } else if local_config.exists() {
        load_from_path(local_config)?
    } else {
        AppConfig::default()
    };

    Ok(resolve(cfg, &data_dir))
}

pub fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("read {} failed: {e}", path.display()))?;
    let cfg = toml::from_str::<AppConfig>(&s)
        .map_err(|e| anyhow::anyhow!("parse {} failed: {e}", path.display()))?;
    Ok(cfg)
}

/// Fills unset paths relative to `data_dir` and applies environment overrides.
pub fn resolve(mut cfg: AppConfig, data_dir: &Path) -> AppConfig {
    let unset = cfg
        .settings_path
        .as_deref()
        .map(|s| s.trim().is_empty())
        .unwrap_or(true);
    if unset {
        cfg.settings_path = Some(
            data_dir
                .join("settings.toml")
                .to_string_lossy()
                .to_string(),
        );
    }

    if cfg.logging.file
        && cfg
            .logging
            .directory
            .as_deref()
            .map(|s| s.trim().is_empty())
            .unwrap_or(true)
    {
        cfg.logging.directory = Some(data_dir.join("logs").to_string_lossy().to_string());
    }

    // Environment variable overrides (highest priority)
    if let Ok(v) = std::env::var(SETTINGS_PATH_ENV) {
        if !v.trim().is_empty() {
            cfg.settings_path = Some(v);
        }
    }
    if let Ok(v) = std::env::var(LOG_LEVEL_ENV) {
        if !v.trim().is_empty() {
            cfg.logging.level = v;
        }
    }

    cfg
}
