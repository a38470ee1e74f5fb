use prompt_debugger_core::api::{AppContext, DebuggerSettings, SettingsStore};

use crate::commands::cli::{SettingsArgs, SettingsCommand};
use crate::error::CliError;
use crate::utils::stdout_is_tty;

pub async fn handle_settings(args: SettingsArgs, ctx: &AppContext) -> Result<i32, CliError> {
    match args.command {
        SettingsCommand::Show => {
            let store = ctx.settings_store();
            let settings = store.load()?.unwrap_or_default();
            print!("{}", render_settings(&settings, &store.path().display().to_string())?);
        }
        SettingsCommand::Set { flag, value } => {
            let mut debugger = ctx.build_debugger(ctx.stdout_logger(stdout_is_tty()), None);
            debugger.set_flag(flag, value);
        }
    }
    Ok(0)
}

pub fn render_settings(settings: &DebuggerSettings, path: &str) -> Result<String, CliError> {
    let body = toml::to_string_pretty(settings)
        .map_err(|e| CliError::Command(format!("encode settings failed: {e}")))?;
    Ok(format!("# {path}\n{body}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use prompt_debugger_core::api::{AppConfig, SettingFlag};

    fn ctx_at(path: &std::path::Path) -> AppContext {
        let cfg = AppConfig {
            settings_path: Some(path.to_string_lossy().to_string()),
            ..AppConfig::default()
        };
        AppContext::new(cfg)
    }

    #[test]
    fn render_lists_every_flag() {
        let out = render_settings(&DebuggerSettings::default(), "/x/settings.toml").unwrap();
        assert!(out.starts_with("# /x/settings.toml\n"));
        for flag in SettingFlag::ALL {
            assert!(out.contains(flag.key()), "missing {}", flag.key());
        }
    }

    #[tokio::test]
    async fn set_persists_to_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        let ctx = ctx_at(&path);

        let code = handle_settings(
            SettingsArgs {
                command: SettingsCommand::Set {
                    flag: SettingFlag::VerboseLogging,
                    value: true,
                },
            },
            &ctx,
        )
        .await
        .unwrap();
        assert_eq!(code, 0);

        let saved = ctx.settings_store().load().unwrap().unwrap();
        assert!(saved.verbose_logging);
        assert!(saved.enabled);
    }
}
