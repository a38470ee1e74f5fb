//! CLI assembly: resolve config, then hand off to the selected command.
use prompt_debugger_core::api::{AppConfig, AppContext};
use prompt_debugger_core::config;

use crate::commands::cli::{Args, Commands};
use crate::commands::{debug, prune, settings, watch};
use crate::error::CliError;

pub fn load_config(args: &Args) -> Result<AppConfig, CliError> {
    let mut cfg = match args.config.as_deref() {
        Some(path) => {
            let data_dir = config::get_data_dir().map_err(|e| CliError::Config(e.to_string()))?;
            let cfg = config::load_from_path(std::path::Path::new(path))
                .map_err(|e| CliError::Config(e.to_string()))?;
            config::resolve(cfg, &data_dir)
        }
        None => config::load_default().map_err(|e| CliError::Config(e.to_string()))?,
    };
    if let Some(path) = args.settings.as_deref() {
        cfg.settings_path = Some(path.to_string());
    }
    Ok(cfg)
}

#[tracing::instrument(name = "cli.dispatch", skip_all)]
pub async fn dispatch(args: Args, ctx: &AppContext) -> Result<i32, CliError> {
    tracing::debug!(
        settings = %ctx.settings_path().display(),
        "prompt debugger starting"
    );
    match args.command {
        Commands::Prune(a) => prune::handle_prune(a, ctx).await,
        Commands::Watch(a) => watch::handle_watch(a, ctx).await,
        Commands::Debug(a) => debug::handle_debug(a, ctx).await,
        Commands::Settings(a) => settings::handle_settings(a, ctx).await,
    }
}
