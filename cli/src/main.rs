use std::path::PathBuf;
use std::sync::OnceLock;

use clap::Parser;
use prompt_debugger_cli::app;
use prompt_debugger_cli::commands::cli;
use prompt_debugger_cli::error::CliError;
use prompt_debugger_core::api::AppContext;
use prompt_debugger_core::config::LoggingConfig;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            e.exit_code()
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, CliError> {
    let args = cli::Args::parse();
    let cfg = app::load_config(&args)?;
    init_tracing(&cfg.logging)?;

    let ctx = AppContext::new(cfg);
    app::dispatch(args, &ctx).await
}

/// Diagnostics go to stderr and, optionally, a per-process log file. Stdout
/// carries the prompt dumps.
fn init_tracing(logging: &LoggingConfig) -> Result<(), CliError> {
    if !logging.enabled {
        return Ok(());
    }

    let file_writer = if logging.file {
        Some(open_log_file(logging)?)
    } else {
        None
    };
    if !logging.console && file_writer.is_none() {
        return Err(CliError::Config(
            "logging is enabled but console and file output are both off".to_string(),
        ));
    }

    let console_layer = logging.console.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });
    let file_layer = file_writer.map(|w| fmt::layer().with_writer(w).with_ansi(false));

    tracing_subscriber::registry()
        .with(level_filter(logging)?)
        .with(console_layer)
        .with(file_layer)
        .init();
    Ok(())
}

/// `RUST_LOG` wins over the configured level.
fn level_filter(logging: &LoggingConfig) -> Result<EnvFilter, CliError> {
    let directives = std::env::var("RUST_LOG")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| logging.level.clone());
    EnvFilter::try_new(&directives)
        .map_err(|e| CliError::Config(format!("invalid log filter {directives:?}: {e}")))
}

fn open_log_file(logging: &LoggingConfig) -> Result<NonBlocking, CliError> {
    let dir = logging
        .directory
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("prompt-debugger"));
    std::fs::create_dir_all(&dir)
        .map_err(|e| CliError::Config(format!("create log dir {} failed: {e}", dir.display())))?;

    let file_name = format!("prompt-debugger.{}.log", std::process::id());
    let appender = tracing_appender::rolling::never(&dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = LOG_GUARD.set(guard);
    Ok(writer)
}
