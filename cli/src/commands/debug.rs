use prompt_debugger_core::api::{AppContext, CommandOutcome, ContextProvider, DebugCommand};

use crate::commands::cli::DebugArgs;
use crate::error::CliError;
use crate::utils::{load_context, stdout_is_tty};

/// Exit code 1 when `dumpContext` has nothing to dump.
pub async fn handle_debug(args: DebugArgs, ctx: &AppContext) -> Result<i32, CliError> {
    let provider = load_context(args.context.as_deref()).await?;
    if args.command != DebugCommand::DumpContext && provider.is_some() {
        tracing::debug!(command = args.command.name(), "--context ignored");
    }
    let mut debugger = ctx.build_debugger(
        ctx.stdout_logger(stdout_is_tty()),
        provider.map(|c| Box::new(c) as Box<dyn ContextProvider>),
    );

    // The debugger already wrote any status message to the console.
    let code = match debugger.run_command(args.command) {
        CommandOutcome::Context(None) => 1,
        CommandOutcome::Context(Some(_))
        | CommandOutcome::Help(_)
        | CommandOutcome::Toggled { .. } => 0,
    };
    Ok(code)
}
