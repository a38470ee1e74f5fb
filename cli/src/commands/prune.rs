use prompt_debugger_core::api::AppContext;
use serde_json::Value;

use crate::commands::cli::PruneArgs;
use crate::error::CliError;
use crate::utils::read_input;

pub async fn handle_prune(args: PruneArgs, ctx: &AppContext) -> Result<i32, CliError> {
    let raw = read_input(&args.input).await?;
    let out = prune_document(&raw, &args, ctx)?;
    println!("{out}");
    Ok(0)
}

pub fn prune_document(raw: &str, args: &PruneArgs, ctx: &AppContext) -> Result<String, CliError> {
    let value: Value = serde_json::from_str(raw)?;
    let pruner = ctx.pruner(!args.keep_empty);
    let pruned = pruner.prune(&value);
    tracing::debug!(
        before = prompt_debugger_core::prune::node_count(&value),
        after = prompt_debugger_core::prune::node_count(&pruned),
        "pruned document"
    );
    let out = if args.compact {
        serde_json::to_string(pruned.as_ref())?
    } else {
        serde_json::to_string_pretty(pruned.as_ref())?
    };
    Ok(out)
}
