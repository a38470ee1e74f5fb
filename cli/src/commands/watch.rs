use std::collections::BTreeSet;

use prompt_debugger_core::api::{
    AppContext, ContextProvider, DebugCommand, HookPoint, HookResponse, HostEvent, PromptDebugger,
};
use serde::Deserialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::commands::cli::WatchArgs;
use crate::error::CliError;
use crate::utils::{load_context, open_lines, stdout_is_tty};

/// One record of the watch stream: either a host event or a debug command
/// typed into the console mid-session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WatchLine {
    Command { command: String },
    Event(HostEvent),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WatchStats {
    pub events: usize,
    pub commands: usize,
    pub skipped: usize,
    /// Hook points that delivered at least one event.
    pub hooks_seen: BTreeSet<HookPoint>,
}

pub async fn handle_watch(args: WatchArgs, ctx: &AppContext) -> Result<i32, CliError> {
    let provider = load_context(args.context.as_deref()).await?;
    let logger = ctx.stdout_logger(stdout_is_tty());
    let mut debugger = ctx.build_debugger(
        logger,
        provider.map(|c| Box::new(c) as Box<dyn ContextProvider>),
    );

    let reader = open_lines(&args.events).await?;
    let stats = pump_lines(reader, &mut debugger).await?;

    let seen: Vec<HookPoint> = stats.hooks_seen.iter().copied().collect();
    debugger.announce_capabilities(&seen);
    tracing::info!(
        events = stats.events,
        commands = stats.commands,
        skipped = stats.skipped,
        "watch finished"
    );
    Ok(0)
}

/// Feeds every line of `reader` to the debugger. Lines that are not UTF-8
/// are skipped like any other malformed line; only read errors end the run.
pub async fn pump_lines<R>(
    mut reader: R,
    debugger: &mut PromptDebugger,
) -> Result<WatchStats, CliError>
where
    R: AsyncBufRead + Unpin,
{
    let mut stats = WatchStats::default();
    let mut buf = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        line_no += 1;
        match std::str::from_utf8(&buf) {
            Ok(line) => apply_line(debugger, line, line_no, &mut stats),
            Err(e) => {
                stats.skipped += 1;
                tracing::warn!(line_no, error = %e, "skipping line that is not valid UTF-8");
            }
        }
    }
    Ok(stats)
}

/// Malformed lines are logged and skipped, never fatal.
pub fn apply_line(
    debugger: &mut PromptDebugger,
    line: &str,
    line_no: usize,
    stats: &mut WatchStats,
) {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return;
    }
    match serde_json::from_str::<WatchLine>(trimmed) {
        Ok(WatchLine::Event(event)) => {
            stats.events += 1;
            let hook = event.hook_point();
            stats.hooks_seen.insert(hook);
            match debugger.dispatch(event) {
                HookResponse::Continue => {}
                HookResponse::Prompt(part) => {
                    tracing::debug!(line_no, %hook, %part, "hook returned prompt part")
                }
                HookResponse::Reply { intercepted } => {
                    tracing::debug!(line_no, %hook, intercepted, "reply handler done")
                }
            }
        }
        Ok(WatchLine::Command { command }) => match command.parse::<DebugCommand>() {
            Ok(cmd) => {
                stats.commands += 1;
                debugger.run_command(cmd);
            }
            Err(e) => {
                stats.skipped += 1;
                tracing::warn!(line_no, error = %e, "skipping unknown command");
            }
        },
        Err(e) => {
            stats.skipped += 1;
            tracing::warn!(line_no, error = %e, "skipping malformed host event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use prompt_debugger_core::api::{DebuggerSettings, MemoryStore, PromptLogger, WriterSink};

    fn debugger() -> (PromptDebugger, MemoryStore) {
        let store = MemoryStore::with_settings(DebuggerSettings::default());
        let logger = PromptLogger::new(Box::new(WriterSink::new(Vec::new(), false, 2)));
        (PromptDebugger::new(Box::new(store.clone()), logger), store)
    }

    #[test]
    fn parses_events_and_commands() {
        let ev: WatchLine =
            serde_json::from_str(r#"{"hook":"build_prompt_struct","result":{"a":1}}"#).unwrap();
        assert!(matches!(ev, WatchLine::Event(HostEvent::BuildPromptStruct { .. })));

        let cmd: WatchLine = serde_json::from_str(r#"{"command":"toggleVerbose"}"#).unwrap();
        assert_eq!(
            cmd,
            WatchLine::Command {
                command: "toggleVerbose".to_string()
            }
        );
    }

    #[test]
    fn counts_and_skips_lines() {
        let (mut dbg, store) = debugger();
        let mut stats = WatchStats::default();
        let input = [
            r#"{"hook":"chat_completion_prompt_ready","payload":{"prompt_struct":{"a":1}}}"#,
            "",
            "not json",
            r#"{"hook":"teleport"}"#,
            r#"{"command":"toggleEnabled"}"#,
            r#"{"command":"explode"}"#,
        ];
        for (i, line) in input.iter().enumerate() {
            apply_line(&mut dbg, line, i + 1, &mut stats);
        }
        assert_eq!(
            stats,
            WatchStats {
                events: 1,
                commands: 1,
                skipped: 3,
                hooks_seen: BTreeSet::from([HookPoint::ChatCompletionPromptReady]),
            }
        );
        assert_eq!(store.current().map(|s| s.enabled), Some(false));
        assert!(!dbg.settings().enabled);
    }

    #[tokio::test]
    async fn non_utf8_line_is_skipped_and_stream_continues() {
        let (mut dbg, store) = debugger();
        let input: &[u8] = b"{\"command\":\"toggleVerbose\"}\n\xff\xfe garbage\n{\"command\":\"toggleEnabled\"}\n";

        let stats = pump_lines(input, &mut dbg).await.unwrap();

        assert_eq!(stats.commands, 2);
        assert_eq!(stats.skipped, 1);
        let saved = store.current().unwrap();
        assert!(saved.verbose_logging);
        assert!(!saved.enabled);
    }

    #[tokio::test]
    async fn last_line_without_newline_is_applied() {
        let (mut dbg, _store) = debugger();
        let input: &[u8] =
            b"{\"hook\":\"generate\",\"args\":[1]}\r\n{\"hook\":\"get_context\",\"context\":{}}";

        let stats = pump_lines(input, &mut dbg).await.unwrap();

        assert_eq!(stats.events, 2);
        assert_eq!(
            stats.hooks_seen,
            BTreeSet::from([HookPoint::GetContext, HookPoint::Generate])
        );
    }
}
