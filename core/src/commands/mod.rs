//! The `promptDebugger.*` console namespace and the checkbox setters.

use std::str::FromStr;

use serde_json::Value;

use crate::hooks::PromptDebugger;
use crate::settings::SettingFlag;

pub const HELP_TEXT: &str = "\
Prompt Debugger Console Commands:
- promptDebugger.dumpContext() - Dump the current host context
- promptDebugger.toggleEnabled() - Toggle prompt debugging on/off
- promptDebugger.toggleVerbose() - Toggle verbose logging on/off
- promptDebugger.help() - Show this help message";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugCommand {
    DumpContext,
    ToggleEnabled,
    ToggleVerbose,
    Help,
}

impl DebugCommand {
    pub const ALL: [DebugCommand; 4] = [
        DebugCommand::DumpContext,
        DebugCommand::ToggleEnabled,
        DebugCommand::ToggleVerbose,
        DebugCommand::Help,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DebugCommand::DumpContext => "dumpContext",
            DebugCommand::ToggleEnabled => "toggleEnabled",
            DebugCommand::ToggleVerbose => "toggleVerbose",
            DebugCommand::Help => "help",
        }
    }
}

impl FromStr for DebugCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let name = trimmed
            .strip_prefix("promptDebugger.")
            .unwrap_or(trimmed)
            .trim_end_matches("()");
        let normalized: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "dumpcontext" => Ok(DebugCommand::DumpContext),
            "toggleenabled" => Ok(DebugCommand::ToggleEnabled),
            "toggleverbose" => Ok(DebugCommand::ToggleVerbose),
            "help" => Ok(DebugCommand::Help),
            _ => Err(format!("unknown debug command: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// `None` when the host exposes no context provider.
    Context(Option<Value>),
    Toggled { flag: SettingFlag, value: bool },
    Help(&'static str),
}

impl PromptDebugger {
    pub fn run_command(&mut self, command: DebugCommand) -> CommandOutcome {
        match command {
            DebugCommand::DumpContext => CommandOutcome::Context(self.dump_context()),
            DebugCommand::ToggleEnabled => {
                let value = self.toggle_flag(SettingFlag::Enabled);
                CommandOutcome::Toggled {
                    flag: SettingFlag::Enabled,
                    value,
                }
            }
            DebugCommand::ToggleVerbose => {
                let value = self.toggle_flag(SettingFlag::VerboseLogging);
                CommandOutcome::Toggled {
                    flag: SettingFlag::VerboseLogging,
                    value,
                }
            }
            DebugCommand::Help => {
                self.logger.log_text(HELP_TEXT);
                CommandOutcome::Help(HELP_TEXT)
            }
        }
    }

    pub fn dump_context(&mut self) -> Option<Value> {
        let Some(provider) = self.context_provider.as_ref() else {
            tracing::error!(target: "prompt_debugger", "getContext function not found");
            return None;
        };
        let context = provider.get_context();
        match context.as_ref() {
            Some(ctx) => self.logger.log_raw("Current Context", ctx),
            None => tracing::warn!(target: "prompt_debugger", "host returned no context"),
        }
        context
    }

    /// Checkbox handler: set, persist, report.
    pub fn set_flag(&mut self, flag: SettingFlag, value: bool) {
        self.settings.set(flag, value);
        self.persist_and_report(flag);
    }

    pub fn toggle_flag(&mut self, flag: SettingFlag) -> bool {
        let value = self.settings.toggle(flag);
        self.persist_and_report(flag);
        value
    }

    // A failed save is logged; the in-memory flag keeps its new value.
    fn persist_and_report(&mut self, flag: SettingFlag) {
        if let Err(e) = self.store.save(&self.settings) {
            tracing::error!(target: "prompt_debugger", error = %e, "failed to save settings");
        }
        let value = self.settings.get(flag);
        tracing::debug!(target: "prompt_debugger", %flag, value, "setting changed");
        self.logger.log_text(&flag.status_message(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_namespace_spellings() {
        assert_eq!("dumpContext".parse(), Ok(DebugCommand::DumpContext));
        assert_eq!("dump-context".parse(), Ok(DebugCommand::DumpContext));
        assert_eq!(
            "promptDebugger.toggleVerbose()".parse(),
            Ok(DebugCommand::ToggleVerbose)
        );
        assert_eq!("toggle_enabled".parse(), Ok(DebugCommand::ToggleEnabled));
        assert!("reload".parse::<DebugCommand>().is_err());
    }

    #[test]
    fn names_round_trip_through_parse() {
        for cmd in DebugCommand::ALL {
            assert_eq!(cmd.name().parse(), Ok(cmd));
        }
    }

    #[test]
    fn help_lists_every_command() {
        for cmd in DebugCommand::ALL {
            assert!(HELP_TEXT.contains(cmd.name()), "help misses {}", cmd.name());
        }
    }
}
