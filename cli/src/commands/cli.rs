use clap::{Args as ClapArgs, Parser, Subcommand};
use prompt_debugger_core::api::{DebugCommand, SettingFlag};

#[derive(Parser, Debug)]
#[command(name = "prompt-debugger", version, about = "Inspect prompt structures assembled by a chat host")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Explicit config file; skips the ~/.prompt-debugger and ./config.toml lookup.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Override the settings file holding the four debugger flags.
    #[arg(long, global = true)]
    pub settings: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct PruneArgs {
    /// JSON file to read, `-` for stdin.
    #[arg(long, default_value = "-")]
    pub input: String,

    /// Print the input unchanged (pruning disabled).
    #[arg(long, default_value_t = false)]
    pub keep_empty: bool,

    #[arg(long, default_value_t = false)]
    pub compact: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct WatchArgs {
    /// JSONL stream of host events, `-` for stdin.
    #[arg(long, default_value = "-")]
    pub events: String,

    /// JSON file served to `dumpContext`.
    #[arg(long)]
    pub context: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct DebugArgs {
    /// dumpContext, toggleEnabled, toggleVerbose or help.
    #[arg(value_parser = parse_debug_command)]
    pub command: DebugCommand,

    #[arg(long)]
    pub context: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SettingsCommand {
    Show,
    Set {
        #[arg(value_parser = parse_setting_flag)]
        flag: SettingFlag,
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },
}

#[derive(ClapArgs, Debug, Clone)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommand,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Prune one JSON value and print it.
    Prune(PruneArgs),
    /// Dispatch a stream of host events through the debugger.
    Watch(WatchArgs),
    /// Run one command from the debug namespace.
    Debug(DebugArgs),
    /// Show or change the persisted flags.
    Settings(SettingsArgs),
}

fn parse_debug_command(s: &str) -> Result<DebugCommand, String> {
    s.parse()
}

fn parse_setting_flag(s: &str) -> Result<SettingFlag, String> {
    s.parse()
}
