use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The four user-facing switches of the debugger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebuggerSettings {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default)]
    pub verbose_logging: bool,

    #[serde(default = "default_filter_out_empty_fields")]
    pub filter_out_empty_fields: bool,

    /// Log context reads and generate calls too. Noisy.
    #[serde(default = "default_hook_all_events")]
    pub hook_all_events: bool,
}

fn default_enabled() -> bool {
    true
}

fn default_filter_out_empty_fields() -> bool {
    true
}

fn default_hook_all_events() -> bool {
    true
}

impl Default for DebuggerSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            verbose_logging: false,
            filter_out_empty_fields: default_filter_out_empty_fields(),
            hook_all_events: default_hook_all_events(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingFlag {
    Enabled,
    VerboseLogging,
    FilterOutEmptyFields,
    HookAllEvents,
}

impl SettingFlag {
    pub const ALL: [SettingFlag; 4] = [
        SettingFlag::Enabled,
        SettingFlag::VerboseLogging,
        SettingFlag::FilterOutEmptyFields,
        SettingFlag::HookAllEvents,
    ];

    /// Name used in the persisted record.
    pub fn key(self) -> &'static str {
        match self {
            SettingFlag::Enabled => "enabled",
            SettingFlag::VerboseLogging => "verboseLogging",
            SettingFlag::FilterOutEmptyFields => "filterOutEmptyFields",
            SettingFlag::HookAllEvents => "hookAllEvents",
        }
    }

    /// Prefix for status messages, e.g. "Verbose logging enabled".
    pub fn status_label(self) -> Option<&'static str> {
        match self {
            SettingFlag::Enabled => None,
            SettingFlag::VerboseLogging => Some("Verbose logging"),
            SettingFlag::FilterOutEmptyFields => Some("Filtering empty fields"),
            SettingFlag::HookAllEvents => Some("Hooking all events"),
        }
    }

    pub fn status_message(self, value: bool) -> String {
        let state = if value { "enabled" } else { "disabled" };
        match self.status_label() {
            Some(label) => format!("Prompt Debugger: {label} {state}"),
            None => format!("Prompt Debugger: {state}"),
        }
    }
}

impl fmt::Display for SettingFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SettingFlag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "enabled" => Ok(SettingFlag::Enabled),
            "verbose" | "verboselogging" => Ok(SettingFlag::VerboseLogging),
            "filterempty" | "filteroutemptyfields" => Ok(SettingFlag::FilterOutEmptyFields),
            "hookall" | "hookallevents" => Ok(SettingFlag::HookAllEvents),
            _ => Err(format!("unknown setting flag: {s}")),
        }
    }
}

impl DebuggerSettings {
    pub fn get(&self, flag: SettingFlag) -> bool {
        match flag {
            SettingFlag::Enabled => self.enabled,
            SettingFlag::VerboseLogging => self.verbose_logging,
            SettingFlag::FilterOutEmptyFields => self.filter_out_empty_fields,
            SettingFlag::HookAllEvents => self.hook_all_events,
        }
    }

    pub fn set(&mut self, flag: SettingFlag, value: bool) {
        let slot = match flag {
            SettingFlag::Enabled => &mut self.enabled,
            SettingFlag::VerboseLogging => &mut self.verbose_logging,
            SettingFlag::FilterOutEmptyFields => &mut self.filter_out_empty_fields,
            SettingFlag::HookAllEvents => &mut self.hook_all_events,
        };
        *slot = value;
    }

    /// Flips `flag` and returns the new value.
    pub fn toggle(&mut self, flag: SettingFlag) -> bool {
        let next = !self.get(flag);
        self.set(flag, next);
        next
    }

    /// Logging of context reads and generate calls needs both switches.
    pub fn hooks_all_events(&self) -> bool {
        self.enabled && self.hook_all_events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_first_run() {
        let s = DebuggerSettings::default();
        assert!(s.enabled);
        assert!(!s.verbose_logging);
        assert!(s.filter_out_empty_fields);
        assert!(s.hook_all_events);
    }

    #[test]
    fn toggle_flips_only_the_named_flag() {
        let mut s = DebuggerSettings::default();
        assert!(s.toggle(SettingFlag::VerboseLogging));
        assert!(s.verbose_logging);
        assert!(s.enabled);
        assert!(!s.toggle(SettingFlag::Enabled));
        assert!(!s.enabled);
        assert!(s.verbose_logging);
    }

    #[test]
    fn serialized_names_are_camel_case() {
        let v = serde_json::to_value(DebuggerSettings::default()).unwrap();
        for flag in SettingFlag::ALL {
            assert!(v.get(flag.key()).is_some(), "missing {}", flag.key());
        }
    }

    #[test]
    fn missing_fields_take_defaults() {
        let s: DebuggerSettings = serde_json::from_str(r#"{"verboseLogging": true}"#).unwrap();
        assert!(s.verbose_logging);
        assert!(s.enabled);
        assert!(s.filter_out_empty_fields);
        assert!(s.hook_all_events);
    }

    #[test]
    fn flag_parsing_accepts_common_spellings() {
        assert_eq!("verbose".parse::<SettingFlag>(), Ok(SettingFlag::VerboseLogging));
        assert_eq!(
            "filter-out-empty-fields".parse::<SettingFlag>(),
            Ok(SettingFlag::FilterOutEmptyFields)
        );
        assert_eq!("hookAllEvents".parse::<SettingFlag>(), Ok(SettingFlag::HookAllEvents));
        assert!("loud".parse::<SettingFlag>().is_err());
    }

    #[test]
    fn status_messages() {
        assert_eq!(
            SettingFlag::Enabled.status_message(false),
            "Prompt Debugger: disabled"
        );
        assert_eq!(
            SettingFlag::VerboseLogging.status_message(true),
            "Prompt Debugger: Verbose logging enabled"
        );
    }
}
