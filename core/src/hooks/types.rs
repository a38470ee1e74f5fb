use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Places in the host where prompt data can be observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookPoint {
    ChatCompletionPromptReady,
    GetContext,
    Generate,
    BuildPromptStruct,
    PromptBuilder,
    PluginGetPrompt,
    PluginReplyHandler,
}

impl HookPoint {
    pub const ALL: [HookPoint; 7] = [
        HookPoint::ChatCompletionPromptReady,
        HookPoint::GetContext,
        HookPoint::Generate,
        HookPoint::BuildPromptStruct,
        HookPoint::PromptBuilder,
        HookPoint::PluginGetPrompt,
        HookPoint::PluginReplyHandler,
    ];

    /// Source label shown in the console group title.
    pub fn label(self) -> &'static str {
        match self {
            HookPoint::ChatCompletionPromptReady => "CHAT_COMPLETION_PROMPT_READY",
            HookPoint::GetContext => "getContext",
            HookPoint::Generate => "Generate",
            HookPoint::BuildPromptStruct => "buildPromptStruct",
            HookPoint::PromptBuilder => "promptBuilder",
            HookPoint::PluginGetPrompt => "Plugin API GetPrompt",
            HookPoint::PluginReplyHandler => "Plugin API ReplyHandler",
        }
    }
}

impl fmt::Display for HookPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One intercepted host call. Serialized as a JSONL record tagged by `hook`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "hook", rename_all = "snake_case")]
pub enum HostEvent {
    ChatCompletionPromptReady {
        #[serde(default)]
        payload: Value,
    },
    GetContext {
        #[serde(default)]
        context: Value,
    },
    Generate {
        #[serde(default)]
        args: Value,
    },
    BuildPromptStruct {
        #[serde(default)]
        result: Value,
    },
    PromptBuilder {
        #[serde(default)]
        args: Value,
        #[serde(default)]
        result: Value,
    },
    PluginGetPrompt {
        #[serde(default)]
        arg: Value,
        #[serde(default)]
        prompt_struct: Value,
        #[serde(default)]
        detail_level: Value,
    },
    PluginReplyHandler {
        #[serde(default)]
        reply: Value,
        #[serde(default)]
        args: Value,
    },
}

impl HostEvent {
    pub fn hook_point(&self) -> HookPoint {
        match self {
            HostEvent::ChatCompletionPromptReady { .. } => HookPoint::ChatCompletionPromptReady,
            HostEvent::GetContext { .. } => HookPoint::GetContext,
            HostEvent::Generate { .. } => HookPoint::Generate,
            HostEvent::BuildPromptStruct { .. } => HookPoint::BuildPromptStruct,
            HostEvent::PromptBuilder { .. } => HookPoint::PromptBuilder,
            HostEvent::PluginGetPrompt { .. } => HookPoint::PluginGetPrompt,
            HostEvent::PluginReplyHandler { .. } => HookPoint::PluginReplyHandler,
        }
    }
}

/// What the host should do after a hook ran.
#[derive(Debug, Clone, PartialEq)]
pub enum HookResponse {
    Continue,
    /// Prompt contribution returned from the plugin interface.
    Prompt(Value),
    Reply { intercepted: bool },
}

/// A logged prompt structure, already pruned per the active settings.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptCapture {
    pub source: String,
    pub timestamp: DateTime<Utc>,
    pub prompt: Value,
}

impl PromptCapture {
    pub fn new(source: impl Into<String>, prompt: Value) -> Self {
        Self {
            source: source.into(),
            timestamp: Utc::now(),
            prompt,
        }
    }

    pub fn timestamp_iso(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

pub trait PromptObserver {
    fn on_capture(&mut self, capture: &PromptCapture);
}

impl<F> PromptObserver for F
where
    F: FnMut(&PromptCapture),
{
    fn on_capture(&mut self, capture: &PromptCapture) {
        self(capture)
    }
}

/// Host callback behind `dumpContext`.
pub trait ContextProvider {
    fn get_context(&self) -> Option<Value>;
}

/// A fixed context snapshot, e.g. loaded from a file.
#[derive(Debug, Clone)]
pub struct StaticContext(pub Value);

impl ContextProvider for StaticContext {
    fn get_context(&self) -> Option<Value> {
        Some(self.0.clone())
    }
}
