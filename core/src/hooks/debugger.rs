use serde_json::{json, Value};

use crate::logger::PromptLogger;
use crate::prune::{is_truthy, Pruner, DEFAULT_MAX_DEPTH};
use crate::settings::{DebuggerSettings, SettingsStore};

use super::types::{
    ContextProvider, HookPoint, HookResponse, HostEvent, PromptCapture, PromptObserver,
};

/// Owns the settings record and turns host hook events into console output.
///
/// The integration layer that attaches to the host pushes `HostEvent`s in;
/// nothing here rewrites or wraps host functions.
pub struct PromptDebugger {
    pub(crate) settings: DebuggerSettings,
    pub(crate) store: Box<dyn SettingsStore>,
    pub(crate) logger: PromptLogger,
    pub(crate) context_provider: Option<Box<dyn ContextProvider>>,
    observers: Vec<Box<dyn PromptObserver>>,
    max_depth: usize,
}

impl PromptDebugger {
    /// Loads settings from `store`. A store that cannot be read leaves the
    /// defaults in place.
    pub fn new(store: Box<dyn SettingsStore>, logger: PromptLogger) -> Self {
        let settings = match store.load() {
            Ok(Some(s)) => s,
            Ok(None) => DebuggerSettings::default(),
            Err(e) => {
                tracing::error!(
                    target: "prompt_debugger",
                    error = %e,
                    "failed to load settings, using defaults"
                );
                DebuggerSettings::default()
            }
        };
        Self::with_settings(settings, store, logger)
    }

    pub fn with_settings(
        settings: DebuggerSettings,
        store: Box<dyn SettingsStore>,
        logger: PromptLogger,
    ) -> Self {
        Self {
            settings,
            store,
            logger,
            context_provider: None,
            observers: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_context_provider(mut self, provider: Box<dyn ContextProvider>) -> Self {
        self.context_provider = Some(provider);
        self
    }

    pub fn settings(&self) -> &DebuggerSettings {
        &self.settings
    }

    pub fn register_observer(&mut self, observer: Box<dyn PromptObserver>) {
        self.observers.push(observer);
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn pruner(&self) -> Pruner {
        Pruner::new(self.settings.filter_out_empty_fields).with_max_depth(self.max_depth)
    }

    /// Prunes and logs one prompt structure, then notifies observers.
    pub fn log_prompt_struct(&mut self, prompt: &Value, source: &str) {
        if !self.settings.enabled {
            return;
        }
        let pruned = self.pruner().prune(prompt).into_owned();
        let capture = PromptCapture::new(source, pruned);
        self.logger
            .log_capture(&capture, self.settings.verbose_logging);
        for observer in self.observers.iter_mut() {
            observer.on_capture(&capture);
        }
    }

    #[tracing::instrument(name = "prompt_debugger.dispatch", skip_all, fields(hook = %event.hook_point()))]
    pub fn dispatch(&mut self, event: HostEvent) -> HookResponse {
        match event {
            HostEvent::ChatCompletionPromptReady { payload } => {
                self.on_chat_completion_prompt_ready(&payload);
                HookResponse::Continue
            }
            HostEvent::GetContext { context } => {
                if self.settings.hooks_all_events() {
                    tracing::info!(target: "prompt_debugger", "Context captured from getContext()");
                    self.logger.log_raw("Context", &context);
                }
                HookResponse::Continue
            }
            HostEvent::Generate { args } => {
                if self.settings.hooks_all_events() {
                    tracing::info!(target: "prompt_debugger", "Generate function called");
                    self.logger.log_raw("Generate args", &args);
                }
                HookResponse::Continue
            }
            HostEvent::BuildPromptStruct { result } => {
                if self.settings.enabled {
                    tracing::info!(target: "prompt_debugger", "Captured prompt from buildPromptStruct");
                    self.log_prompt_struct(&result, HookPoint::BuildPromptStruct.label());
                }
                HookResponse::Continue
            }
            HostEvent::PromptBuilder { args, result } => {
                if self.settings.enabled {
                    tracing::info!(target: "prompt_debugger", "Captured prompt from promptBuilder");
                    self.logger.log_raw("promptBuilder arguments", &args);
                    self.logger.log_raw("promptBuilder result", &result);
                }
                HookResponse::Continue
            }
            HostEvent::PluginGetPrompt {
                arg,
                prompt_struct,
                detail_level,
            } => HookResponse::Prompt(self.plugin_get_prompt(&arg, &prompt_struct, &detail_level)),
            HostEvent::PluginReplyHandler { reply, args } => HookResponse::Reply {
                intercepted: self.plugin_reply_handler(&reply, &args),
            },
        }
    }

    fn on_chat_completion_prompt_ready(&mut self, payload: &Value) {
        if !self.settings.enabled {
            return;
        }
        tracing::debug!(target: "prompt_debugger", %payload, "CHAT_COMPLETION_PROMPT_READY event triggered");
        match payload.get("prompt_struct").filter(|v| is_truthy(v)) {
            Some(prompt) => {
                tracing::info!(
                    target: "prompt_debugger",
                    "Captured prompt from CHAT_COMPLETION_PROMPT_READY event"
                );
                self.log_prompt_struct(prompt, HookPoint::ChatCompletionPromptReady.label());
            }
            None => tracing::warn!(
                target: "prompt_debugger",
                "No prompt structure available in CHAT_COMPLETION_PROMPT_READY payload"
            ),
        }
    }

    /// Observes the prompt and contributes nothing to it.
    pub fn plugin_get_prompt(
        &mut self,
        arg: &Value,
        prompt_struct: &Value,
        detail_level: &Value,
    ) -> Value {
        if self.settings.enabled {
            tracing::info!(
                target: "prompt_debugger",
                %arg,
                %detail_level,
                "GetPrompt called via plugin API"
            );
            self.log_prompt_struct(prompt_struct, HookPoint::PluginGetPrompt.label());
        }
        empty_single_part_prompt()
    }

    /// Always returns `false`: the reply is never intercepted.
    pub fn plugin_reply_handler(&mut self, reply: &Value, args: &Value) -> bool {
        if self.settings.hooks_all_events() {
            tracing::info!(target: "prompt_debugger", %reply, "ReplyHandler called");
            if let Some(prompt) = args.get("prompt_struct").filter(|v| is_truthy(v)) {
                self.log_prompt_struct(prompt, HookPoint::PluginReplyHandler.label());
            }
        }
        false
    }

    /// Startup scan report of the hook points the host offers.
    pub fn announce_capabilities(&self, available: &[HookPoint]) {
        if !self.settings.enabled {
            return;
        }
        tracing::info!(target: "prompt_debugger", "Scanning for available host hook points...");
        for hook in HookPoint::ALL {
            if available.contains(&hook) {
                tracing::info!(target: "prompt_debugger", hook = %hook, "Found hook point");
            } else {
                tracing::debug!(target: "prompt_debugger", hook = %hook, "hook point not offered by host");
            }
        }
    }
}

pub fn empty_single_part_prompt() -> Value {
    json!({
        "text": [],
        "additional_chat_log": [],
        "extension": {}
    })
}
