//! Console output for captured prompts.

pub mod render;
pub mod sink;

use serde_json::Value;

use crate::error::DebuggerError;
use crate::hooks::PromptCapture;

pub use render::render_capture;
pub use sink::{ConsoleSink, Tone, WriterSink};

pub struct PromptLogger {
    sink: Box<dyn ConsoleSink>,
}

impl PromptLogger {
    pub fn new(sink: Box<dyn ConsoleSink>) -> Self {
        Self { sink }
    }

    pub fn stdout(ansi: bool, indent: usize) -> Self {
        Self::new(Box::new(WriterSink::stdout(ansi, indent)))
    }

    /// Never fails: render and write errors are reported through tracing.
    pub fn log_capture(&mut self, capture: &PromptCapture, verbose: bool) {
        if let Err(e) = render_capture(self.sink.as_mut(), capture, verbose) {
            tracing::error!(
                target: "prompt_debugger",
                source = %capture.source,
                error = %e,
                "Error in Prompt Debugger while logging prompt structure"
            );
        }
    }

    /// Unpruned `label: value` dump, used for context and call-argument hooks.
    pub fn log_raw(&mut self, label: &str, value: &Value) {
        if let Err(e) = self.try_log_raw(label, value) {
            tracing::error!(
                target: "prompt_debugger",
                label,
                error = %e,
                "Error in Prompt Debugger while logging value"
            );
        }
    }

    fn try_log_raw(&mut self, label: &str, value: &Value) -> Result<(), DebuggerError> {
        let body = render::pretty(Some(value))?;
        self.sink.line(&format!("{label}: {body}"), Tone::Plain)?;
        self.sink.flush()?;
        Ok(())
    }

    /// Plain text such as the help listing.
    pub fn log_text(&mut self, text: &str) {
        if let Err(e) = self
            .sink
            .line(text, Tone::Plain)
            .and_then(|_| self.sink.flush())
        {
            tracing::error!(target: "prompt_debugger", error = %e, "console write failed");
        }
    }
}
