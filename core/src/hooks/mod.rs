pub mod debugger;
pub mod types;

pub use debugger::{empty_single_part_prompt, PromptDebugger};
pub use types::{
    ContextProvider, HookPoint, HookResponse, HostEvent, PromptCapture, PromptObserver,
    StaticContext,
};
