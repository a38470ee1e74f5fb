//! Embedding the debugger in a host: push hook events in, watch captures come out.

use std::cell::RefCell;
use std::rc::Rc;

use prompt_debugger_core::api::{
    DebugCommand, HookPoint, HostEvent, MemoryStore, PromptCapture, PromptDebugger, PromptLogger,
    StaticContext,
};
use serde_json::json;

fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    let store = MemoryStore::new();
    let mut debugger = PromptDebugger::new(Box::new(store.clone()), PromptLogger::stdout(true, 2))
        .with_context_provider(Box::new(StaticContext(json!({"chatId": "demo"}))));

    let sizes: Rc<RefCell<Vec<(String, usize)>>> = Rc::default();
    let sink = sizes.clone();
    debugger.register_observer(Box::new(move |c: &PromptCapture| {
        let fields = c.prompt.as_object().map(|m| m.len()).unwrap_or(0);
        sink.borrow_mut().push((c.source.clone(), fields));
    }));

    debugger.announce_capabilities(&[HookPoint::ChatCompletionPromptReady, HookPoint::GetContext]);

    debugger.dispatch(HostEvent::ChatCompletionPromptReady {
        payload: json!({
            "prompt_struct": {
                "char_prompt": {"text": [{"content": "You are a helpful bard."}], "extension": {}},
                "user_prompt": {"text": [], "additional_chat_log": []},
                "chat_log": [{"name": "user", "content": "Sing!", "files": []}]
            }
        }),
    });

    debugger.run_command(DebugCommand::ToggleVerbose);
    debugger.dispatch(HostEvent::BuildPromptStruct {
        result: json!({"world_prompt": {"text": [{"content": "A tavern."}]}, "plugin_prompts": {}}),
    });
    debugger.run_command(DebugCommand::DumpContext);

    for (source, fields) in sizes.borrow().iter() {
        println!("{source}: {fields} top-level fields");
    }
    println!("settings saved {} time(s)", store.save_count());
}
