#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use prompt_debugger_core::api::{
    DebuggerSettings, MemoryStore, PromptCapture, PromptDebugger, PromptLogger, WriterSink,
    DEFAULT_MAX_DEPTH,
};

/// `io::Write` whose bytes stay readable after the sink is boxed away.
#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub struct Harness {
    pub debugger: PromptDebugger,
    pub console: SharedBuffer,
    pub store: MemoryStore,
    pub captures: Rc<RefCell<Vec<PromptCapture>>>,
}

impl Harness {
    pub fn output(&self) -> String {
        self.console.contents()
    }

    pub fn capture_count(&self) -> usize {
        self.captures.borrow().len()
    }

    pub fn last_capture(&self) -> Option<PromptCapture> {
        self.captures.borrow().last().cloned()
    }
}

pub fn harness(settings: DebuggerSettings) -> Harness {
    harness_with_depth(settings, DEFAULT_MAX_DEPTH)
}

pub fn harness_with_depth(settings: DebuggerSettings, max_depth: usize) -> Harness {
    let console = SharedBuffer::default();
    let store = MemoryStore::with_settings(settings);
    let logger = PromptLogger::new(Box::new(WriterSink::new(console.clone(), false, 2)));
    let mut debugger =
        PromptDebugger::new(Box::new(store.clone()), logger).with_max_depth(max_depth);

    let captures: Rc<RefCell<Vec<PromptCapture>>> = Rc::default();
    let sink = captures.clone();
    debugger.register_observer(Box::new(move |c: &PromptCapture| {
        sink.borrow_mut().push(c.clone())
    }));

    Harness {
        debugger,
        console,
        store,
        captures,
    }
}

pub fn default_harness() -> Harness {
    harness(DebuggerSettings::default())
}
