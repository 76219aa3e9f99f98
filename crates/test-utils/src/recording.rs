use std::sync::{Arc, Mutex};
use std::time::Duration;

use shaderforge::engine::{CompileNotifier, EngineHooks, ResourceReloader, UpdatePause};

/// Everything the engine reported to its collaborators, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum HookEvent {
    Reload(String),
    BeginCompiling,
    EndCompiling(Duration),
    MessageBox(String),
    EnableUpdate(bool),
}

#[derive(Debug, Clone, Default)]
pub struct HookLog {
    events: Arc<Mutex<Vec<HookEvent>>>,
}

impl HookLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: HookEvent) {
        self.events.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<HookEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Descriptors handed to the reloader, in order.
    pub fn reloads(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                HookEvent::Reload(path) => Some(path),
                _ => None,
            })
            .collect()
    }

    pub fn message_boxes(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                HookEvent::MessageBox(msg) => Some(msg),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    /// Hooks that record into this log.
    pub fn hooks(&self) -> EngineHooks {
        EngineHooks {
            reloader: Box::new(Recorder(self.clone())),
            notifier: Box::new(Recorder(self.clone())),
            pause: Box::new(Recorder(self.clone())),
        }
    }
}

struct Recorder(HookLog);

impl ResourceReloader for Recorder {
    fn reload(&mut self, descriptor: &str) {
        self.0.push(HookEvent::Reload(descriptor.to_string()));
    }
}

impl CompileNotifier for Recorder {
    fn begin_compiling(&mut self) {
        self.0.push(HookEvent::BeginCompiling);
    }

    fn end_compiling(&mut self, keep_visible: Duration) {
        self.0.push(HookEvent::EndCompiling(keep_visible));
    }

    fn message_box(&mut self, message: &str) {
        self.0.push(HookEvent::MessageBox(message.to_string()));
    }
}

impl UpdatePause for Recorder {
    fn enable_update(&mut self, enabled: bool) {
        self.0.push(HookEvent::EnableUpdate(enabled));
    }
}
