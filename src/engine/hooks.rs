// src/engine/hooks.rs

//! Collaborators the engine reports to.
//!
//! None of them feed anything back into the engine: the reloader is told
//! which descriptors have fresh binaries, the notifier and the pause switch
//! only observe compile-queue transitions.

use std::time::Duration;

use tracing::{error, info};

/// Reloads the shader resource for a descriptor once its binaries are fresh.
pub trait ResourceReloader: Send {
    fn reload(&mut self, descriptor: &str);
}

/// User-facing "compiling" indicator and blocking messages.
pub trait CompileNotifier: Send {
    fn begin_compiling(&mut self);
    fn end_compiling(&mut self, keep_visible: Duration);
    /// Blocking message for problems the user must fix (e.g. a directory
    /// that cannot be created).
    fn message_box(&mut self, message: &str);
}

/// Enables/disables unrelated browsing updates while a drain is running.
pub trait UpdatePause: Send {
    fn enable_update(&mut self, enabled: bool);
}

/// Reloader that only logs; used when no renderer is attached.
#[derive(Debug, Default)]
pub struct LogReloader;

impl ResourceReloader for LogReloader {
    fn reload(&mut self, descriptor: &str) {
        info!(shader = descriptor, "shader binaries up to date; reload requested");
    }
}

#[derive(Debug, Default)]
pub struct LogNotifier;

impl CompileNotifier for LogNotifier {
    fn begin_compiling(&mut self) {
        info!("compiling shaders...");
    }

    fn end_compiling(&mut self, _keep_visible: Duration) {
        info!("shader compilation finished");
    }

    fn message_box(&mut self, message: &str) {
        error!("{message}");
    }
}

#[derive(Debug, Default)]
pub struct NoPause;

impl UpdatePause for NoPause {
    fn enable_update(&mut self, _enabled: bool) {}
}

/// The set of collaborators owned by a [`ShaderCompiler`](super::ShaderCompiler).
pub struct EngineHooks {
    pub reloader: Box<dyn ResourceReloader>,
    pub notifier: Box<dyn CompileNotifier>,
    pub pause: Box<dyn UpdatePause>,
}

impl Default for EngineHooks {
    fn default() -> Self {
        Self {
            reloader: Box::new(LogReloader),
            notifier: Box::new(LogNotifier),
            pause: Box::new(NoPause),
        }
    }
}

impl std::fmt::Debug for EngineHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineHooks").finish_non_exhaustive()
    }
}
