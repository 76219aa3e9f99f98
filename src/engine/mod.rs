// src/engine/mod.rs

//! Orchestration engine for shaderforge.
//!
//! - [`core`] holds the [`ShaderCompiler`] state machine: change
//!   resolution, the compile queue, per-descriptor compilation and the
//!   reload/dependency refresh at the end of each drain cycle.
//! - [`queue`] contains the compile and reload queues.
//! - [`hooks`] defines the collaborators the engine reports to.
//! - [`runtime`] is the async shell that ticks the engine in watch mode.

pub mod core;
pub mod hooks;
pub mod queue;
pub mod runtime;

pub use core::ShaderCompiler;
pub use hooks::{CompileNotifier, EngineHooks, ResourceReloader, UpdatePause};
pub use queue::{CompileQueue, ReloadQueue};
pub use runtime::Runtime;
