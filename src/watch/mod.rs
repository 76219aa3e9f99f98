// src/watch/mod.rs

//! File watching and change intake.
//!
//! This module is responsible for:
//! - Wiring up a cross-platform filesystem watcher (`notify`).
//! - Filtering changed paths down to shader sources (`globset` patterns).
//! - Handing them to the update loop through the [`ChangeQueue`].
//!
//! It does **not** know about descriptors or the dependency graph; resolving
//! a change to the shaders it affects happens in the engine.

pub mod change_queue;
pub mod patterns;
pub mod watcher;

pub use change_queue::{ChangeQueue, PathChangeHandler, ShaderWatchFilter};
pub use patterns::{WatchPatterns, DEFAULT_WATCH_PATTERNS};
pub use watcher::{spawn_watcher, WatcherHandle};
