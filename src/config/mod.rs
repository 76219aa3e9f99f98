// src/config/mod.rs

//! Configuration loading and validation for shaderforge.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate basic invariants (`validate.rs`).
//! - Resolve the paths the engine works with (`settings.rs`).

pub mod loader;
pub mod model;
pub mod settings;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{
    ConfigFile, NotificationSection, PipelineSection, RawConfigFile, WatchSection,
};
pub use settings::PipelineSettings;
