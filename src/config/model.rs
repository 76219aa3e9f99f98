// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::types::RenderBackend;
use crate::watch::DEFAULT_WATCH_PATTERNS;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [pipeline]
/// root = "pipelines"
/// backend = "opengl"
/// compiler = "shaderc"
///
/// [watch]
/// patterns = ["**/*.sc", "**/*.shd", "**/*.sh"]
///
/// [notifications]
/// keep_visible_secs = 3.0
///
/// [defines]
/// SKINNED = "SKINNED"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    #[serde(default)]
    pub pipeline: PipelineSection,

    #[serde(default)]
    pub watch: WatchSection,

    #[serde(default)]
    pub notifications: NotificationSection,

    /// Renderer define name -> textual define passed to the compiler.
    /// Names not listed are passed through unchanged.
    #[serde(default)]
    pub defines: BTreeMap<String, String>,
}

/// Validated configuration. Only constructible through `TryFrom<RawConfigFile>`
/// (see `validate.rs`).
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub pipeline: PipelineSection,
    pub watch: WatchSection,
    pub notifications: NotificationSection,
    pub defines: BTreeMap<String, String>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(raw: RawConfigFile) -> Self {
        Self {
            pipeline: raw.pipeline,
            watch: raw.watch,
            notifications: raw.notifications,
            defines: raw.defines,
        }
    }
}

/// `[pipeline]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineSection {
    /// Root pipeline directory holding descriptors and stage sources.
    #[serde(default = "default_root")]
    pub root: String,

    #[serde(default)]
    pub backend: RenderBackend,

    /// External shader compiler executable.
    #[serde(default = "default_compiler")]
    pub compiler: String,

    /// Optimization level passed as `-O<n>`.
    #[serde(default = "default_optimization")]
    pub optimization: u8,

    /// Varying definitions file, relative to `root`.
    #[serde(default = "default_varying_def")]
    pub varying_def: String,

    /// Include directory; defaults to `root`.
    #[serde(default)]
    pub include_dir: Option<String>,

    /// Compiled output directory; defaults to `root/<backend dir>`.
    #[serde(default)]
    pub compiled_dir: Option<String>,
}

fn default_root() -> String {
    "pipelines".to_string()
}

fn default_compiler() -> String {
    "shaderc".to_string()
}

fn default_optimization() -> u8 {
    3
}

fn default_varying_def() -> String {
    "varying.def.sc".to_string()
}

impl Default for PipelineSection {
    fn default() -> Self {
        Self {
            root: default_root(),
            backend: RenderBackend::default(),
            compiler: default_compiler(),
            optimization: default_optimization(),
            varying_def: default_varying_def(),
            include_dir: None,
            compiled_dir: None,
        }
    }
}

/// `[watch]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchSection {
    /// Globs (relative to the pipeline root) a change must match to be queued.
    #[serde(default = "default_watch_patterns")]
    pub patterns: Vec<String>,

    #[serde(default)]
    pub exclude: Vec<String>,

    /// Period of the update loop in watch mode.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

fn default_watch_patterns() -> Vec<String> {
    DEFAULT_WATCH_PATTERNS.iter().map(|s| s.to_string()).collect()
}

fn default_tick_ms() -> u64 {
    16
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            patterns: default_watch_patterns(),
            exclude: Vec::new(),
            tick_ms: default_tick_ms(),
        }
    }
}

/// `[notifications]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationSection {
    /// How long the "compiling" notification stays visible once done.
    #[serde(default = "default_keep_visible_secs")]
    pub keep_visible_secs: f32,
}

fn default_keep_visible_secs() -> f32 {
    3.0
}

impl Default for NotificationSection {
    fn default() -> Self {
        Self {
            keep_visible_secs: default_keep_visible_secs(),
        }
    }
}
