// src/config/settings.rs

use std::collections::BTreeMap;
use std::time::Duration;

use crate::config::model::ConfigFile;
use crate::fs::path_utils::{join, normalize};
use crate::types::RenderBackend;

/// Resolved, normalized paths and compiler options the engine runs with.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    pub root: String,
    pub compiled_dir: String,
    pub include_dir: String,
    pub varying_def: String,
    pub backend: RenderBackend,
    pub optimization: u8,
    /// Renderer define name -> textual define.
    pub defines: BTreeMap<String, String>,
    /// How long the "compiling" notification stays up after a drain.
    pub notification_time: Duration,
}

impl PipelineSettings {
    /// Settings for the default layout under `root`.
    pub fn new(root: &str, backend: RenderBackend) -> Self {
        let root = normalize(root);
        Self {
            compiled_dir: join(&root, backend.compiled_dir_name()),
            include_dir: root.clone(),
            varying_def: join(&root, "varying.def.sc"),
            backend,
            optimization: 3,
            defines: BTreeMap::new(),
            notification_time: Duration::from_secs(3),
            root,
        }
    }

    /// Textual form of a define as passed to the compiler.
    pub fn define_text(&self, name: &str) -> String {
        self.defines
            .get(name)
            .cloned()
            .unwrap_or_else(|| name.to_string())
    }
}

impl ConfigFile {
    pub fn pipeline_settings(&self) -> PipelineSettings {
        let pipeline = &self.pipeline;
        let mut settings = PipelineSettings::new(&pipeline.root, pipeline.backend);
        if let Some(dir) = &pipeline.compiled_dir {
            settings.compiled_dir = normalize(dir);
        }
        if let Some(dir) = &pipeline.include_dir {
            settings.include_dir = normalize(dir);
        }
        settings.varying_def = join(&settings.root, &pipeline.varying_def);
        settings.optimization = pipeline.optimization;
        settings.defines = self.defines.clone();
        // Validation rejects values that do not fit; keep the default otherwise.
        if let Ok(keep_visible) = Duration::try_from_secs_f32(self.notifications.keep_visible_secs) {
            settings.notification_time = keep_visible;
        }
        settings
    }
}
