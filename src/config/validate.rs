// src/config/validate.rs

use std::time::Duration;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, ShaderError};
use crate::watch::patterns::build_globset;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = ShaderError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_pipeline(cfg)?;
    validate_watch(cfg)?;
    validate_notifications(cfg)?;
    validate_defines(cfg)?;
    Ok(())
}

fn config_error(message: impl Into<String>) -> ShaderError {
    ShaderError::ConfigError(message.into())
}

fn validate_pipeline(cfg: &RawConfigFile) -> Result<()> {
    let pipeline = &cfg.pipeline;
    if pipeline.root.trim().is_empty() {
        return Err(config_error("[pipeline].root must not be empty"));
    }
    if pipeline.compiler.trim().is_empty() {
        return Err(config_error("[pipeline].compiler must not be empty"));
    }
    if pipeline.optimization > 3 {
        return Err(config_error(format!(
            "[pipeline].optimization must be between 0 and 3 (got {})",
            pipeline.optimization
        )));
    }
    if pipeline.varying_def.trim().is_empty() {
        return Err(config_error("[pipeline].varying_def must not be empty"));
    }
    Ok(())
}

fn validate_watch(cfg: &RawConfigFile) -> Result<()> {
    if cfg.watch.tick_ms == 0 {
        return Err(config_error("[watch].tick_ms must be >= 1 (got 0)"));
    }
    build_globset(&cfg.watch.patterns)
        .map_err(|e| config_error(format!("[watch].patterns: {e:#}")))?;
    build_globset(&cfg.watch.exclude)
        .map_err(|e| config_error(format!("[watch].exclude: {e:#}")))?;
    Ok(())
}

fn validate_notifications(cfg: &RawConfigFile) -> Result<()> {
    let secs = cfg.notifications.keep_visible_secs;
    if Duration::try_from_secs_f32(secs).is_err() {
        return Err(config_error(format!(
            "[notifications].keep_visible_secs must be a non-negative number of seconds \
             that fits a duration (got {secs})"
        )));
    }
    Ok(())
}

fn validate_defines(cfg: &RawConfigFile) -> Result<()> {
    for (name, text) in cfg.defines.iter() {
        if text.trim().is_empty() {
            return Err(config_error(format!(
                "[defines].{name} must map to a non-empty define"
            )));
        }
    }
    Ok(())
}
