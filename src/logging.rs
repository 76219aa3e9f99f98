// src/logging.rs

//! Logging setup for `shaderforge` using `tracing` + `tracing-subscriber`.
//!
//! Two layers write to STDERR:
//! - engine events, formatted with level and target and filtered by the
//!   resolved level;
//! - external compiler diagnostics (target [`COMPILER_TARGET`]), printed as
//!   bare lines so they read like the compiler's own output. They are never
//!   filtered out, since a failed variant is only explained by them.
//!
//! Level priority for engine events:
//! 1. `--log-level` CLI flag
//! 2. `SHADERFORGE_LOG` environment variable (e.g. "info", "debug")
//! 3. `info`

use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, registry};

use crate::cli::LogLevel;

/// Environment variable consulted when no `--log-level` is given.
pub const LOG_ENV: &str = "SHADERFORGE_LOG";

/// Target under which compiler stdout/stderr lines are logged.
pub const COMPILER_TARGET: &str = "shaderc";

/// Install the global subscriber. Call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env = std::env::var(LOG_ENV).ok();
    let level = resolve_level(cli_level, env.as_deref());

    let engine_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_filter(filter_fn(move |meta| {
            meta.target() != COMPILER_TARGET && *meta.level() <= level
        }));

    let compiler_layer = fmt::layer()
        .without_time()
        .with_level(false)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter_fn(|meta| meta.target() == COMPILER_TARGET));

    registry()
        .with(engine_layer)
        .with(compiler_layer)
        .try_init()
        .context("installing tracing subscriber")?;

    Ok(())
}

/// Effective engine log level: the CLI flag, else a parseable
/// `SHADERFORGE_LOG` value, else `info`.
pub fn resolve_level(cli_level: Option<LogLevel>, env: Option<&str>) -> Level {
    match cli_level {
        Some(lvl) => level_from_log_level(lvl),
        None => env.and_then(parse_level_str).unwrap_or(Level::INFO),
    }
}

fn level_from_log_level(lvl: LogLevel) -> Level {
    match lvl {
        LogLevel::Error => Level::ERROR,
        LogLevel::Warn => Level::WARN,
        LogLevel::Info => Level::INFO,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Trace => Level::TRACE,
    }
}

fn parse_level_str(s: &str) -> Option<Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" | "warning" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}
