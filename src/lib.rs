// src/lib.rs

pub mod cli;
pub mod config;
pub mod deps;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod shader;
pub mod types;
pub mod watch;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::load_and_validate;
use crate::config::{ConfigFile, PipelineSettings};
use crate::engine::{EngineHooks, Runtime, ShaderCompiler};
use crate::exec::ProcessCompiler;
use crate::fs::{FileSystem, RealFileSystem};
use crate::shader::{plan_variants, ShaderDescriptor, ShaderSourceIndex};
use crate::watch::{spawn_watcher, WatchPatterns};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the shader compiler engine and its compiler backend
/// - (optional) file watcher
/// - the watch-mode runtime with Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)?;
    let settings = cfg.pipeline_settings();
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);

    if args.dry_run {
        print_dry_run(fs.as_ref(), &cfg, &settings);
        return Ok(());
    }

    let compiler = ProcessCompiler::new(&cfg.pipeline.compiler);

    if args.once {
        ShaderCompiler::up_to_date(fs, settings, compiler, EngineHooks::default());
        info!("all shaders up to date");
        return Ok(());
    }

    let mut engine = ShaderCompiler::new(fs, settings, compiler, EngineHooks::default());

    let patterns = WatchPatterns::new(&cfg.watch.patterns, &cfg.watch.exclude)?;
    let handler = Arc::new(engine.watch_filter(patterns));
    let watcher = spawn_watcher(&engine.settings().root, handler)?;
    engine.attach_watcher(watcher);

    let runtime = Runtime::new(engine, Duration::from_millis(cfg.watch.tick_ms));
    runtime.run().await?;
    Ok(())
}

/// Simple dry-run output: every descriptor, whether it is stale and how
/// many variants it would compile.
fn print_dry_run(fs: &dyn FileSystem, cfg: &ConfigFile, settings: &PipelineSettings) {
    println!("shaderforge dry-run");
    println!("  pipeline.root = {}", settings.root);
    println!("  pipeline.backend = {:?}", settings.backend);
    println!("  pipeline.compiler = {}", cfg.pipeline.compiler);
    println!("  compiled dir = {}", settings.compiled_dir);
    println!();

    let mut sources = ShaderSourceIndex::new();
    sources.discover(fs, &settings.root);

    println!("shaders ({}):", sources.len());
    for path in sources.iter() {
        match ShaderDescriptor::load(fs, path) {
            Ok(descriptor) => {
                let stale = shader::is_stale(fs, &descriptor, &settings.compiled_dir);
                let variants = plan_variants(&descriptor, &settings.compiled_dir);
                println!(
                    "  - {path}: {} ({} variants, {} passes)",
                    if stale { "stale" } else { "up to date" },
                    variants.len(),
                    descriptor.passes.len()
                );
            }
            Err(err) => println!("  - {path}: unreadable ({err})"),
        }
    }

    debug!("dry-run complete (no compilation)");
}
