// src/engine/core.rs

//! The shader compiler state machine.
//!
//! [`ShaderCompiler`] owns the source index, the dependency graph and the
//! compile/reload queues, and is advanced one unit of work at a time by
//! [`ShaderCompiler::update`]. The only state shared with another thread is
//! the [`ChangeQueue`] the watcher pushes into.

use std::path::Path;
use std::sync::Arc;
use std::time::UNIX_EPOCH;

use tracing::{debug, error, info};

use crate::config::PipelineSettings;
use crate::deps::DependencyGraph;
use crate::engine::hooks::EngineHooks;
use crate::engine::queue::{CompileQueue, ReloadQueue};
use crate::errors::{Result, ShaderError};
use crate::exec::{compile_variants, CompilerBackend};
use crate::fs::path_utils::{basename, has_extension, normalize};
use crate::fs::FileSystem;
use crate::shader::descriptor::{validate_name, DESCRIPTOR_EXTENSION};
use crate::shader::staleness::{is_outdated, is_stale};
use crate::shader::{ShaderDescriptor, ShaderSourceIndex};
use crate::types::ShaderStage;
use crate::watch::{ChangeQueue, ShaderWatchFilter, WatchPatterns, WatcherHandle};

pub struct ShaderCompiler<C: CompilerBackend> {
    fs: Arc<dyn FileSystem>,
    settings: PipelineSettings,
    compiler: C,
    hooks: EngineHooks,
    sources: ShaderSourceIndex,
    dependencies: DependencyGraph,
    changes: ChangeQueue,
    to_compile: CompileQueue,
    to_reload: ReloadQueue,
    /// Whether the "compiling" notification is currently shown.
    notifying: bool,
    watcher: Option<WatcherHandle>,
}

impl<C: CompilerBackend> std::fmt::Debug for ShaderCompiler<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShaderCompiler")
            .field("settings", &self.settings)
            .field("sources", &self.sources.len())
            .field("dependencies", &self.dependencies.len())
            .field("to_compile", &self.to_compile)
            .finish_non_exhaustive()
    }
}

impl<C: CompilerBackend> ShaderCompiler<C> {
    /// Discover descriptors, load the dependency graph from previous
    /// compiler output and queue everything that is out of date.
    ///
    /// Nothing is compiled until [`update`](Self::update) or
    /// [`wait`](Self::wait) is called.
    pub fn new(
        fs: Arc<dyn FileSystem>,
        settings: PipelineSettings,
        compiler: C,
        hooks: EngineHooks,
    ) -> Self {
        let mut this = Self {
            fs,
            settings,
            compiler,
            hooks,
            sources: ShaderSourceIndex::new(),
            dependencies: DependencyGraph::new(),
            changes: ChangeQueue::new(),
            to_compile: CompileQueue::new(),
            to_reload: ReloadQueue::new(),
            notifying: false,
            watcher: None,
        };

        this.sources.discover(this.fs.as_ref(), &this.settings.root);
        info!(
            root = %this.settings.root,
            shaders = this.sources.len(),
            "shader sources discovered"
        );
        this.rebuild_dependencies();
        this.make_up_to_date(false);
        this
    }

    /// [`new`](Self::new) followed by [`wait`](Self::wait): every stale
    /// descriptor is compiled before this returns. The admission pass runs
    /// exactly once.
    pub fn up_to_date(
        fs: Arc<dyn FileSystem>,
        settings: PipelineSettings,
        compiler: C,
        hooks: EngineHooks,
    ) -> Self {
        let mut this = Self::new(fs, settings, compiler, hooks);
        this.wait();
        this
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    pub fn sources(&self) -> &ShaderSourceIndex {
        &self.sources
    }

    pub fn dependencies(&self) -> &DependencyGraph {
        &self.dependencies
    }

    pub fn compile_queue(&self) -> &CompileQueue {
        &self.to_compile
    }

    pub fn compiler(&self) -> &C {
        &self.compiler
    }

    pub fn compiler_mut(&mut self) -> &mut C {
        &mut self.compiler
    }

    /// Another handle to the change inbox; safe to push from any thread.
    pub fn changes(&self) -> ChangeQueue {
        self.changes.clone()
    }

    /// Watcher handler that feeds this compiler's change inbox.
    pub fn watch_filter(&self, patterns: WatchPatterns) -> ShaderWatchFilter {
        ShaderWatchFilter::new(&self.settings.root, patterns, self.changes.clone())
    }

    /// Keep the watcher alive for as long as this compiler lives.
    pub fn attach_watcher(&mut self, watcher: WatcherHandle) {
        self.watcher = Some(watcher);
    }

    /// `true` when no drain cycle is in progress.
    pub fn is_idle(&self) -> bool {
        self.to_compile.is_empty()
    }

    /// One unit of work: admit at most one change, then compile at most one
    /// descriptor. When that empties the compile queue, pending reloads are
    /// flushed and the dependency graph is rebuilt.
    pub fn update(&mut self) {
        self.process_changed_files();
        self.update_notifications();

        let Some(path) = self.to_compile.peek().map(str::to_string) else {
            return;
        };

        self.hooks.pause.enable_update(false);
        self.compile(&path);
        self.to_compile.pop();

        if self.to_compile.is_empty() {
            self.reload_shaders();
            self.rebuild_dependencies();
            self.hooks.pause.enable_update(true);
            self.update_notifications();
        }
    }

    /// Run [`update`](Self::update) until the compile queue is empty.
    pub fn wait(&mut self) {
        while !self.to_compile.is_empty() {
            self.update();
        }
    }

    /// Queue every descriptor whose binaries are missing or older than their
    /// sources, plus every descriptor owning a variant that is older than a
    /// recorded dependency. Optionally blocks until everything is compiled.
    ///
    /// Does nothing while a drain cycle is in progress.
    pub fn make_up_to_date(&mut self, wait: bool) {
        if !self.to_compile.is_empty() {
            if wait {
                self.wait();
            }
            return;
        }
        if self.sources.is_empty() {
            return;
        }

        if let Err(err) = self.ensure_directories() {
            self.hooks.notifier.message_box(&err.to_string());
            return;
        }

        let mut stale: Vec<String> = Vec::new();
        for path in self.sources.iter() {
            let descriptor = match ShaderDescriptor::load(self.fs.as_ref(), path) {
                Ok(descriptor) => descriptor,
                Err(err) => {
                    error!(shader = path, error = %err, "could not open shader descriptor");
                    continue;
                }
            };
            if is_stale(self.fs.as_ref(), &descriptor, &self.settings.compiled_dir) {
                stale.push(path.to_string());
            }
        }

        for (dependency, variants) in self.dependencies.iter() {
            let changed_at = self
                .fs
                .modified(Path::new(dependency))
                .unwrap_or(UNIX_EPOCH);
            for variant in variants {
                if !is_outdated(self.fs.as_ref(), variant, Some(changed_at)) {
                    continue;
                }
                if let Some(source) = self.sources.source_from_binary_basename(&basename(variant)) {
                    stale.push(source.to_string());
                }
            }
        }

        for path in stale {
            self.enqueue(&path);
        }
        debug!(queued = self.to_compile.len(), "shader admission pass finished");

        if wait {
            self.wait();
        }
    }

    /// Resolve one pending change into descriptors to compile.
    ///
    /// Blocked entirely while the compile queue is non-empty, so a drain
    /// cycle always finishes before new changes are admitted.
    pub fn process_changed_files(&mut self) {
        if !self.to_compile.is_empty() {
            return;
        }
        let Some(changed) = self.changes.pop_latest() else {
            return;
        };

        let mut path = normalize(&changed);
        let mut known = self.dependencies.contains(&path);
        if !known {
            if let Some(descriptor) = descriptor_for_stage_source(&path) {
                path = descriptor;
                known = self.dependencies.contains(&path);
            }
        }

        if !known {
            self.admit_untracked(&path);
            return;
        }

        if has_extension(&path, DESCRIPTOR_EXTENSION) {
            self.enqueue(&path);
            return;
        }

        // Shared include: fan out to every descriptor that used it.
        let mut owners: Vec<String> = Vec::new();
        if let Some(variants) = self.dependencies.dependents_of(&path) {
            for variant in variants {
                if let Some(source) = self.sources.source_from_binary_basename(&basename(variant)) {
                    if !owners.iter().any(|o| o == source) {
                        owners.push(source.to_string());
                    }
                }
            }
        }
        debug!(dependency = %path, shaders = ?owners, "dependency changed");
        for owner in owners {
            self.enqueue(&owner);
        }
    }

    /// Compile every variant of one descriptor and schedule it for reload.
    ///
    /// Descriptors whose basename contains the variant separator are
    /// rejected. Individual variant failures are logged and do not prevent
    /// the reload.
    pub fn compile(&mut self, path: &str) {
        if validate_name(path).is_err() {
            error!(
                shader = path,
                "Shaders with underscore are not supported. {} will not be compiled.", path
            );
            return;
        }

        if let Err(err) = self.ensure_compiled_dir() {
            self.hooks.notifier.message_box(&err.to_string());
            return;
        }

        let descriptor = match ShaderDescriptor::load(self.fs.as_ref(), path) {
            Ok(descriptor) => descriptor,
            Err(err) => {
                error!(shader = path, error = %err, "could not open shader descriptor");
                return;
            }
        };

        compile_variants(&mut self.compiler, &self.settings, &descriptor);
        self.to_reload.push(path);
    }

    /// Admission with the naming rule applied. Returns `true` if queued.
    fn enqueue(&mut self, path: &str) -> bool {
        if validate_name(path).is_err() {
            error!(
                shader = path,
                "Shaders with underscore are not supported. {} will not be compiled.", path
            );
            return false;
        }
        self.to_compile.push(path)
    }

    /// A change that no compiled variant depends on. Descriptors (including
    /// ones created since discovery) are compiled; anything else is ignored.
    fn admit_untracked(&mut self, path: &str) {
        if !has_extension(path, DESCRIPTOR_EXTENSION) {
            debug!(path, "change does not affect any compiled shader");
            return;
        }
        if !self.sources.contains(path) {
            if !self.fs.is_file(Path::new(path)) {
                debug!(path, "descriptor no longer exists");
                return;
            }
            self.sources.insert(path);
            info!(shader = path, "discovered new shader descriptor");
        }
        self.enqueue(path);
    }

    fn reload_shaders(&mut self) {
        for path in self.to_reload.take_unique() {
            self.hooks.reloader.reload(&path);
        }
    }

    fn rebuild_dependencies(&mut self) {
        self.dependencies
            .rebuild(self.fs.as_ref(), &self.settings.compiled_dir, &self.sources);
    }

    fn update_notifications(&mut self) {
        if !self.to_compile.is_empty() && !self.notifying {
            self.hooks.notifier.begin_compiling();
            self.notifying = true;
        }
        if self.to_compile.is_empty() && self.notifying {
            self.hooks
                .notifier
                .end_compiling(self.settings.notification_time);
            self.notifying = false;
        }
    }

    fn ensure_directories(&self) -> Result<()> {
        ensure_dir(self.fs.as_ref(), &self.settings.root)?;
        self.ensure_compiled_dir()
    }

    fn ensure_compiled_dir(&self) -> Result<()> {
        ensure_dir(self.fs.as_ref(), &self.settings.compiled_dir)
    }
}

fn ensure_dir(fs: &dyn FileSystem, dir: &str) -> Result<()> {
    let path = Path::new(dir);
    if fs.is_dir(path) {
        return Ok(());
    }
    fs.create_dir_all(path).map_err(|err| {
        ShaderError::Environment(format!(
            "Could not create directory {dir} ({err:#}). Please create it and restart."
        ))
    })
}

/// `foo_vs.sc` / `foo_fs.sc` -> `foo.shd`.
fn descriptor_for_stage_source(path: &str) -> Option<String> {
    ShaderStage::ALL.iter().find_map(|stage| {
        path.strip_suffix(stage.source_suffix())
            .filter(|stem| !stem.is_empty() && !stem.ends_with('/'))
            .map(|stem| format!("{stem}.{DESCRIPTOR_EXTENSION}"))
    })
}
