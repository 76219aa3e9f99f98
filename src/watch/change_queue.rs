// src/watch/change_queue.rs

//! Thread-safe inbox between the watcher thread and the update loop.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::trace;

use crate::fs::path_utils::{join, normalize};
use crate::watch::patterns::WatchPatterns;

/// Capability registered with the watcher: called once per changed path,
/// relative to the watched root, from the watcher's own thread.
pub trait PathChangeHandler: Send + Sync {
    fn on_path_changed(&self, rel_path: &str);
}

/// Queue of candidate change paths, not yet resolved against the
/// dependency graph.
///
/// Cloning yields another handle to the same queue. The lock is only held
/// for the push / pop itself.
#[derive(Debug, Clone, Default)]
pub struct ChangeQueue {
    inner: Arc<Mutex<Vec<String>>>,
}

impl ChangeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Append a change; the path is normalized first.
    pub fn push(&self, path: &str) {
        let path = normalize(path);
        trace!(%path, "queued file change");
        self.lock().push(path);
    }

    /// Drop exact duplicates (keeping each path's latest position) and pop
    /// the most recently added path.
    pub fn pop_latest(&self) -> Option<String> {
        let mut changes = self.lock();
        if changes.is_empty() {
            return None;
        }
        dedup_keep_last(&mut changes);
        changes.pop()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

fn dedup_keep_last(items: &mut Vec<String>) {
    let mut kept: Vec<String> = Vec::with_capacity(items.len());
    for item in items.drain(..).rev() {
        if !kept.contains(&item) {
            kept.push(item);
        }
    }
    kept.reverse();
    *items = kept;
}

/// Watcher handler that keeps only shader-relevant paths and queues them
/// prefixed with the pipeline root.
#[derive(Debug, Clone)]
pub struct ShaderWatchFilter {
    root: String,
    patterns: WatchPatterns,
    queue: ChangeQueue,
}

impl ShaderWatchFilter {
    pub fn new(root: &str, patterns: WatchPatterns, queue: ChangeQueue) -> Self {
        Self {
            root: normalize(root),
            patterns,
            queue,
        }
    }
}

impl PathChangeHandler for ShaderWatchFilter {
    fn on_path_changed(&self, rel_path: &str) {
        let rel = normalize(rel_path);
        if !self.patterns.matches(&rel) {
            return;
        }
        self.queue.push(&join(&self.root, &rel));
    }
}
