// src/engine/queue.rs

use tracing::debug;

/// Descriptors waiting to be compiled.
///
/// Drained as a stack: the most recently requested descriptor compiles
/// first. Holds no duplicates after each insertion.
#[derive(Debug, Default)]
pub struct CompileQueue {
    entries: Vec<String>,
}

impl CompileQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Push a descriptor unless it is already queued.
    /// Returns `true` if it was added.
    pub fn push(&mut self, path: &str) -> bool {
        if self.entries.iter().any(|p| p == path) {
            debug!(shader = path, "already queued for compilation");
            return false;
        }
        self.entries.push(path.to_string());
        true
    }

    /// Next descriptor to compile (top of the stack).
    pub fn peek(&self) -> Option<&str> {
        self.entries.last().map(|s| s.as_str())
    }

    pub fn pop(&mut self) -> Option<String> {
        self.entries.pop()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.iter().any(|p| p == path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|s| s.as_str())
    }
}

/// Descriptors compiled during the current drain cycle, flushed once the
/// compile queue empties.
#[derive(Debug, Default)]
pub struct ReloadQueue {
    entries: Vec<String>,
}

impl ReloadQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: &str) {
        self.entries.push(path.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Take every distinct entry (first occurrence order) and clear.
    pub fn take_unique(&mut self) -> Vec<String> {
        let mut unique: Vec<String> = Vec::with_capacity(self.entries.len());
        for entry in self.entries.drain(..) {
            if !unique.contains(&entry) {
                unique.push(entry);
            }
        }
        unique
    }
}
