// src/watch/patterns.rs

use std::fmt;

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};

/// Patterns a change must match to be queued by default: stage sources,
/// descriptors and shared includes.
pub const DEFAULT_WATCH_PATTERNS: [&str; 3] = ["**/*.sc", "**/*.shd", "**/*.sh"];

/// Compiled watch/exclude glob patterns.
///
/// The patterns are relative to the pipeline root; the watcher passes
/// relative paths (e.g. `"materials/basic.shd"`) into [`WatchPatterns::matches`].
#[derive(Clone)]
pub struct WatchPatterns {
    watch_set: GlobSet,
    exclude_set: Option<GlobSet>,
}

impl fmt::Debug for WatchPatterns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchPatterns")
            .field("watch", &self.watch_set.len())
            .field("exclude", &self.exclude_set.as_ref().map(GlobSet::len))
            .finish()
    }
}

impl WatchPatterns {
    pub fn new(watch: &[String], exclude: &[String]) -> Result<Self> {
        let watch_set = build_globset(watch).context("building watch globset")?;
        let exclude_set = if exclude.is_empty() {
            None
        } else {
            Some(build_globset(exclude).context("building exclude globset")?)
        };
        Ok(Self {
            watch_set,
            exclude_set,
        })
    }

    /// Returns true if a change to `rel_path` (relative to the pipeline
    /// root) should be queued.
    pub fn matches(&self, rel_path: &str) -> bool {
        if !self.watch_set.is_match(rel_path) {
            return false;
        }
        if let Some(exclude) = &self.exclude_set {
            if exclude.is_match(rel_path) {
                return false;
            }
        }
        true
    }
}

impl Default for WatchPatterns {
    fn default() -> Self {
        let watch: Vec<String> = DEFAULT_WATCH_PATTERNS.iter().map(|s| s.to_string()).collect();
        let watch_set = build_globset(&watch).unwrap_or_else(|_| GlobSet::empty());
        Self {
            watch_set,
            exclude_set: None,
        }
    }
}

/// Build a GlobSet from simple string patterns.
pub fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = Glob::new(pat).with_context(|| format!("invalid glob pattern: {pat}"))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}
