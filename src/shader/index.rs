// src/shader/index.rs

use std::collections::BTreeSet;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::fs::path_utils::{basename, has_extension, normalize};
use crate::fs::FileSystem;
use crate::shader::descriptor::{source_basename_of_binary, DESCRIPTOR_EXTENSION};

/// Set of known shader descriptor paths under the pipeline root.
///
/// Paths are normalized and kept sorted, so iteration order (and therefore
/// "first match wins" in [`ShaderSourceIndex::source_from_binary_basename`])
/// is deterministic.
#[derive(Debug, Clone, Default)]
pub struct ShaderSourceIndex {
    descriptors: BTreeSet<String>,
}

impl ShaderSourceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the index with every descriptor found under `root`.
    ///
    /// Directories whose name starts with `.` are skipped. Unreadable
    /// directories are skipped silently.
    pub fn discover(&mut self, fs: &dyn FileSystem, root: &str) {
        let mut found = BTreeSet::new();
        walk(fs, &normalize(root), &mut found);
        debug!(root, count = found.len(), "discovered shader descriptors");
        self.descriptors = found;
    }

    /// Add a single descriptor (e.g. one created while watching).
    /// Returns `true` if it was not known before.
    pub fn insert(&mut self, path: &str) -> bool {
        self.descriptors.insert(normalize(path))
    }

    pub fn contains(&self, path: &str) -> bool {
        self.descriptors.contains(path)
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.descriptors.iter().map(|s| s.as_str())
    }

    /// Map a binary basename (`basic_MAIN0_vs`) back to the descriptor it was
    /// compiled from.
    ///
    /// Two descriptors sharing a basename in different directories are
    /// ambiguous; the first one in index order wins and a warning is logged.
    pub fn source_from_binary_basename(&self, binary_basename: &str) -> Option<&str> {
        let wanted = source_basename_of_binary(binary_basename);
        let mut matches = self
            .descriptors
            .iter()
            .filter(|path| basename(path) == wanted);

        match matches.next() {
            Some(first) => {
                if let Some(other) = matches.next() {
                    warn!(
                        binary = binary_basename,
                        chosen = %first,
                        other = %other,
                        "ambiguous shader source for binary; using first match"
                    );
                }
                Some(first.as_str())
            }
            None => {
                info!(binary = binary_basename, "binary shader has no source code");
                None
            }
        }
    }
}

fn walk(fs: &dyn FileSystem, dir: &str, out: &mut BTreeSet<String>) {
    let entries = match fs.read_dir(Path::new(dir)) {
        Ok(entries) => entries,
        Err(err) => {
            debug!(dir, error = %err, "skipping unreadable directory");
            return;
        }
    };

    for entry in entries {
        let Some(name) = entry.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let child = normalize(&entry.to_string_lossy());

        if fs.is_dir(&entry) {
            if !name.starts_with('.') {
                walk(fs, &child, out);
            }
            continue;
        }

        if has_extension(name, DESCRIPTOR_EXTENSION) {
            out.insert(child);
        }
    }
}
