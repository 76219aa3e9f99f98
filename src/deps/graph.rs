// src/deps/graph.rs

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use tracing::{debug, error};

use crate::deps::depfile::{parse_depfile, DEPFILE_EXTENSION};
use crate::fs::path_utils::{basename, has_extension, normalize};
use crate::fs::FileSystem;
use crate::shader::ShaderSourceIndex;

/// Mapping from a dependency path (descriptor, stage source or shared
/// include) to the binary variants that were produced using it.
///
/// The graph is only ever rebuilt wholesale from the dependency files in the
/// compiled directory; it is never patched incrementally.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    edges: BTreeMap<String, BTreeSet<String>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard every edge and rebuild from the `*.d` files in `compiled_dir`.
    ///
    /// Besides the inputs listed in each file, an edge from the owning
    /// descriptor (found via `sources`) to the variant is recorded.
    /// Unreadable dependency files are logged and skipped.
    pub fn rebuild(&mut self, fs: &dyn FileSystem, compiled_dir: &str, sources: &ShaderSourceIndex) {
        self.edges.clear();

        let entries = match fs.read_dir(Path::new(compiled_dir)) {
            Ok(entries) => entries,
            Err(err) => {
                debug!(compiled_dir, error = %err, "no compiled directory to scan for dependencies");
                return;
            }
        };

        let mut depfiles: Vec<_> = entries
            .into_iter()
            .filter(|p| has_extension(&p.to_string_lossy(), DEPFILE_EXTENSION))
            .collect();
        depfiles.sort();

        for path in depfiles {
            let text = match fs.read_to_string(&path) {
                Ok(text) => text,
                Err(err) => {
                    error!(file = ?path, error = %err, "could not open dependency file");
                    continue;
                }
            };
            let Some(depfile) = parse_depfile(&text) else {
                debug!(file = ?path, "dependency file names no binary; skipping");
                continue;
            };

            let variant = normalize(&depfile.variant);
            for input in &depfile.inputs {
                self.add_dependency(input, &variant);
            }
            if let Some(source) = sources.source_from_binary_basename(&basename(&variant)) {
                let source = source.to_string();
                self.add_dependency(&source, &variant);
            }
        }

        debug!(
            dependencies = self.edges.len(),
            "rebuilt shader dependency graph"
        );
    }

    /// Record that `variant` was produced using `dependency`.
    pub fn add_dependency(&mut self, dependency: &str, variant: &str) {
        self.edges
            .entry(normalize(dependency))
            .or_default()
            .insert(variant.to_string());
    }

    pub fn contains(&self, dependency: &str) -> bool {
        self.edges.contains_key(dependency)
    }

    /// Variants recorded against `dependency`, if any.
    pub fn dependents_of(&self, dependency: &str) -> Option<&BTreeSet<String>> {
        self.edges.get(dependency)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.edges.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }
}
