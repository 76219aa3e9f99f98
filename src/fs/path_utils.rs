// src/fs/path_utils.rs

//! Lexical path helpers shared by discovery, the dependency graph and the
//! change queue.
//!
//! Every path that is used as a key (source index, dependency graph, queues)
//! goes through [`normalize`] first, so that `pipelines/./a.shd`,
//! `pipelines\a.shd` and `pipelines//a.shd` all compare equal.

use std::path::Path;

/// Normalize a path lexically: forward slashes, no `.` segments, no empty
/// segments, `..` folded into its parent where possible.
///
/// The filesystem is never consulted (no symlink resolution).
pub fn normalize(path: &str) -> String {
    let unified = path.replace('\\', "/");
    let absolute = unified.starts_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in unified.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if absolute => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    match (absolute, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Join `rel` onto `base` and normalize the result.
pub fn join(base: &str, rel: &str) -> String {
    if base.is_empty() || base == "." {
        normalize(rel)
    } else {
        normalize(&format!("{base}/{rel}"))
    }
}

/// Directory / basename / extension split of a path.
///
/// `dir` keeps its trailing separator (empty for bare filenames), so
/// `format!("{}{}", dir, basename)` rebuilds the path without its extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub dir: String,
    pub basename: String,
    pub extension: String,
}

impl FileInfo {
    pub fn new(path: &str) -> Self {
        let path = path.replace('\\', "/");
        let (dir, file) = match path.rfind('/') {
            Some(idx) => (&path[..=idx], &path[idx + 1..]),
            None => ("", path.as_str()),
        };
        let (basename, extension) = match file.rfind('.') {
            Some(idx) => (&file[..idx], &file[idx + 1..]),
            None => (file, ""),
        };
        Self {
            dir: dir.to_string(),
            basename: basename.to_string(),
            extension: extension.to_string(),
        }
    }
}

/// Filename without directory and without extension.
pub fn basename(path: &str) -> String {
    FileInfo::new(path).basename
}

pub fn has_extension(path: &str, ext: &str) -> bool {
    FileInfo::new(path).extension == ext
}

/// Convert a path into a string relative to `root`, with forward slashes.
///
/// - First we try a direct `strip_prefix(root)`.
/// - If that fails (e.g. due to symlinks or different absolute prefixes),
///   we canonicalize both paths and try again.
///
/// Returns `None` if the path cannot be reasonably related to `root`.
pub fn relative_str(root: &Path, path: &Path) -> Option<String> {
    if let Ok(rel) = path.strip_prefix(root) {
        let s = rel.to_string_lossy().replace('\\', "/");
        return Some(s);
    }

    // Different absolute prefixes may be used for the same underlying
    // directory (notably /private/var on macOS).
    if let (Ok(root_canon), Ok(path_canon)) = (root.canonicalize(), path.canonicalize()) {
        if let Ok(rel) = path_canon.strip_prefix(&root_canon) {
            let s = rel.to_string_lossy().replace('\\', "/");
            return Some(s);
        }
    }

    None
}
