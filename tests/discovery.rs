mod common;
use crate::common::pipeline_fs;

use std::fs;

use shaderforge::fs::RealFileSystem;
use shaderforge::shader::ShaderSourceIndex;
use shaderforge_test_utils::builders::{add_shader, single_pass_descriptor};
use shaderforge_test_utils::logs::capture_logs;
use tempfile::tempdir;

#[test]
fn finds_descriptors_recursively_and_skips_hidden_dirs() {
    let fs = pipeline_fs();
    add_shader(&fs, "pipelines", "basic", &single_pass_descriptor());
    add_shader(&fs, "pipelines/materials", "water", &single_pass_descriptor());
    add_shader(&fs, "pipelines/.cache", "ghost", &single_pass_descriptor());
    fs.add_file("pipelines/common.sh", "");

    let mut index = ShaderSourceIndex::new();
    index.discover(&fs, "pipelines");

    assert_eq!(
        index.iter().collect::<Vec<_>>(),
        vec!["pipelines/basic.shd", "pipelines/materials/water.shd"]
    );
}

#[test]
fn rediscovery_is_idempotent() {
    let fs = pipeline_fs();
    add_shader(&fs, "pipelines", "basic", &single_pass_descriptor());

    let mut index = ShaderSourceIndex::new();
    index.discover(&fs, "pipelines");
    index.discover(&fs, "pipelines");
    assert_eq!(index.len(), 1);
}

#[test]
fn missing_root_yields_empty_index() {
    let fs = pipeline_fs();
    let mut index = ShaderSourceIndex::new();
    index.discover(&fs, "does/not/exist");
    assert!(index.is_empty());
}

#[test]
fn insert_normalizes_and_reports_novelty() {
    let mut index = ShaderSourceIndex::new();
    assert!(index.insert("pipelines/./late.shd"));
    assert!(!index.insert("pipelines/late.shd"));
    assert!(index.contains("pipelines/late.shd"));
}

#[test]
fn reverse_lookup_finds_owner_by_basename() {
    let mut index = ShaderSourceIndex::new();
    index.insert("pipelines/materials/water.shd");
    index.insert("pipelines/basic.shd");

    assert_eq!(index.source_from_binary_basename("water_MAIN3_fs"), Some("pipelines/materials/water.shd"));
    assert_eq!(index.source_from_binary_basename("basic_SHADOW0_vs"), Some("pipelines/basic.shd"));
}

#[test]
fn reverse_lookup_without_source_logs_info() {
    let index = ShaderSourceIndex::new();
    let (found, logs) = capture_logs(|| index.source_from_binary_basename("orphan_MAIN0_vs").map(str::to_string));
    assert_eq!(found, None);
    assert_eq!(logs.count(tracing::Level::INFO), 1);
}

#[test]
fn ambiguous_reverse_lookup_prefers_first_and_warns() {
    let mut index = ShaderSourceIndex::new();
    index.insert("pipelines/b/basic.shd");
    index.insert("pipelines/a/basic.shd");

    let (found, logs) = capture_logs(|| index.source_from_binary_basename("basic_MAIN0_vs").map(str::to_string));
    assert_eq!(found.as_deref(), Some("pipelines/a/basic.shd"));
    assert_eq!(logs.count(tracing::Level::WARN), 1);
}

#[test]
fn discovers_on_real_filesystem() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("pipelines");
    fs::create_dir_all(root.join("materials")).unwrap();
    fs::create_dir_all(root.join(".git")).unwrap();
    fs::write(root.join("basic.shd"), "").unwrap();
    fs::write(root.join("materials/water.shd"), "").unwrap();
    fs::write(root.join(".git/hidden.shd"), "").unwrap();
    fs::write(root.join("basic_vs.sc"), "").unwrap();

    let mut index = ShaderSourceIndex::new();
    index.discover(&RealFileSystem, &root.to_string_lossy());

    let found: Vec<String> = index.iter().map(str::to_string).collect();
    assert_eq!(found.len(), 2, "{found:?}");
    assert!(found.iter().any(|p| p.ends_with("pipelines/basic.shd")));
    assert!(found.iter().any(|p| p.ends_with("pipelines/materials/water.shd")));
}
