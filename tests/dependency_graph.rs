mod common;
use crate::common::{pipeline_fs, COMPILED};

use shaderforge::deps::{parse_depfile, DependencyGraph};
use shaderforge::shader::ShaderSourceIndex;
use shaderforge_test_utils::logs::capture_logs;

fn index_of(paths: &[&str]) -> ShaderSourceIndex {
    let mut index = ShaderSourceIndex::new();
    for path in paths {
        index.insert(path);
    }
    index
}

#[test]
fn depfile_first_tokens_are_variant_and_inputs() {
    let text = "pipelines/compiled/basic_MAIN0_vs.shb : pipelines/basic_vs.sc \\\n  pipelines/common.sh \\\n  pipelines/varying.def.sc\n";
    let depfile = parse_depfile(text).unwrap();

    assert_eq!(depfile.variant, "pipelines/compiled/basic_MAIN0_vs.shb");
    assert_eq!(depfile.inputs, vec!["pipelines/common.sh", "pipelines/varying.def.sc"]);
}

#[test]
fn depfile_tolerates_attached_colon_and_blank_lines() {
    let text = "out.shb: in.sc \\\n\n  \\\n  inc.sh\n";
    let depfile = parse_depfile(text).unwrap();
    assert_eq!(depfile.variant, "out.shb");
    assert_eq!(depfile.inputs, vec!["inc.sh"]);

    assert_eq!(parse_depfile(""), None);
    assert_eq!(parse_depfile("   \n a.sh"), None);
}

#[test]
fn rebuild_links_inputs_and_owning_descriptor() {
    let fs = pipeline_fs();
    fs.add_file(
        "pipelines/compiled/basic_MAIN0_vs.shb.d",
        "pipelines/compiled/basic_MAIN0_vs.shb : pipelines/basic_vs.sc \\\n  pipelines/./common.sh \\\n  pipelines/varying.def.sc\n",
    );
    fs.add_file(
        "pipelines/compiled/water_MAIN0_fs.shb.d",
        "pipelines/compiled/water_MAIN0_fs.shb : pipelines/water_fs.sc \\\n  pipelines/common.sh\n",
    );
    fs.add_file("pipelines/compiled/basic_MAIN0_vs.shb", "bin");

    let sources = index_of(&["pipelines/basic.shd", "pipelines/water.shd"]);
    let mut graph = DependencyGraph::new();
    graph.rebuild(&fs, COMPILED, &sources);

    let common: Vec<&str> = graph
        .dependents_of("pipelines/common.sh")
        .unwrap()
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(
        common,
        vec!["pipelines/compiled/basic_MAIN0_vs.shb", "pipelines/compiled/water_MAIN0_fs.shb"]
    );
    assert!(graph.contains("pipelines/basic.shd"));
    assert!(graph.contains("pipelines/water.shd"));
    assert!(graph.contains("pipelines/varying.def.sc"));
    assert_eq!(graph.len(), 4);
}

#[test]
fn rebuild_discards_previous_edges() {
    let fs = pipeline_fs();
    fs.add_file(
        "pipelines/compiled/basic_MAIN0_vs.shb.d",
        "pipelines/compiled/basic_MAIN0_vs.shb : pipelines/basic_vs.sc \\\n  pipelines/old.sh\n",
    );
    let sources = index_of(&["pipelines/basic.shd"]);
    let mut graph = DependencyGraph::new();
    graph.rebuild(&fs, COMPILED, &sources);
    assert!(graph.contains("pipelines/old.sh"));

    fs.add_file(
        "pipelines/compiled/basic_MAIN0_vs.shb.d",
        "pipelines/compiled/basic_MAIN0_vs.shb : pipelines/basic_vs.sc \\\n  pipelines/new.sh\n",
    );
    graph.rebuild(&fs, COMPILED, &sources);

    assert!(!graph.contains("pipelines/old.sh"));
    assert!(graph.contains("pipelines/new.sh"));
}

#[test]
fn unreadable_depfile_is_logged_and_skipped() {
    let fs = pipeline_fs();
    fs.add_file("pipelines/compiled/bad_MAIN0_vs.shb.d", vec![0xff, 0xfe, 0x00]);
    fs.add_file(
        "pipelines/compiled/basic_MAIN0_vs.shb.d",
        "pipelines/compiled/basic_MAIN0_vs.shb : pipelines/basic_vs.sc \\\n  pipelines/common.sh\n",
    );
    let sources = index_of(&["pipelines/basic.shd"]);
    let mut graph = DependencyGraph::new();

    let ((), logs) = capture_logs(|| graph.rebuild(&fs, COMPILED, &sources));

    assert_eq!(logs.errors(), 1);
    assert!(graph.contains("pipelines/common.sh"));
}

#[test]
fn missing_compiled_dir_leaves_graph_empty() {
    let fs = pipeline_fs();
    let mut graph = DependencyGraph::new();
    graph.add_dependency("pipelines/stale.sh", "x.shb");
    graph.rebuild(&fs, COMPILED, &ShaderSourceIndex::new());
    assert!(graph.is_empty());
}
