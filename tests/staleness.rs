mod common;
use crate::common::{pipeline_fs, COMPILED};

use shaderforge::fs::mock::MockFileSystem;
use shaderforge::fs::FileSystem;
use shaderforge::shader::staleness::{baseline, is_outdated};
use shaderforge::shader::{is_stale, plan_variants, ShaderDescriptor};
use shaderforge_test_utils::builders::{add_shader, single_pass_descriptor, DescriptorBuilder};

fn load(fs: &MockFileSystem, path: &str) -> ShaderDescriptor {
    ShaderDescriptor::load(fs, path).unwrap()
}

/// Write every planned binary so that it is newer than all sources.
fn compile_all(fs: &MockFileSystem, descriptor: &ShaderDescriptor) {
    for variant in plan_variants(descriptor, COMPILED) {
        fs.add_file(&variant.output, "bin");
    }
}

#[test]
fn missing_binaries_make_a_descriptor_stale() {
    let fs = pipeline_fs();
    add_shader(&fs, "pipelines", "basic", &single_pass_descriptor());
    let descriptor = load(&fs, "pipelines/basic.shd");

    assert!(is_stale(&fs, &descriptor, COMPILED));
}

#[test]
fn fresh_binaries_are_up_to_date() {
    let fs = pipeline_fs();
    add_shader(&fs, "pipelines", "basic", &single_pass_descriptor());
    let descriptor = load(&fs, "pipelines/basic.shd");
    compile_all(&fs, &descriptor);

    assert!(!is_stale(&fs, &descriptor, COMPILED));
    assert!(!is_stale(&fs, &descriptor, COMPILED), "second check must agree");
}

#[test]
fn touching_any_input_makes_it_stale_again() {
    for input in ["pipelines/basic.shd", "pipelines/basic_vs.sc", "pipelines/basic_fs.sc"] {
        let fs = pipeline_fs();
        add_shader(&fs, "pipelines", "basic", &single_pass_descriptor());
        let descriptor = load(&fs, "pipelines/basic.shd");
        compile_all(&fs, &descriptor);

        fs.touch(input);
        assert!(is_stale(&fs, &descriptor, COMPILED), "touching {input}");
    }
}

#[test]
fn missing_stage_source_forces_recompile() {
    let fs = pipeline_fs();
    add_shader(&fs, "pipelines", "basic", &single_pass_descriptor());
    let descriptor = load(&fs, "pipelines/basic.shd");
    compile_all(&fs, &descriptor);
    fs.remove_file("pipelines/basic_fs.sc");

    assert_eq!(baseline(&fs, &descriptor), None);
    assert!(is_stale(&fs, &descriptor, COMPILED));
}

#[test]
fn binaries_outside_the_local_mask_are_ignored() {
    let fs = pipeline_fs();
    let builder = DescriptorBuilder::new()
        .define("SKINNED")
        .define("FUR")
        .pass("MAIN", &["SKINNED"], &[]);
    add_shader(&fs, "pipelines", "basic", &builder);
    let descriptor = load(&fs, "pipelines/basic.shd");

    fs.add_file("pipelines/compiled/basic_MAIN0_vs.shb", "bin");
    fs.add_file("pipelines/compiled/basic_MAIN1_vs.shb", "bin");
    fs.add_file("pipelines/compiled/basic_MAIN0_fs.shb", "bin");

    // MAIN2/MAIN3 (FUR) and MAIN1_fs are never produced for this pass.
    assert!(!fs.exists(std::path::Path::new("pipelines/compiled/basic_MAIN2_vs.shb")));
    assert!(!is_stale(&fs, &descriptor, COMPILED));
}

#[test]
fn outdated_compares_against_baseline() {
    let fs = pipeline_fs();
    fs.add_file("old.shb", "");
    add_shader(&fs, "pipelines", "basic", &single_pass_descriptor());
    fs.add_file("new.shb", "");
    let descriptor = load(&fs, "pipelines/basic.shd");
    let newest = baseline(&fs, &descriptor);

    assert!(is_outdated(&fs, "old.shb", newest));
    assert!(!is_outdated(&fs, "new.shb", newest));
    assert!(is_outdated(&fs, "missing.shb", newest));
    assert!(is_outdated(&fs, "new.shb", None));
}
