use shaderforge::errors::ShaderError;
use shaderforge::shader::descriptor::{
    source_basename_of_binary, stage_source_path, validate_name,
};
use shaderforge::shader::{DefineMask, ShaderDescriptor, MAX_DEFINES};
use shaderforge::types::ShaderStage;
use shaderforge_test_utils::builders::DescriptorBuilder;

fn parse(builder: &DescriptorBuilder) -> ShaderDescriptor {
    ShaderDescriptor::parse("pipelines/basic.shd", &builder.build()).unwrap()
}

#[test]
fn masks_follow_declaration_order() {
    let descriptor = parse(
        &DescriptorBuilder::new()
            .define("SKINNED")
            .define("ALPHA_CUTOUT")
            .define("FUR")
            .pass("MAIN", &["SKINNED", "FUR"], &["ALPHA_CUTOUT"])
            .pass("SHADOW", &["SKINNED"], &[]),
    );

    assert_eq!(descriptor.defines, vec!["SKINNED", "ALPHA_CUTOUT", "FUR"]);
    assert_eq!(descriptor.passes.len(), 2);

    let main = &descriptor.passes[0];
    assert_eq!(main.name, "MAIN");
    assert_eq!(main.vertex_mask, DefineMask::from_bits(0b101));
    assert_eq!(main.fragment_mask, DefineMask::from_bits(0b010));
    assert_eq!(main.local_mask(ShaderStage::Fragment), main.fragment_mask);

    let shadow = &descriptor.passes[1];
    assert_eq!(shadow.name, "SHADOW");
    assert_eq!(shadow.fragment_mask, DefineMask::EMPTY);
}

#[test]
fn empty_descriptor_has_no_passes() {
    let descriptor = ShaderDescriptor::parse("pipelines/empty.shd", "").unwrap();
    assert!(descriptor.passes.is_empty());
    assert!(descriptor.defines.is_empty());
}

#[test]
fn undeclared_define_is_rejected() {
    let text = DescriptorBuilder::new()
        .define("SKINNED")
        .pass("MAIN", &["FUR"], &[])
        .build();
    let err = ShaderDescriptor::parse("pipelines/basic.shd", &text).unwrap_err();
    match err {
        ShaderError::Descriptor { path, message } => {
            assert_eq!(path, "pipelines/basic.shd");
            assert!(message.contains("FUR"), "{message}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn duplicate_defines_and_passes_are_rejected() {
    let defines = DescriptorBuilder::new().define("A").define("A").build();
    assert!(ShaderDescriptor::parse("x.shd", &defines).is_err());

    let passes = DescriptorBuilder::new()
        .pass("MAIN", &[], &[])
        .pass("MAIN", &[], &[])
        .build();
    assert!(ShaderDescriptor::parse("x.shd", &passes).is_err());
}

#[test]
fn too_many_defines_are_rejected() {
    let mut builder = DescriptorBuilder::new();
    for i in 0..=MAX_DEFINES {
        builder = builder.define(&format!("D{i}"));
    }
    let err = ShaderDescriptor::parse("x.shd", &builder.build()).unwrap_err();
    assert!(err.to_string().contains("at most"), "{err}");
}

#[test]
fn unknown_keys_and_bad_toml_are_rejected() {
    assert!(ShaderDescriptor::parse("x.shd", "defines = [\"A\"]\nshaders = 3\n").is_err());
    assert!(ShaderDescriptor::parse("x.shd", "[[pass]\nname = ").is_err());
}

#[test]
fn variant_paths_and_stage_sources() {
    let descriptor = parse(&DescriptorBuilder::new().define("SKINNED").pass("MAIN", &["SKINNED"], &[]));

    assert_eq!(descriptor.basename(), "basic");
    assert_eq!(descriptor.stage_source(ShaderStage::Vertex), "pipelines/basic_vs.sc");
    assert_eq!(descriptor.stage_source(ShaderStage::Fragment), "pipelines/basic_fs.sc");
    assert_eq!(
        descriptor.variant_path("pipelines/compiled/", "MAIN", DefineMask::from_bits(1), ShaderStage::Vertex),
        "pipelines/compiled/basic_MAIN1_vs.shb"
    );
    assert_eq!(
        descriptor.variant_path("pipelines/compiled_gl", "SHADOW", DefineMask::EMPTY, ShaderStage::Fragment),
        "pipelines/compiled_gl/basic_SHADOW0_fs.shb"
    );
    assert_eq!(stage_source_path("a/b/water.shd", ShaderStage::Fragment), "a/b/water_fs.sc");
}

#[test]
fn define_list_uses_pass_name_and_textual_defines() {
    let descriptor = parse(
        &DescriptorBuilder::new()
            .define("SKINNED")
            .define("FUR")
            .pass("MAIN", &["SKINNED", "FUR"], &[]),
    );

    assert_eq!(descriptor.define_list("MAIN", DefineMask::EMPTY, str::to_string), "MAIN;");
    assert_eq!(
        descriptor.define_list("MAIN", DefineMask::from_bits(0b11), str::to_string),
        "MAIN;SKINNED;FUR;"
    );
    assert_eq!(
        descriptor.define_list("MAIN", DefineMask::from_bits(0b10), |name| format!("HAS_{name}")),
        "MAIN;HAS_FUR;"
    );
}

#[test]
fn names_with_separator_are_invalid() {
    assert!(validate_name("pipelines/basic.shd").is_ok());
    assert!(validate_name("pipe_lines/basic.shd").is_ok());
    assert!(matches!(
        validate_name("pipelines/bad_name.shd"),
        Err(ShaderError::InvalidName(path)) if path == "pipelines/bad_name.shd"
    ));
}

#[test]
fn binary_basename_maps_to_source_basename() {
    assert_eq!(source_basename_of_binary("basic_MAIN0_vs"), "basic");
    assert_eq!(source_basename_of_binary("water_SHADOW12_fs"), "water");
    assert_eq!(source_basename_of_binary("plain"), "plain");
}
