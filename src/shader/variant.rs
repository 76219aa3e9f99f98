// src/shader/variant.rs

use crate::shader::descriptor::ShaderDescriptor;
use crate::shader::mask::DefineMask;
use crate::types::ShaderStage;

/// One (pass, define mask, stage) combination to be compiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub stage: ShaderStage,
    pub pass: String,
    pub mask: DefineMask,
    /// Stage source fed to the compiler.
    pub source: String,
    /// Binary produced by the compiler.
    pub output: String,
}

/// Enumerate every variant of `descriptor`, stage by stage, pass by pass,
/// masks ascending. Only masks that are subsets of the pass's local mask for
/// the stage are produced.
pub fn plan_variants(descriptor: &ShaderDescriptor, compiled_dir: &str) -> Vec<Variant> {
    let define_count = descriptor.defines.len();
    let mut variants = Vec::new();

    for stage in ShaderStage::ALL {
        let source = descriptor.stage_source(stage);
        for pass in &descriptor.passes {
            for mask in DefineMask::subsets(pass.local_mask(stage), define_count) {
                variants.push(Variant {
                    stage,
                    pass: pass.name.clone(),
                    mask,
                    source: source.clone(),
                    output: descriptor.variant_path(compiled_dir, &pass.name, mask, stage),
                });
            }
        }
    }

    variants
}
