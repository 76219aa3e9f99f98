// src/exec/variants.rs

//! Compiles every variant of one descriptor through a [`CompilerBackend`].

use tracing::{debug, error, info};

use crate::config::PipelineSettings;
use crate::exec::backend::{CompileOutcome, CompileRequest, CompilerBackend};
use crate::shader::descriptor::ShaderDescriptor;
use crate::shader::variant::{plan_variants, Variant};

/// Per-descriptor result of a compile run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileSummary {
    pub attempted: usize,
    pub failed: usize,
}

impl CompileSummary {
    pub fn succeeded(&self) -> usize {
        self.attempted - self.failed
    }
}

/// Build the compiler request for one planned variant.
pub fn request_for(
    settings: &PipelineSettings,
    descriptor: &ShaderDescriptor,
    variant: &Variant,
) -> CompileRequest {
    CompileRequest {
        stage: variant.stage,
        input: variant.source.clone(),
        output: variant.output.clone(),
        emit_depends: true,
        include_dir: settings.include_dir.clone(),
        varying_def: settings.varying_def.clone(),
        platform: settings.backend.platform().to_string(),
        profile: settings.backend.profile(variant.stage).to_string(),
        optimization: settings.optimization,
        defines: descriptor.define_list(&variant.pass, variant.mask, |name| {
            settings.define_text(name)
        }),
    }
}

/// Invoke the compiler once per variant of `descriptor`, synchronously and
/// in plan order.
///
/// A failing variant is logged with its full invocation context and does
/// not stop the remaining ones.
pub fn compile_variants(
    backend: &mut dyn CompilerBackend,
    settings: &PipelineSettings,
    descriptor: &ShaderDescriptor,
) -> CompileSummary {
    let mut summary = CompileSummary::default();

    for variant in plan_variants(descriptor, &settings.compiled_dir) {
        let request = request_for(settings, descriptor, &variant);
        summary.attempted += 1;

        debug!(
            source = %request.input,
            output = %request.output,
            defines = %request.defines,
            "compiling shader variant"
        );

        let failure = match backend.compile(&request) {
            Ok(CompileOutcome::Success) => None,
            Ok(CompileOutcome::Failed(code)) => Some(format!("exit code {code}")),
            Err(err) => Some(format!("{err:#}")),
        };

        if let Some(reason) = failure {
            summary.failed += 1;
            error!(
                source = %request.input,
                output = %request.output,
                defines = %request.defines,
                %reason,
                "failed to compile {} ({}), defines = \"{}\"",
                request.input,
                request.output,
                request.defines
            );
        }
    }

    info!(
        shader = descriptor.path(),
        attempted = summary.attempted,
        failed = summary.failed,
        "compiled shader"
    );
    summary
}
