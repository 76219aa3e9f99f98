// src/exec/backend.rs

//! Pluggable compiler backend abstraction.
//!
//! The engine talks to a `CompilerBackend` instead of spawning processes
//! itself. Production code uses [`ProcessCompiler`](super::ProcessCompiler);
//! tests can provide their own implementation that records requests and
//! writes fake outputs.

use crate::errors::Result;
use crate::types::ShaderStage;

/// Outcome of one external compiler invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileOutcome {
    Success,
    Failed(i32),
}

/// Everything the external compiler needs to produce one binary variant
/// and its dependency file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileRequest {
    pub stage: ShaderStage,
    /// Stage source (`*_vs.sc` / `*_fs.sc`).
    pub input: String,
    /// Binary variant to produce (`*.shb`).
    pub output: String,
    /// Ask the compiler to emit a `*.d` dependency file next to `output`.
    pub emit_depends: bool,
    pub include_dir: String,
    pub varying_def: String,
    pub platform: String,
    pub profile: String,
    pub optimization: u8,
    /// Semicolon-joined define list, e.g. `MAIN;SKINNED;`.
    pub defines: String,
}

impl CompileRequest {
    /// Command-line arguments in the external compiler's syntax.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "-f".to_string(),
            self.input.clone(),
            "-o".to_string(),
            self.output.clone(),
        ];
        if self.emit_depends {
            args.push("--depends".to_string());
        }
        args.extend([
            "-i".to_string(),
            self.include_dir.clone(),
            "--varyingdef".to_string(),
            self.varying_def.clone(),
            "--platform".to_string(),
            self.platform.clone(),
            "--profile".to_string(),
            self.profile.clone(),
            "--type".to_string(),
            self.stage.type_name().to_string(),
            format!("-O{}", self.optimization),
            "--define".to_string(),
            self.defines.clone(),
        ]);
        args
    }
}

/// Trait abstracting how a single variant is compiled.
///
/// Invocations are synchronous: the call returns once the compiler has
/// finished. `Err` is reserved for failures to run the compiler at all;
/// a compiler that ran and rejected the shader reports
/// [`CompileOutcome::Failed`].
pub trait CompilerBackend: Send {
    fn compile(&mut self, request: &CompileRequest) -> Result<CompileOutcome>;
}
