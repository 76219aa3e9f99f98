// src/exec/shaderc.rs

//! External shader compiler process runner.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use anyhow::Context;
use tracing::{debug, error};

use crate::errors::Result;
use crate::exec::backend::{CompileOutcome, CompileRequest, CompilerBackend};
use crate::logging::COMPILER_TARGET;

/// Runs the external compiler executable once per variant and waits for it.
///
/// No timeout is applied; a hanging compiler stalls the caller.
#[derive(Debug, Clone)]
pub struct ProcessCompiler {
    program: PathBuf,
}

impl ProcessCompiler {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl CompilerBackend for ProcessCompiler {
    fn compile(&mut self, request: &CompileRequest) -> Result<CompileOutcome> {
        let args = request.args();
        debug!(program = ?self.program, ?args, "invoking shader compiler");

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("running shader compiler {:?}", self.program))?;

        // Compiler diagnostics are formatted text on stdout/stderr.
        if !output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);
            for line in stdout.lines().chain(stderr.lines()) {
                if !line.trim().is_empty() {
                    error!(target: COMPILER_TARGET, "{}", line);
                }
            }
        }

        Ok(if output.status.success() {
            CompileOutcome::Success
        } else {
            CompileOutcome::Failed(output.status.code().unwrap_or(-1))
        })
    }
}
