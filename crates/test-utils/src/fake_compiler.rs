use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, Mutex};

use shaderforge::errors::Result;
use shaderforge::exec::{CompileOutcome, CompileRequest, CompilerBackend};
use shaderforge::fs::FileSystem;

/// A fake compiler that:
/// - records every request it receives
/// - writes the binary and a make-style dependency file through the given
///   filesystem, like the real compiler would
/// - fails for outputs registered with [`FakeCompiler::fail_output`].
#[derive(Debug, Clone)]
pub struct FakeCompiler {
    fs: Arc<dyn FileSystem>,
    requests: Arc<Mutex<Vec<CompileRequest>>>,
    failing: HashSet<String>,
    includes: HashMap<String, Vec<String>>,
}

impl FakeCompiler {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            requests: Arc::new(Mutex::new(Vec::new())),
            failing: HashSet::new(),
            includes: HashMap::new(),
        }
    }

    /// Report `include` as consulted whenever `stage_source` is compiled.
    pub fn with_include(mut self, stage_source: &str, include: &str) -> Self {
        self.includes
            .entry(stage_source.to_string())
            .or_default()
            .push(include.to_string());
        self
    }

    /// Make every request producing `output` fail.
    pub fn fail_output(&mut self, output: &str) {
        self.failing.insert(output.to_string());
    }

    pub fn requests(&self) -> Vec<CompileRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn outputs(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.output).collect()
    }

    pub fn clear(&self) {
        self.requests.lock().unwrap().clear();
    }
}

impl CompilerBackend for FakeCompiler {
    fn compile(&mut self, request: &CompileRequest) -> Result<CompileOutcome> {
        self.requests.lock().unwrap().push(request.clone());

        if self.failing.contains(&request.output) {
            return Ok(CompileOutcome::Failed(1));
        }

        self.fs
            .write(Path::new(&request.output), request.defines.as_bytes())?;

        if request.emit_depends {
            let mut depfile = format!("{} : {} \\\n", request.output, request.input);
            for include in self.includes.get(&request.input).into_iter().flatten() {
                depfile.push_str(&format!("  {include} \\\n"));
            }
            depfile.push_str(&format!("  {}\n", request.varying_def));
            self.fs
                .write(Path::new(&format!("{}.d", request.output)), depfile.as_bytes())?;
        }

        Ok(CompileOutcome::Success)
    }
}
