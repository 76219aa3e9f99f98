#![allow(dead_code)]

use std::sync::Arc;

use shaderforge::config::PipelineSettings;
use shaderforge::engine::ShaderCompiler;
use shaderforge::fs::mock::MockFileSystem;
use shaderforge::fs::FileSystem;
use shaderforge::types::RenderBackend;
use shaderforge_test_utils::fake_compiler::FakeCompiler;
use shaderforge_test_utils::recording::HookLog;

pub use shaderforge_test_utils::init_tracing;

pub const ROOT: &str = "pipelines";
pub const COMPILED: &str = "pipelines/compiled";

pub fn settings() -> PipelineSettings {
    PipelineSettings::new(ROOT, RenderBackend::DirectX)
}

/// Mock filesystem with an (empty) pipeline root and varying file.
pub fn pipeline_fs() -> MockFileSystem {
    let fs = MockFileSystem::new();
    fs.add_file(format!("{ROOT}/varying.def.sc"), "vec3 a_position : POSITION;");
    fs
}

/// Build an engine over `fs` with a fake compiler writing into the same
/// filesystem.
pub fn engine_with(
    fs: &MockFileSystem,
    compiler: impl FnOnce(FakeCompiler) -> FakeCompiler,
) -> (ShaderCompiler<FakeCompiler>, HookLog) {
    let shared: Arc<dyn FileSystem> = Arc::new(fs.clone());
    let compiler = compiler(FakeCompiler::new(shared.clone()));
    let log = HookLog::new();
    let engine = ShaderCompiler::new(shared, settings(), compiler, log.hooks());
    (engine, log)
}

pub fn engine(fs: &MockFileSystem) -> (ShaderCompiler<FakeCompiler>, HookLog) {
    engine_with(fs, |c| c)
}
