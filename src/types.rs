// src/types.rs

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Rendering backend the shaders are compiled for.
///
/// The backend decides where compiled binaries live and which
/// platform/profile pair is handed to the external compiler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderBackend {
    #[default]
    DirectX,
    #[serde(rename = "opengl")]
    OpenGl,
    Vulkan,
}

impl RenderBackend {
    /// Name of the compiled-output directory under the pipeline root.
    pub fn compiled_dir_name(self) -> &'static str {
        match self {
            RenderBackend::DirectX => "compiled",
            RenderBackend::OpenGl => "compiled_gl",
            RenderBackend::Vulkan => "compiled_vk",
        }
    }

    /// Value of the compiler's `--platform` argument.
    pub fn platform(self) -> &'static str {
        match self {
            RenderBackend::DirectX => "windows",
            RenderBackend::OpenGl | RenderBackend::Vulkan => "linux",
        }
    }

    /// Value of the compiler's `--profile` argument for a stage.
    pub fn profile(self, stage: ShaderStage) -> &'static str {
        match (self, stage) {
            (RenderBackend::DirectX, ShaderStage::Vertex) => "vs_5_0",
            (RenderBackend::DirectX, ShaderStage::Fragment) => "ps_5_0",
            (RenderBackend::OpenGl, _) => "140",
            (RenderBackend::Vulkan, _) => "spirv",
        }
    }
}

impl FromStr for RenderBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "directx" => Ok(RenderBackend::DirectX),
            "opengl" => Ok(RenderBackend::OpenGl),
            "vulkan" => Ok(RenderBackend::Vulkan),
            other => Err(format!(
                "invalid backend: {other} (expected \"directx\", \"opengl\" or \"vulkan\")"
            )),
        }
    }
}

/// Programmable pipeline stage a variant is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub const ALL: [ShaderStage; 2] = [ShaderStage::Vertex, ShaderStage::Fragment];

    /// Suffix of the stage source file paired with a descriptor.
    pub fn source_suffix(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "_vs.sc",
            ShaderStage::Fragment => "_fs.sc",
        }
    }

    /// Suffix of a compiled binary variant for this stage.
    pub fn binary_suffix(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "_vs.shb",
            ShaderStage::Fragment => "_fs.shb",
        }
    }

    /// Value of the compiler's `--type` argument.
    pub fn type_name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}
