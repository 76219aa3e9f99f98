// src/shader/descriptor.rs

//! Shader descriptor (`.shd`) parsing.
//!
//! A descriptor is a small TOML document:
//!
//! ```toml
//! defines = ["SKINNED", "ALPHA_CUTOUT"]
//!
//! [[pass]]
//! name = "MAIN"
//! vertex_defines = ["SKINNED"]
//! fragment_defines = ["ALPHA_CUTOUT"]
//! ```
//!
//! Descriptors are re-parsed every time they are needed; nothing but the
//! path is kept between update cycles.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::errors::{Result, ShaderError};
use crate::fs::{FileInfo, FileSystem};
use crate::shader::mask::{DefineMask, MAX_DEFINES};
use crate::types::ShaderStage;

/// Extension of shader descriptor files.
pub const DESCRIPTOR_EXTENSION: &str = "shd";

/// Separator between descriptor basename, pass and stage in variant names.
/// Descriptor basenames must not contain it.
pub const VARIANT_SEPARATOR: char = '_';

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawDescriptor {
    #[serde(default)]
    pub defines: Vec<String>,

    #[serde(default, rename = "pass")]
    pub passes: Vec<RawPass>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawPass {
    pub name: String,

    #[serde(default)]
    pub vertex_defines: Vec<String>,

    #[serde(default)]
    pub fragment_defines: Vec<String>,
}

/// One render pass of a descriptor with its per-stage local masks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pass {
    pub name: String,
    pub vertex_mask: DefineMask,
    pub fragment_mask: DefineMask,
}

impl Pass {
    pub fn local_mask(&self, stage: ShaderStage) -> DefineMask {
        match stage {
            ShaderStage::Vertex => self.vertex_mask,
            ShaderStage::Fragment => self.fragment_mask,
        }
    }
}

/// Parsed descriptor: ordered passes plus the ordered define list the masks
/// index into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderDescriptor {
    path: String,
    info: FileInfo,
    pub passes: Vec<Pass>,
    pub defines: Vec<String>,
}

impl ShaderDescriptor {
    /// Read and parse the descriptor at `path`.
    pub fn load(fs: &dyn FileSystem, path: &str) -> Result<Self> {
        let text = fs
            .read_to_string(Path::new(path))
            .map_err(ShaderError::Other)?;
        Self::parse(path, &text)
    }

    pub fn parse(path: &str, text: &str) -> Result<Self> {
        let raw: RawDescriptor = toml::from_str(text).map_err(|e| ShaderError::Descriptor {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_raw(path, raw)
    }

    pub fn from_raw(path: &str, raw: RawDescriptor) -> Result<Self> {
        let invalid = |message: String| ShaderError::Descriptor {
            path: path.to_string(),
            message,
        };

        if raw.defines.len() > MAX_DEFINES {
            return Err(invalid(format!(
                "{} defines declared, at most {} are supported",
                raw.defines.len(),
                MAX_DEFINES
            )));
        }

        let mut seen = HashSet::new();
        for define in &raw.defines {
            if !seen.insert(define.as_str()) {
                return Err(invalid(format!("define '{define}' declared twice")));
            }
        }

        let mask_of = |pass: &str, names: &[String]| -> Result<DefineMask> {
            let mut mask = DefineMask::EMPTY;
            for name in names {
                let idx = raw
                    .defines
                    .iter()
                    .position(|d| d == name)
                    .ok_or_else(|| invalid(format!("pass '{pass}' uses undeclared define '{name}'")))?;
                mask = mask.with(idx);
            }
            Ok(mask)
        };

        let mut passes = Vec::with_capacity(raw.passes.len());
        let mut pass_names = HashSet::new();
        for pass in &raw.passes {
            if pass.name.trim().is_empty() {
                return Err(invalid("pass with empty name".to_string()));
            }
            if !pass_names.insert(pass.name.as_str()) {
                return Err(invalid(format!("pass '{}' declared twice", pass.name)));
            }
            passes.push(Pass {
                name: pass.name.clone(),
                vertex_mask: mask_of(&pass.name, &pass.vertex_defines)?,
                fragment_mask: mask_of(&pass.name, &pass.fragment_defines)?,
            });
        }

        Ok(Self {
            path: path.to_string(),
            info: FileInfo::new(path),
            passes,
            defines: raw.defines,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn basename(&self) -> &str {
        &self.info.basename
    }

    /// Stage source paired with this descriptor (`{dir}{basename}_vs.sc`).
    pub fn stage_source(&self, stage: ShaderStage) -> String {
        stage_source_path(&self.path, stage)
    }

    /// Output path of one binary variant:
    /// `{compiled_dir}/{basename}_{pass}{mask}_{vs|fs}.shb`.
    pub fn variant_path(
        &self,
        compiled_dir: &str,
        pass: &str,
        mask: DefineMask,
        stage: ShaderStage,
    ) -> String {
        format!(
            "{}/{}{}{}{}{}",
            compiled_dir.trim_end_matches('/'),
            self.basename(),
            VARIANT_SEPARATOR,
            pass,
            mask,
            stage.binary_suffix()
        )
    }

    /// Semicolon-joined define list for a variant: the pass name followed by
    /// the textual form of every enabled define, each terminated by `;`.
    pub fn define_list(&self, pass: &str, mask: DefineMask, text_of: impl Fn(&str) -> String) -> String {
        let mut out = format!("{pass};");
        for idx in mask.indices() {
            if let Some(name) = self.defines.get(idx) {
                out.push_str(&text_of(name));
                out.push(';');
            }
        }
        out
    }
}

/// Stage source path for a descriptor path.
pub fn stage_source_path(descriptor_path: &str, stage: ShaderStage) -> String {
    let info = FileInfo::new(descriptor_path);
    format!("{}{}{}", info.dir, info.basename, stage.source_suffix())
}

/// Reject descriptor basenames containing the variant separator; such
/// names make the reverse lookup from binary names ambiguous.
pub fn validate_name(descriptor_path: &str) -> Result<()> {
    let info = FileInfo::new(descriptor_path);
    if info.basename.contains(VARIANT_SEPARATOR) {
        return Err(ShaderError::InvalidName(descriptor_path.to_string()));
    }
    Ok(())
}

/// Descriptor basename encoded in a binary variant basename: everything up
/// to the first separator (`basic_MAIN0_vs` -> `basic`).
pub fn source_basename_of_binary(binary_basename: &str) -> &str {
    binary_basename
        .split(VARIANT_SEPARATOR)
        .next()
        .unwrap_or(binary_basename)
}
