// src/exec/mod.rs

//! Compiler execution layer.
//!
//! - [`backend`] provides the `CompilerBackend` trait and the request type
//!   describing one external compiler invocation.
//! - [`shaderc`] is the production backend that runs the compiler process.
//! - [`variants`] drives a backend across every variant of a descriptor.

pub mod backend;
pub mod shaderc;
pub mod variants;

pub use backend::{CompileOutcome, CompileRequest, CompilerBackend};
pub use shaderc::ProcessCompiler;
pub use variants::{compile_variants, CompileSummary};
