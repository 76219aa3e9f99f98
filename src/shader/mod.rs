// src/shader/mod.rs

//! Shader descriptors and the variant space they span.
//!
//! - [`descriptor`] parses `.shd` files into passes, defines and local masks.
//! - [`mask`] holds the define bitset and its subset enumeration.
//! - [`variant`] turns a descriptor into the list of binaries to compile.
//! - [`staleness`] decides whether any of those binaries is out of date.
//! - [`index`] discovers descriptors under the pipeline root.

pub mod descriptor;
pub mod index;
pub mod mask;
pub mod staleness;
pub mod variant;

pub use descriptor::{Pass, ShaderDescriptor};
pub use index::ShaderSourceIndex;
pub use mask::{DefineMask, MAX_DEFINES};
pub use staleness::is_stale;
pub use variant::{plan_variants, Variant};
