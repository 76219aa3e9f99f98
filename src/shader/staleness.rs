// src/shader/staleness.rs

//! Timestamp-based staleness check over a descriptor's variant space.

use std::path::Path;
use std::time::SystemTime;

use tracing::trace;

use crate::fs::FileSystem;
use crate::shader::descriptor::ShaderDescriptor;
use crate::shader::mask::DefineMask;
use crate::types::ShaderStage;

/// Newest input timestamp of a descriptor: the descriptor itself and both
/// stage sources.
///
/// `None` means "infinitely new": one of the inputs is missing, so every
/// variant must be recompiled.
pub fn baseline(fs: &dyn FileSystem, descriptor: &ShaderDescriptor) -> Option<SystemTime> {
    let mut newest = fs.modified(Path::new(descriptor.path()))?;
    for stage in ShaderStage::ALL {
        let modified = fs.modified(Path::new(&descriptor.stage_source(stage)))?;
        newest = newest.max(modified);
    }
    Some(newest)
}

/// `true` if the binary at `path` is missing or older than `baseline`.
pub fn is_outdated(fs: &dyn FileSystem, path: &str, baseline: Option<SystemTime>) -> bool {
    match (fs.modified(Path::new(path)), baseline) {
        (None, _) => true,
        (Some(_), None) => true,
        (Some(binary), Some(baseline)) => binary < baseline,
    }
}

/// Returns `true` as soon as any in-scope variant binary of `descriptor` is
/// missing or older than its sources.
///
/// For each pass, masks are scanned in ascending order; a vertex variant is
/// only considered when the mask is a subset of the pass's vertex local mask,
/// and likewise for fragment variants.
pub fn is_stale(fs: &dyn FileSystem, descriptor: &ShaderDescriptor, compiled_dir: &str) -> bool {
    let baseline = baseline(fs, descriptor);
    let define_count = descriptor.defines.len();

    for pass in &descriptor.passes {
        for mask in DefineMask::all(define_count) {
            for stage in ShaderStage::ALL {
                if !mask.is_subset_of(pass.local_mask(stage)) {
                    continue;
                }
                let variant = descriptor.variant_path(compiled_dir, &pass.name, mask, stage);
                if is_outdated(fs, &variant, baseline) {
                    trace!(shader = descriptor.path(), %variant, "variant is stale");
                    return true;
                }
            }
        }
    }
    false
}
