// src/shader/mask.rs

//! Define bitsets and the subset enumeration used by both the staleness
//! check and the variant compiler.

use std::fmt;

/// Maximum number of defines a single descriptor may declare.
pub const MAX_DEFINES: usize = 16;

/// Bitset over a descriptor's ordered define list.
///
/// Bit `i` set means `defines[i]` is enabled for the variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DefineMask(u32);

impl DefineMask {
    pub const EMPTY: DefineMask = DefineMask(0);

    pub fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn with(self, index: usize) -> Self {
        debug_assert!(index < MAX_DEFINES);
        Self(self.0 | (1 << index))
    }

    pub fn contains(self, index: usize) -> bool {
        index < MAX_DEFINES && self.0 & (1 << index) != 0
    }

    /// `self & !local == 0`: every define enabled here is also in `local`.
    pub fn is_subset_of(self, local: DefineMask) -> bool {
        self.0 & !local.0 == 0
    }

    /// Indices of the enabled defines, ascending.
    pub fn indices(self) -> impl Iterator<Item = usize> {
        (0..MAX_DEFINES).filter(move |&i| self.contains(i))
    }

    /// Every mask over `define_count` defines, in ascending numeric order.
    pub fn all(define_count: usize) -> impl Iterator<Item = DefineMask> {
        let count = define_count.min(MAX_DEFINES);
        (0u32..(1u32 << count)).map(DefineMask)
    }

    /// Every mask over `define_count` defines that is a subset of `local`,
    /// in ascending numeric order.
    ///
    /// Masks outside `local` are never yielded, so callers never build or
    /// probe paths for variants a pass does not care about.
    pub fn subsets(local: DefineMask, define_count: usize) -> impl Iterator<Item = DefineMask> {
        Self::all(define_count).filter(move |mask| mask.is_subset_of(local))
    }
}

impl fmt::Display for DefineMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
