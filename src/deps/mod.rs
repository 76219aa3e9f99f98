// src/deps/mod.rs

//! Include-level dependency tracking built from compiler output.
//!
//! - [`depfile`] parses the `*.d` files the compiler writes next to each
//!   binary.
//! - [`graph`] aggregates them into a dependency -> variants map.

pub mod depfile;
pub mod graph;

pub use depfile::{parse_depfile, DepFile};
pub use graph::DependencyGraph;
