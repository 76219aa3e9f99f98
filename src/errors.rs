// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShaderError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// A directory the pipeline needs could not be created.
    #[error("Environment error: {0}")]
    Environment(String),

    #[error("Invalid shader descriptor {path}: {message}")]
    Descriptor { path: String, message: String },

    /// Descriptor basename uses the reserved variant separator.
    #[error("Invalid shader name: {0}")]
    InvalidName(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, ShaderError>;
