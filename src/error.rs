//! Error types for manifest loading, registry persistence and the hook adapter.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading or validating a skill manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Manifest not found at {0}")]
    NotFound(PathBuf),

    #[error("Failed to read manifest from {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to parse manifest {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid weight for {category}: {value} (must be finite and > 0)")]
    InvalidWeight { category: &'static str, value: f64 },

    #[error("Invalid {name}: {value} (must be finite and >= 0)")]
    InvalidThreshold { name: &'static str, value: f64 },

    #[error("Invalid scoring option {name}: {reason}")]
    InvalidScoring { name: &'static str, reason: String },
}

/// Failures while persisting the subagent registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Failed to write registry {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("Failed to serialize registry: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Failures in the stdin/stdout hook adapter.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read stdin: {0}")]
    StdinRead(#[from] io::Error),

    #[error("Failed to parse hook input JSON: {0}")]
    InputParse(#[from] serde_json::Error),

    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("Registry update failed: {0}")]
    Registry(#[from] RegistryError),
}
