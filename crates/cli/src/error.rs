//! Error types for the CLI.

use std::path::PathBuf;

use thiserror::Error;
use xml_typegen_core::{ExportError, InferenceError};

/// Main error type for CLI operations.
#[derive(Debug, Error)]
pub enum CliError {
    /// Error loading configuration.
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    /// A sample document could not be ingested.
    #[error("Failed to ingest {input}: {source}")]
    Inference {
        input: String,
        #[source]
        source: InferenceError,
    },

    /// Code generation failed.
    #[error("Failed to generate code: {0}")]
    Export(#[from] ExportError),

    /// Schema could not be serialized.
    #[error("Failed to serialize schema: {0}")]
    Serialize(String),

    /// Error writing output.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Create an ingestion error for one input.
    pub fn inference(input: impl Into<String>, source: InferenceError) -> Self {
        Self::Inference {
            input: input.into(),
            source,
        }
    }
}

/// Error loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file not found.
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Invalid TOML syntax or unknown value.
    #[error("Invalid TOML in {path}: {message}")]
    InvalidToml { path: PathBuf, message: String },

    /// IO error reading config.
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
