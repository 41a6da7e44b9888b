//! Export functionality
//!
//! Provides the Rust record exporter that turns a schema tree into
//! serde/quick-xml compatible struct definitions.

pub mod rust;

/// Result of an export operation
#[derive(Debug)]
pub struct ExportResult {
    /// Exported content
    pub content: String,
    /// Format identifier
    pub format: String,
}

/// Error during export
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    /// An element or attribute name sanitizes to nothing
    #[error("Name sanitizes to an empty identifier at {path}")]
    EmptyIdentifier { path: String },
    /// Configured module name is not a Rust identifier
    #[error("Invalid module name: {0:?}")]
    InvalidModuleName(String),
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::Io(err.to_string())
    }
}

pub use rust::{FieldDef, FieldKind, RecordDef, RustExporter};
