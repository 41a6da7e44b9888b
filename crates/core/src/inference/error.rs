//! Error types for schema inference

use thiserror::Error;

/// Errors that can occur during schema inference
///
/// Every variant is raised before the schema tree is touched, so a failed
/// ingestion leaves the converter exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InferenceError {
    /// Malformed XML document
    #[error("XML parsing error at position {position}: {message}")]
    Decode { position: u64, message: String },

    /// Input is not valid UTF-8
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// Document contains no element
    #[error("Invalid XML structure: no root element found")]
    NoRootElement,

    /// Maximum depth exceeded
    #[error("Maximum nesting depth exceeded: {depth} > {max}")]
    MaxDepthExceeded { depth: usize, max: usize },

    /// IO error
    #[error("IO error: {0}")]
    Io(String),
}

impl InferenceError {
    /// Create a decode error at a byte position
    pub fn decode(position: u64, message: impl Into<String>) -> Self {
        InferenceError::Decode {
            position,
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for InferenceError {
    fn from(e: std::io::Error) -> Self {
        InferenceError::Io(e.to_string())
    }
}

impl From<std::str::Utf8Error> for InferenceError {
    fn from(e: std::str::Utf8Error) -> Self {
        InferenceError::InvalidEncoding(e.to_string())
    }
}
