//! Validation functionality
//!
//! Provides identifier sanitization and validation for generated code.

pub mod identifier;

pub use identifier::{
    CONTENT_FIELD, SEPARATOR, ValidationError, ValidationResult, identifier, validate_identifier,
};
