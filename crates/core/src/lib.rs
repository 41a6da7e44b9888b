//! XML Typegen Core - Schema inference and Rust type generation from XML samples
//!
//! Provides unified interfaces for:
//! - XML decoding into element trees
//! - Incremental schema inference across sample documents
//! - Schema merging and structural comparison
//! - Rust record generation with serde/quick-xml field mapping
//! - Identifier sanitization for generated code

pub mod export;
pub mod import;
pub mod inference;
pub mod validation;

// Re-export commonly used types
pub use export::{ExportError, ExportResult, RecordDef, RustExporter};
pub use import::{XMLElement, XMLImporter, parse_document};
pub use inference::{
    InferenceConfig, InferenceError, InferenceStats, NodeId, NodeRef, SchemaTree, XMLConverter,
    merge_trees, same_structure,
};
pub use validation::{ValidationError, identifier};
