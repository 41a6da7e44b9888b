//! Schema inference engine for XML samples
//!
//! This module folds sample XML documents into a schema tree that records,
//! for every element name at every position, which attributes it carried,
//! whether it held text, and whether it ever repeated under one parent.
//!
//! ## Features
//!
//! - **Ingestion** - Fold documents from strings, bytes, readers or files
//! - **Schema merging** - Combine trees built by separate converters
//! - **Structural comparison** - Detect shapes that can share one record type
//! - **Code generation** - Emit serde-ready Rust records from the tree
//!
//! ## Example
//!
//! ```rust
//! use xml_typegen_core::inference::XMLConverter;
//!
//! let mut converter = XMLConverter::new();
//! converter.ingest_str(r#"<root name="John"><subnode>This is content</subnode></root>"#)?;
//!
//! let code = converter.generate_string()?;
//! assert!(code.contains("pub struct Root_Subnode {"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod error;
mod inferrer;
mod merge;
mod structure;
mod types;

pub use config::{DEFAULT_DERIVES, InferenceConfig, InferenceConfigBuilder};
pub use error::InferenceError;
pub use inferrer::{InferenceStats, XMLConverter};
pub use merge::{merge_nodes, merge_trees};
pub use structure::{same_structure, same_tree_structure};
pub use types::{NodeDescriptor, NodeId, NodeRef, SchemaNode, SchemaTree};
