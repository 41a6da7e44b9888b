//! Import functionality
//!
//! Provides the XML decoder that turns sample documents into element trees
//! for schema inference.

pub mod xml;

pub use xml::{XMLElement, XMLImporter, parse_document};
