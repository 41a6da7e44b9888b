//! Schema inference engine

use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::config::InferenceConfig;
use super::error::InferenceError;
use super::merge::merge_trees;
use super::types::{NodeId, NodeRef, SchemaTree};
use crate::export::{ExportError, RustExporter};
use crate::import::{XMLElement, XMLImporter};

/// Statistics from schema inference
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceStats {
    /// Documents folded into the schema
    pub documents_processed: usize,
    /// Documents ignored because the sample size was reached
    pub documents_skipped: usize,
    /// Element occurrences visited across all documents
    pub elements_visited: usize,
    /// Distinct schema nodes in the tree
    pub schema_nodes: usize,
    /// Maximum nesting depth encountered
    pub max_depth: usize,
}

/// Schema inference engine
///
/// Folds sample XML documents into one [`SchemaTree`] and generates Rust
/// record definitions from it. Every fact only ever grows: once an element is
/// seen repeated, carrying text, or with an attribute, that stays recorded.
#[derive(Debug, Clone)]
pub struct XMLConverter {
    config: InferenceConfig,
    tree: SchemaTree,
    /// Documents processed
    document_count: usize,
    /// Documents skipped
    skipped_count: usize,
    /// Element occurrences visited
    element_count: usize,
    /// Maximum depth seen
    max_depth_seen: usize,
}

impl XMLConverter {
    /// Create a new converter with default configuration
    pub fn new() -> Self {
        Self::with_config(InferenceConfig::default())
    }

    /// Create a new converter with custom configuration
    pub fn with_config(config: InferenceConfig) -> Self {
        Self {
            config,
            tree: SchemaTree::new(),
            document_count: 0,
            skipped_count: 0,
            element_count: 0,
            max_depth_seen: 0,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Accumulated schema
    pub fn tree(&self) -> &SchemaTree {
        &self.tree
    }

    /// Consume the converter and keep only its schema
    pub fn into_tree(self) -> SchemaTree {
        self.tree
    }

    /// Top-level schema nodes in first-seen order
    pub fn top_level_nodes(&self) -> Vec<NodeRef<'_>> {
        self.tree.top_level().collect()
    }

    fn sample_full(&self) -> bool {
        self.config.sample_size > 0 && self.document_count >= self.config.sample_size
    }

    fn skip(&mut self) -> Option<NodeId> {
        self.skipped_count += 1;
        tracing::debug!(
            sample_size = self.config.sample_size,
            "Sample size reached, skipping document"
        );
        None
    }

    /// Ingest one XML document
    ///
    /// Returns the top-level node the document's root element was folded
    /// into, or `None` when the configured sample size was already reached.
    /// A document that fails to decode leaves the schema untouched.
    pub fn ingest_str(&mut self, xml: &str) -> Result<Option<NodeId>, InferenceError> {
        if self.sample_full() {
            return Ok(self.skip());
        }
        let root = XMLImporter::with_max_depth(self.config.max_depth)
            .parse_str(xml)
            .inspect_err(|e| tracing::warn!(error = %e, "Failed to decode XML document"))?;
        self.ingest_element(&root)
    }

    /// Ingest one XML document given as raw UTF-8 bytes
    pub fn ingest_bytes(&mut self, data: &[u8]) -> Result<Option<NodeId>, InferenceError> {
        if self.sample_full() {
            return Ok(self.skip());
        }
        let xml = std::str::from_utf8(data)?;
        self.ingest_str(xml)
    }

    /// Read a whole document from `reader` and ingest it
    pub fn ingest_reader<R: Read>(
        &mut self,
        mut reader: R,
    ) -> Result<Option<NodeId>, InferenceError> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        self.ingest_bytes(&data)
    }

    /// Read and ingest the document stored at `path`
    pub fn ingest_file<P: AsRef<Path>>(
        &mut self,
        path: P,
    ) -> Result<Option<NodeId>, InferenceError> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .map_err(|e| InferenceError::Io(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), bytes = data.len(), "Ingesting XML file");
        self.ingest_bytes(&data)
    }

    /// Ingest several documents, stopping at the first failure
    pub fn ingest_batch<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<(), InferenceError> {
        for document in documents {
            self.ingest_str(document.as_ref())?;
        }
        Ok(())
    }

    /// Fold an already decoded element tree into the schema
    pub fn ingest_element(&mut self, root: &XMLElement) -> Result<Option<NodeId>, InferenceError> {
        if self.sample_full() {
            return Ok(self.skip());
        }
        let depth = root.depth();
        if depth > self.config.max_depth {
            return Err(InferenceError::MaxDepthExceeded {
                depth,
                max: self.config.max_depth,
            });
        }

        let mut visited = 0;
        let id = fold_element(&mut self.tree, SchemaTree::ROOT, root, &mut visited);

        self.document_count += 1;
        self.element_count += visited;
        self.max_depth_seen = self.max_depth_seen.max(depth);
        tracing::debug!(
            root = %root.name,
            elements = visited,
            schema_nodes = self.tree.len(),
            "Ingested XML document"
        );
        Ok(Some(id))
    }

    /// Combine two converters into a new one holding the union of both
    /// schemas. The configuration of `a` is kept; neither input changes.
    pub fn combine(a: &XMLConverter, b: &XMLConverter) -> XMLConverter {
        XMLConverter {
            config: a.config.clone(),
            tree: merge_trees(&a.tree, &b.tree),
            document_count: a.document_count + b.document_count,
            skipped_count: a.skipped_count + b.skipped_count,
            element_count: a.element_count + b.element_count,
            max_depth_seen: a.max_depth_seen.max(b.max_depth_seen),
        }
    }

    /// Get inference statistics
    pub fn stats(&self) -> InferenceStats {
        InferenceStats {
            documents_processed: self.document_count,
            documents_skipped: self.skipped_count,
            elements_visited: self.element_count,
            schema_nodes: self.tree.len(),
            max_depth: self.max_depth_seen,
        }
    }

    /// Get the number of documents processed
    pub fn document_count(&self) -> usize {
        self.document_count
    }

    /// Generate Rust record definitions for the accumulated schema
    pub fn generate_string(&self) -> Result<String, ExportError> {
        RustExporter::new(self.config.clone())
            .export(&self.tree)
            .map(|result| result.content)
    }

    /// Generate record definitions into `writer`
    ///
    /// Nothing is written if generation fails.
    pub fn generate_writer<W: Write>(&self, mut writer: W) -> Result<(), ExportError> {
        let code = self.generate_string()?;
        writer.write_all(code.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Generate record definitions into the file at `path`
    ///
    /// The file is only created once generation succeeded.
    pub fn generate_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ExportError> {
        let path = path.as_ref();
        let code = self.generate_string()?;
        let mut file = File::create(path)
            .map_err(|e| ExportError::Io(format!("{}: {}", path.display(), e)))?;
        file.write_all(code.as_bytes())?;
        tracing::info!(path = %path.display(), bytes = code.len(), "Wrote generated records");
        Ok(())
    }
}

impl Default for XMLConverter {
    fn default() -> Self {
        Self::new()
    }
}

/// Fold one element occurrence below `parent` and return its schema node.
fn fold_element(
    tree: &mut SchemaTree,
    parent: NodeId,
    element: &XMLElement,
    visited: &mut usize,
) -> NodeId {
    *visited += 1;
    let id = tree.get_or_add_child(parent, &element.name);

    let node = tree.node_mut(id);
    if !node.has_character_data {
        node.has_character_data = element.has_character_data();
    }
    for (name, value) in &element.attributes {
        if !value.is_empty() {
            node.add_attribute(name);
        }
    }

    let mut occurrences: HashMap<&str, usize> = HashMap::new();
    for child in &element.children {
        *occurrences.entry(child.name.as_str()).or_default() += 1;
    }

    for child in &element.children {
        let child_id = fold_element(tree, id, child, visited);
        let node = tree.node_mut(child_id);
        if !node.is_array {
            node.is_array = occurrences[child.name.as_str()] > 1;
        }
    }
    id
}
