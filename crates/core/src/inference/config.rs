//! Configuration for schema inference and code generation

use serde::{Deserialize, Serialize};

/// Derives placed on every generated record unless configured otherwise.
pub const DEFAULT_DERIVES: &[&str] = &[
    "Debug",
    "Clone",
    "Default",
    "PartialEq",
    "Serialize",
    "Deserialize",
];

/// Configuration for schema inference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InferenceConfig {
    /// Emit from a sorted copy of the schema (attributes and children in
    /// lexicographic order) instead of first-seen order
    pub canonical: bool,

    /// Write the generated-code comment and the serde `use` line.
    /// Inside a module wrapper the `use` line is written regardless.
    pub emit_preamble: bool,

    /// Wrap the generated records in `pub mod <name> { ... }`
    pub module_name: Option<String>,

    /// Derive macros applied to every generated record
    pub derives: Vec<String>,

    /// Maximum number of documents to ingest (0 = all)
    pub sample_size: usize,

    /// Maximum element nesting depth accepted by the decoder
    pub max_depth: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            canonical: true,
            emit_preamble: true,
            module_name: None,
            derives: DEFAULT_DERIVES.iter().map(|d| d.to_string()).collect(),
            sample_size: 0, // All documents
            max_depth: 256,
        }
    }
}

impl InferenceConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> InferenceConfigBuilder {
        InferenceConfigBuilder::default()
    }
}

/// Builder for InferenceConfig
#[derive(Debug, Default)]
pub struct InferenceConfigBuilder {
    config: InferenceConfig,
}

impl InferenceConfigBuilder {
    /// Enable or disable canonical (sorted) emission
    pub fn canonical(mut self, canonical: bool) -> Self {
        self.config.canonical = canonical;
        self
    }

    /// Enable or disable the preamble
    pub fn emit_preamble(mut self, emit: bool) -> Self {
        self.config.emit_preamble = emit;
        self
    }

    /// Set the wrapping module name (empty string = no module)
    pub fn module_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.config.module_name = if name.is_empty() { None } else { Some(name) };
        self
    }

    /// Replace the derive list
    pub fn derives<I, S>(mut self, derives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.derives = derives.into_iter().map(Into::into).collect();
        self
    }

    /// Set the sample size (0 = all documents)
    pub fn sample_size(mut self, size: usize) -> Self {
        self.config.sample_size = size;
        self
    }

    /// Set the maximum nesting depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth.max(1);
        self
    }

    /// Build the configuration
    pub fn build(self) -> InferenceConfig {
        self.config
    }
}
