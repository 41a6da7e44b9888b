//! Rust record exporter for generating serde structs from schema trees.
//!
//! Every top-level element becomes one struct, and every distinct child shape
//! becomes another struct named after its full ancestry (`Root_Subnode`).
//! Structurally identical children share the first type emitted for that
//! shape. Field attributes follow the quick-xml serde conventions: `$text`
//! for character data, `@name` for attributes and the raw tag for children.

use std::collections::HashSet;

use crate::export::{ExportError, ExportResult};
use crate::inference::{InferenceConfig, NodeRef, SchemaTree, same_structure};
use crate::validation::identifier::{CONTENT_FIELD, SEPARATOR, disambiguate, identifier};

/// Rust keywords that cannot name the wrapping module.
const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final", "gen",
    "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Type names a record must not take: the serde derives imported by the
/// generated code and the prelude types it could shadow.
const RESERVED_TYPE_NAMES: &[&str] = &[
    "Box",
    "Deserialize",
    "Option",
    "Result",
    "Serialize",
    "String",
    "Vec",
];

const STRING_TYPE: &str = "::std::string::String";
const VEC_TYPE: &str = "::std::vec::Vec";

/// What a generated field maps to in the XML document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Character data of the element
    Content,
    /// Attribute with the given raw name
    Attribute { name: String },
    /// Child element with the given raw tag
    Child {
        tag: String,
        type_name: String,
        is_array: bool,
    },
}

/// One field of a generated record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub ident: String,
    pub kind: FieldKind,
}

/// One generated record type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDef {
    /// Qualified type name
    pub name: String,
    /// Raw element name, only set for top-level records
    pub root_tag: Option<String>,
    /// Fields in emission order: content, attributes, children
    pub fields: Vec<FieldDef>,
}

/// Types assigned so far during one emission run.
struct EmitContext<'t> {
    /// Child nodes with freshly assigned types, in registration order
    known: Vec<(NodeRef<'t>, String)>,
    /// Every record name handed out
    type_names: HashSet<String>,
    records: Vec<RecordDef>,
}

impl<'t> EmitContext<'t> {
    fn new() -> Self {
        Self {
            known: Vec::new(),
            type_names: RESERVED_TYPE_NAMES.iter().map(|n| n.to_string()).collect(),
            records: Vec::new(),
        }
    }

    fn known_type(&self, node: NodeRef<'t>) -> Option<&str> {
        self.known
            .iter()
            .find(|(known, _)| same_structure(node, *known))
            .map(|(_, name)| name.as_str())
    }

    fn claim_type_name(&mut self, name: String) -> String {
        let name = disambiguate(name, &self.type_names);
        self.type_names.insert(name.clone());
        name
    }
}

/// Exporter for Rust struct definitions.
pub struct RustExporter {
    config: InferenceConfig,
}

impl RustExporter {
    /// Create an exporter honouring the emission settings of `config`
    pub fn new(config: InferenceConfig) -> Self {
        Self { config }
    }

    /// Build the record definitions for `tree` without rendering them.
    ///
    /// In canonical mode the records are built from a sorted copy; `tree`
    /// itself is never reordered.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::EmptyIdentifier`] when an element or attribute
    /// name sanitizes to nothing.
    pub fn records(&self, tree: &SchemaTree) -> Result<Vec<RecordDef>, ExportError> {
        let sorted;
        let tree = if self.config.canonical {
            sorted = tree.canonicalized();
            &sorted
        } else {
            tree
        };

        let mut ctx = EmitContext::new();
        for top in tree.top_level() {
            let name = checked_identifier(top.name(), || node_path(top))?;
            let name = ctx.claim_type_name(name);
            emit_record(top, name, &mut ctx)?;
        }
        Ok(ctx.records)
    }

    /// Export `tree` as Rust source
    ///
    /// # Returns
    ///
    /// The generated source (`format` is `"rust"`). The text is valid Rust but
    /// not run through a formatter.
    ///
    /// # Example
    ///
    /// ```rust
    /// use xml_typegen_core::export::RustExporter;
    /// use xml_typegen_core::inference::{InferenceConfig, XMLConverter};
    ///
    /// let mut converter = XMLConverter::new();
    /// converter.ingest_str(r#"<book id="1"><title>Dune</title></book>"#).unwrap();
    ///
    /// let result = RustExporter::new(InferenceConfig::default())
    ///     .export(converter.tree())
    ///     .unwrap();
    /// assert!(result.content.contains("pub struct Book_Title {"));
    /// ```
    pub fn export(&self, tree: &SchemaTree) -> Result<ExportResult, ExportError> {
        if let Some(module) = &self.config.module_name {
            validate_module_name(module)?;
        }
        let records = self.records(tree)?;
        tracing::debug!(records = records.len(), "Generated record definitions");
        Ok(ExportResult {
            content: self.render(&records),
            format: "rust".to_string(),
        })
    }

    /// Render record definitions as Rust source
    pub fn render(&self, records: &[RecordDef]) -> String {
        let derives = &self.config.derives;
        let serde_derives: Vec<&str> = ["Deserialize", "Serialize"]
            .into_iter()
            .filter(|d| derives.iter().any(|have| have == d))
            .collect();
        let style = RenderStyle {
            derives: derives.join(", "),
            serde: !serde_derives.is_empty(),
            default: derives.iter().any(|d| d == "Default"),
            indent: if self.config.module_name.is_some() { "    " } else { "" },
        };

        let mut out = String::new();
        if self.config.emit_preamble {
            out.push_str("// Code generated by xtg from sample XML documents. DO NOT EDIT.\n\n");
        }
        if let Some(module) = &self.config.module_name {
            out.push_str(&format!("pub mod {} {{\n", module));
        }
        // Imports outside the module do not reach into it.
        let import = self.config.emit_preamble || self.config.module_name.is_some();
        if import && style.serde {
            out.push_str(&format!(
                "{}use serde::{{{}}};\n\n",
                style.indent,
                serde_derives.join(", ")
            ));
        }

        for (i, record) in records.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            render_record(&mut out, record, &style);
        }

        if self.config.module_name.is_some() {
            out.push_str("}\n");
        }
        out
    }
}

/// Append the record for `node` and then, recursively, the records of its
/// freshly typed children.
fn emit_record<'t>(
    node: NodeRef<'t>,
    type_name: String,
    ctx: &mut EmitContext<'t>,
) -> Result<(), ExportError> {
    let mut taken = HashSet::new();
    let mut take = |base: String| {
        let ident = disambiguate(base, &taken);
        taken.insert(ident.clone());
        ident
    };

    let mut fields = Vec::new();
    if node.has_character_data() {
        fields.push(FieldDef {
            ident: take(identifier(CONTENT_FIELD)),
            kind: FieldKind::Content,
        });
    }

    for attr in node.attributes() {
        let base = checked_identifier(attr, || format!("{}/@{}", node_path(node), attr))?;
        fields.push(FieldDef {
            ident: take(base),
            kind: FieldKind::Attribute { name: attr.clone() },
        });
    }

    let mut fresh = Vec::new();
    for child in node.children() {
        let base = checked_identifier(child.name(), || node_path(child))?;
        let child_type = match ctx.known_type(child).map(str::to_string) {
            Some(name) => name,
            None => {
                let name = ctx.claim_type_name(format!("{}{}{}", type_name, SEPARATOR, base));
                ctx.known.push((child, name.clone()));
                fresh.push((child, name.clone()));
                name
            }
        };
        fields.push(FieldDef {
            ident: take(base),
            kind: FieldKind::Child {
                tag: child.name().to_string(),
                type_name: child_type,
                is_array: child.is_array(),
            },
        });
    }

    ctx.records.push(RecordDef {
        name: type_name,
        root_tag: node.is_top_level().then(|| node.name().to_string()),
        fields,
    });

    for (child, name) in fresh {
        emit_record(child, name, ctx)?;
    }
    Ok(())
}

fn node_path(node: NodeRef<'_>) -> String {
    node.tree().path(node.id()).join("/")
}

fn checked_identifier(raw: &str, path: impl FnOnce() -> String) -> Result<String, ExportError> {
    let ident = identifier(raw);
    if ident.is_empty() {
        return Err(ExportError::EmptyIdentifier { path: path() });
    }
    Ok(ident)
}

fn validate_module_name(name: &str) -> Result<(), ExportError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == SEPARATOR);
    let valid = valid_start
        && chars.all(|c| c.is_alphanumeric() || c == SEPARATOR)
        && name != "_"
        && !RUST_KEYWORDS.contains(&name);
    if !valid {
        return Err(ExportError::InvalidModuleName(name.to_string()));
    }
    Ok(())
}

struct RenderStyle {
    derives: String,
    serde: bool,
    default: bool,
    indent: &'static str,
}

fn render_record(out: &mut String, record: &RecordDef, style: &RenderStyle) {
    let ind = style.indent;
    out.push_str(&format!("{ind}#[allow(non_camel_case_types, non_snake_case)]\n"));
    if !style.derives.is_empty() {
        out.push_str(&format!("{ind}#[derive({})]\n", style.derives));
    }
    if style.serde {
        if let Some(tag) = &record.root_tag {
            out.push_str(&format!("{ind}#[serde(rename = {:?})]\n", tag));
        }
    }
    out.push_str(&format!("{ind}pub struct {} {{\n", record.name));

    for field in &record.fields {
        let (rename, ty) = match &field.kind {
            FieldKind::Content => ("$text".to_string(), STRING_TYPE.to_string()),
            FieldKind::Attribute { name } => (format!("@{}", name), STRING_TYPE.to_string()),
            FieldKind::Child {
                tag,
                type_name,
                is_array,
            } => {
                let ty = if *is_array {
                    format!("{}<{}>", VEC_TYPE, type_name)
                } else {
                    type_name.clone()
                };
                (tag.clone(), ty)
            }
        };
        if style.serde {
            let default = if style.default { ", default" } else { "" };
            out.push_str(&format!("{ind}    #[serde(rename = {:?}{})]\n", rename, default));
        }
        out.push_str(&format!("{ind}    pub {}: {},\n", field.ident, ty));
    }

    out.push_str(&format!("{ind}}}\n"));
}
