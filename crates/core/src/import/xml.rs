//! XML importer
//!
//! Decodes an XML document into an [`XMLElement`] tree: local names,
//! attributes, raw inner content and child elements. Tokenization is done by
//! `quick-xml`; this module only assembles the tree.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::inference::InferenceError;

/// Default maximum element nesting depth
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// One decoded element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XMLElement {
    /// Local element name (prefix stripped)
    pub name: String,
    /// `(local name, unescaped value)` pairs in document order
    pub attributes: Vec<(String, String)>,
    /// Raw source text between the start and end tag
    pub content: String,
    /// Child elements in document order
    pub children: Vec<XMLElement>,
}

impl XMLElement {
    /// Create an element without attributes, content or children
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add an attribute
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Set the raw inner content
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Append a child element
    pub fn with_child(mut self, child: XMLElement) -> Self {
        self.children.push(child);
        self
    }

    /// True if the trimmed inner content is text rather than nested markup
    pub fn has_character_data(&self) -> bool {
        let content = self.content.trim();
        !content.is_empty() && !content.starts_with('<')
    }

    /// Nesting depth of this element (1 for a leaf)
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(XMLElement::depth).max().unwrap_or(0)
    }
}

/// XML Importer
///
/// Decodes exactly one root element; anything after it is ignored.
#[derive(Debug, Clone)]
pub struct XMLImporter {
    max_depth: usize,
}

impl Default for XMLImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl XMLImporter {
    /// Create a new XMLImporter with the default depth limit
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    /// Create an importer rejecting documents nested deeper than `max_depth`
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Decode raw bytes, which must be UTF-8
    pub fn parse_bytes(&self, data: &[u8]) -> Result<XMLElement, InferenceError> {
        let xml = std::str::from_utf8(data)?;
        self.parse_str(xml)
    }

    /// Decode an XML document
    ///
    /// # Arguments
    ///
    /// * `xml` - The XML content as a string.
    ///
    /// # Returns
    ///
    /// The root element, or an error for malformed input, documents without
    /// an element, and documents deeper than the configured limit.
    pub fn parse_str(&self, xml: &str) -> Result<XMLElement, InferenceError> {
        let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
        let mut reader = Reader::from_str(xml);

        // Open elements with the byte offset where their content starts.
        let mut stack: Vec<(XMLElement, usize)> = Vec::new();

        loop {
            let event = reader.read_event().map_err(|e| {
                InferenceError::decode(reader.error_position() as u64, e.to_string())
            })?;
            let position = reader.buffer_position() as usize;

            match event {
                Event::Start(ref e) => {
                    self.check_depth(stack.len() + 1)?;
                    let element = start_element(e, position)?;
                    stack.push((element, position));
                }
                Event::Empty(ref e) => {
                    self.check_depth(stack.len() + 1)?;
                    let element = start_element(e, position)?;
                    if let Some(root) = attach(&mut stack, element) {
                        return Ok(root);
                    }
                }
                Event::End(_) => {
                    let (mut element, start) = stack.pop().ok_or_else(|| {
                        InferenceError::decode(position as u64, "unexpected closing tag")
                    })?;
                    let end = xml[start..position]
                        .rfind("</")
                        .map_or(start, |offset| start + offset);
                    element.content = xml[start..end].to_string();
                    if let Some(root) = attach(&mut stack, element) {
                        return Ok(root);
                    }
                }
                Event::Eof => {
                    return Err(match stack.last() {
                        None => InferenceError::NoRootElement,
                        Some((open, _)) => InferenceError::decode(
                            position as u64,
                            format!("unexpected end of input, <{}> is not closed", open.name),
                        ),
                    });
                }
                _ => {}
            }
        }
    }

    fn check_depth(&self, depth: usize) -> Result<(), InferenceError> {
        if depth > self.max_depth {
            return Err(InferenceError::MaxDepthExceeded {
                depth,
                max: self.max_depth,
            });
        }
        Ok(())
    }
}

/// Build an element from a start tag, dropping namespace declarations.
fn start_element(start: &BytesStart<'_>, position: usize) -> Result<XMLElement, InferenceError> {
    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
    let mut element = XMLElement::new(name);

    for attr in start.attributes() {
        let attr = attr.map_err(|e| InferenceError::decode(position as u64, e.to_string()))?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let local = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| InferenceError::decode(position as u64, e.to_string()))?
            .into_owned();
        element.attributes.push((local, value));
    }

    Ok(element)
}

/// Attach a finished element to its parent; returns it when it is the root.
fn attach(stack: &mut [(XMLElement, usize)], element: XMLElement) -> Option<XMLElement> {
    match stack.last_mut() {
        Some((parent, _)) => {
            parent.children.push(element);
            None
        }
        None => Some(element),
    }
}

/// Decode a document with the default importer settings
pub fn parse_document(xml: &str) -> Result<XMLElement, InferenceError> {
    XMLImporter::new().parse_str(xml)
}
