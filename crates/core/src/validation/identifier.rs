//! Identifier sanitization for generated Rust types and fields.
//!
//! XML names may contain characters that are not valid in Rust identifiers
//! (`-`, `.`, `:`), may start with digits, or may collide with keywords.
//! [`identifier`] maps a raw element or attribute name onto a capitalized
//! identifier; [`validate_identifier`] checks that the result can be emitted.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use unicode_ident::{is_xid_continue, is_xid_start};

/// Separator used to join qualified type names and to disambiguate
/// colliding field identifiers.
pub const SEPARATOR: char = '_';

/// Raw name sanitized to produce the character-data field identifier.
pub const CONTENT_FIELD: &str = "Content";

/// Identifiers that sanitize to a keyword or a reserved token get one
/// trailing separator appended.
const RESERVED_IDENTIFIERS: &[&str] = &["Self", "_"];

/// Errors that can occur during identifier validation.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ValidationError {
    /// Input is empty when a value is required
    #[error("{0} cannot be empty")]
    Empty(&'static str),

    /// Input contains invalid characters
    #[error("{field} contains invalid characters: {reason}")]
    InvalidCharacters { field: &'static str, reason: String },

    /// Input has invalid format
    #[error("{0}: {1}")]
    InvalidFormat(&'static str, String),

    /// Input is a reserved word
    #[error("{field} cannot be a reserved word: {word}")]
    ReservedWord { field: &'static str, word: String },
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Sanitize a raw XML name into a type or field identifier.
///
/// # Rules
///
/// - Every character that is not a letter, digit or underscore is dropped,
///   as is anything Rust does not accept inside an identifier (`⁴`, `½`)
/// - Leading characters that cannot start an identifier are dropped
/// - The first remaining character is uppercased when its uppercase form is
///   a single character
/// - `Self` and a lone `_` get a trailing underscore
///
/// A name made only of symbols and digits sanitizes to the empty string;
/// callers must treat that as an error.
///
/// # Examples
///
/// ```
/// use xml_typegen_core::validation::identifier;
///
/// assert_eq!(identifier("subnode"), "Subnode");
/// assert_eq!(identifier("first-name"), "Firstname");
/// assert_eq!(identifier("3d_model"), "D_model");
/// assert_eq!(identifier("self"), "Self_");
/// assert_eq!(identifier("-123"), "");
/// ```
pub fn identifier(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|&c| is_identifier_char(c))
        .skip_while(|&c| !is_identifier_start(c))
        .collect();

    let mut chars = kept.chars();
    let mut ident = match chars.next() {
        Some(first) => {
            let mut upper = first.to_uppercase();
            let first = match (upper.next(), upper.next()) {
                (Some(single), None) => single,
                _ => first,
            };
            std::iter::once(first).chain(chars).collect::<String>()
        }
        None => return String::new(),
    };

    if RESERVED_IDENTIFIERS.contains(&ident.as_str()) {
        ident.push(SEPARATOR);
    }
    ident
}

/// Validate a sanitized identifier before it is written into generated code.
///
/// # Examples
///
/// ```
/// use xml_typegen_core::validation::{identifier, validate_identifier};
///
/// assert!(validate_identifier(&identifier("order")).is_ok());
/// assert!(validate_identifier(&identifier("%%")).is_err());
/// assert!(validate_identifier("9lives").is_err());
/// ```
pub fn validate_identifier(ident: &str) -> ValidationResult<()> {
    let first_char = match ident.chars().next() {
        Some(c) => c,
        None => return Err(ValidationError::Empty("identifier")),
    };
    if first_char.is_numeric() {
        return Err(ValidationError::InvalidFormat(
            "identifier",
            "must not start with a digit".to_string(),
        ));
    }

    if !is_identifier_start(first_char) {
        return Err(ValidationError::InvalidFormat(
            "identifier",
            format!("cannot start with '{}'", first_char),
        ));
    }

    if let Some(c) = ident.chars().find(|&c| !is_identifier_char(c)) {
        return Err(ValidationError::InvalidCharacters {
            field: "identifier",
            reason: format!("invalid character: '{}'", c),
        });
    }

    if RESERVED_IDENTIFIERS.contains(&ident) {
        return Err(ValidationError::ReservedWord {
            field: "identifier",
            word: ident.to_string(),
        });
    }

    Ok(())
}

/// Letters, digits and underscores that Rust accepts inside an identifier.
fn is_identifier_char(c: char) -> bool {
    (c.is_alphabetic() || c.is_numeric() || c == SEPARATOR) && is_xid_continue(c)
}

fn is_identifier_start(c: char) -> bool {
    c == SEPARATOR || is_xid_start(c)
}

/// Return `base` with separators appended until `taken` does not contain it.
pub(crate) fn disambiguate(base: String, taken: &std::collections::HashSet<String>) -> String {
    let mut ident = base;
    while taken.contains(&ident) {
        ident.push(SEPARATOR);
    }
    ident
}
