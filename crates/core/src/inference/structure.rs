//! Structural comparison of schema nodes
//!
//! Two nodes have the same structure when they would generate identical
//! record bodies. The node's own name is ignored, so `<a x="1"/>` and
//! `<b x="1"/>` can share one generated type.

use super::types::{NodeRef, SchemaTree};

/// Check whether two nodes, possibly from different trees, describe the
/// same shape.
///
/// Compares the character-data flag, the attribute sequence (order
/// matters), the ordered child names, each child's array flag, and then
/// each child pair recursively.
pub fn same_structure(a: NodeRef<'_>, b: NodeRef<'_>) -> bool {
    if a.has_character_data() != b.has_character_data() {
        return false;
    }
    if a.attributes() != b.attributes() {
        return false;
    }
    if a.child_count() != b.child_count() {
        return false;
    }
    let fields_match = a
        .children()
        .zip(b.children())
        .all(|(x, y)| x.name() == y.name() && x.is_array() == y.is_array());
    if !fields_match {
        return false;
    }
    a.children()
        .zip(b.children())
        .all(|(x, y)| same_structure(x, y))
}

/// Check whether two whole trees describe the same schema
pub fn same_tree_structure(a: &SchemaTree, b: &SchemaTree) -> bool {
    same_structure(a.root(), b.root())
}
