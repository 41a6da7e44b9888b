//! Schema merging utilities
//!
//! Combines schema trees built by separate converters into one tree that
//! carries the union of their facts. Inputs are only borrowed; the result
//! is a fresh tree.

use super::types::{NodeId, NodeRef, SchemaTree};

/// Merge two schema trees into a new tree
///
/// The result starts as a copy of `a`; every fact of `b` is then folded in:
/// flags are OR-ed, unseen attributes and children are appended after
/// `a`'s own, and same-named children are merged recursively.
pub fn merge_trees(a: &SchemaTree, b: &SchemaTree) -> SchemaTree {
    let mut result = a.clone();
    merge_into(&mut result, SchemaTree::ROOT, b, SchemaTree::ROOT);
    tracing::debug!(
        left = a.len(),
        right = b.len(),
        merged = result.len(),
        "Merged schema trees"
    );
    result
}

/// Merge two nodes into a standalone tree rooted at their common name
///
/// # Panics
///
/// Panics if the two nodes have different names; merging unrelated
/// elements is a caller bug.
pub fn merge_nodes(a: NodeRef<'_>, b: NodeRef<'_>) -> SchemaTree {
    assert_names_match(a.name(), b.name());

    let mut result = a.tree().subtree(a.id());
    let target = if a.is_root() {
        SchemaTree::ROOT
    } else {
        result
            .child_of(SchemaTree::ROOT, a.name())
            .unwrap_or(SchemaTree::ROOT)
    };
    merge_into(&mut result, target, b.tree(), b.id());
    result
}

impl SchemaTree {
    /// New tree holding the union of `self` and `other`
    pub fn merged_with(&self, other: &SchemaTree) -> SchemaTree {
        merge_trees(self, other)
    }
}

fn assert_names_match(a: &str, b: &str) {
    assert!(
        a == b,
        "developer error: only nodes with equal names can be merged ({a:?} vs {b:?})"
    );
}

fn merge_into(target: &mut SchemaTree, id: NodeId, source: &SchemaTree, source_id: NodeId) {
    let src = source.node(source_id);
    let node = target.node_mut(id);
    assert_names_match(&node.name, src.name());

    node.is_array |= src.is_array();
    node.has_character_data |= src.has_character_data();
    for attr in src.attributes() {
        node.add_attribute(attr);
    }

    for child in src.children() {
        match target.child_of(id, child.name()) {
            Some(existing) => merge_into(target, existing, source, child.id()),
            None => {
                target.graft(id, source, child.id());
            }
        }
    }
}
