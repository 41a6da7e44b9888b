//! Schema tree model
//!
//! A [`SchemaTree`] is an arena of [`SchemaNode`]s. Slot 0 holds a synthetic,
//! unnamed root whose children are the top-level elements of every ingested
//! document. Parent links are arena indices and never own anything, so a
//! tree can be cloned, sorted or merged without aliasing.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Index of a node inside one [`SchemaTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Accumulated structural facts about one element name at one position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaNode {
    pub(crate) name: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) is_array: bool,
    pub(crate) has_character_data: bool,
    pub(crate) attributes: Vec<String>,
    pub(crate) children: Vec<NodeId>,
    child_index: HashMap<String, NodeId>,
}

impl SchemaNode {
    fn new(name: String, parent: Option<NodeId>) -> Self {
        Self {
            name,
            parent,
            is_array: false,
            has_character_data: false,
            attributes: Vec::new(),
            children: Vec::new(),
            child_index: HashMap::new(),
        }
    }

    /// Local element name (empty for the synthetic root)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Owning node, `None` for the synthetic root
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Whether some document repeated this element under one parent
    pub fn is_array(&self) -> bool {
        self.is_array
    }

    /// Whether some instance carried non-markup text
    pub fn has_character_data(&self) -> bool {
        self.has_character_data
    }

    /// Attribute names in first-seen order
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// Child ids in first-seen order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Record an attribute name; returns false if it was already present
    pub(crate) fn add_attribute(&mut self, name: &str) -> bool {
        if self.attributes.iter().any(|a| a == name) {
            return false;
        }
        self.attributes.push(name.to_string());
        true
    }
}

/// Arena-backed schema tree with a synthetic root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaTree {
    nodes: Vec<SchemaNode>,
}

impl SchemaTree {
    /// Id of the synthetic root in every tree
    pub const ROOT: NodeId = NodeId(0);

    /// Create a tree holding only the synthetic root
    pub fn new() -> Self {
        Self {
            nodes: vec![SchemaNode::new(String::new(), None)],
        }
    }

    /// Number of schema nodes, excluding the synthetic root
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    /// True when nothing has been ingested
    pub fn is_empty(&self) -> bool {
        self.nodes[0].children.is_empty()
    }

    /// View of the synthetic root
    pub fn root(&self) -> NodeRef<'_> {
        self.node(Self::ROOT)
    }

    /// View of a node of this tree
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this tree.
    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        assert!(id.0 < self.nodes.len(), "node id {} out of range", id.0);
        NodeRef { tree: self, id }
    }

    /// Top-level nodes (children of the synthetic root)
    pub fn top_level(&self) -> impl Iterator<Item = NodeRef<'_>> {
        self.root().children()
    }

    /// Look up a node by its element-name path from the top level
    pub fn find(&self, path: &[&str]) -> Option<NodeId> {
        path.iter()
            .try_fold(Self::ROOT, |id, name| self.child_of(id, name))
            .filter(|_| !path.is_empty())
    }

    /// Child of `parent` named `name`
    pub fn child_of(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.nodes[parent.0].child_index.get(name).copied()
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut SchemaNode {
        &mut self.nodes[id.0]
    }

    /// Find the child named `name` or append a new one.
    pub(crate) fn get_or_add_child(&mut self, parent: NodeId, name: &str) -> NodeId {
        if let Some(id) = self.child_of(parent, name) {
            return id;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(SchemaNode::new(name.to_string(), Some(parent)));
        let parent_node = &mut self.nodes[parent.0];
        parent_node.children.push(id);
        parent_node.child_index.insert(name.to_string(), id);
        id
    }

    /// Deep-copy `src_id` of `src` below `parent` and return the copy's id.
    ///
    /// `parent` must not already have a child of the same name.
    pub(crate) fn graft(&mut self, parent: NodeId, src: &SchemaTree, src_id: NodeId) -> NodeId {
        let source = &src.nodes[src_id.0];
        debug_assert!(self.child_of(parent, &source.name).is_none());

        let id = self.get_or_add_child(parent, &source.name);
        let node = self.node_mut(id);
        node.is_array = source.is_array;
        node.has_character_data = source.has_character_data;
        node.attributes = source.attributes.clone();

        for &child in &source.children {
            self.graft(id, src, child);
        }
        id
    }

    /// Copy the subtree rooted at `id` into a standalone tree where it is
    /// the only top-level node.
    pub fn subtree(&self, id: NodeId) -> SchemaTree {
        let mut tree = SchemaTree::new();
        if id == Self::ROOT {
            for &child in &self.nodes[0].children {
                tree.graft(Self::ROOT, self, child);
            }
        } else {
            tree.graft(Self::ROOT, self, id);
        }
        tree
    }

    /// Copy of this tree with every attribute list and child list sorted
    /// lexicographically. The original order is left untouched.
    pub fn canonicalized(&self) -> SchemaTree {
        let mut tree = self.clone();
        for i in 0..tree.nodes.len() {
            let mut children = tree.nodes[i].children.clone();
            children.sort_by(|a, b| tree.nodes[a.0].name.cmp(&tree.nodes[b.0].name));
            let node = &mut tree.nodes[i];
            node.children = children;
            node.attributes.sort();
        }
        tree
    }

    /// Raw element names from the top level down to `id`
    pub fn path(&self, id: NodeId) -> Vec<&str> {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(cur) = current {
            let node = &self.nodes[cur.0];
            if node.parent.is_none() {
                break;
            }
            names.push(node.name.as_str());
            current = node.parent;
        }
        names.reverse();
        names
    }

    /// Serializable description of every top-level node
    pub fn describe(&self) -> Vec<NodeDescriptor> {
        self.top_level().map(NodeDescriptor::from).collect()
    }

    /// Rebuild a tree from descriptors. Duplicate sibling names are folded
    /// together with the same rules as ingestion.
    pub fn from_descriptors(descriptors: &[NodeDescriptor]) -> SchemaTree {
        fn add(tree: &mut SchemaTree, parent: NodeId, desc: &NodeDescriptor) {
            let id = tree.get_or_add_child(parent, &desc.name);
            let node = tree.node_mut(id);
            node.is_array |= desc.is_array;
            node.has_character_data |= desc.has_character_data;
            for attr in &desc.attributes {
                node.add_attribute(attr);
            }
            for child in &desc.children {
                add(tree, id, child);
            }
        }

        let mut tree = SchemaTree::new();
        for desc in descriptors {
            add(&mut tree, Self::ROOT, desc);
        }
        tree
    }
}

impl Default for SchemaTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Borrowed view of one node together with its tree
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a SchemaTree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    fn raw(self) -> &'a SchemaNode {
        &self.tree.nodes[self.id.0]
    }

    /// Arena index of this node
    pub fn id(self) -> NodeId {
        self.id
    }

    /// Tree this node belongs to
    pub fn tree(self) -> &'a SchemaTree {
        self.tree
    }

    /// Raw element name (empty for the synthetic root)
    pub fn name(self) -> &'a str {
        &self.raw().name
    }

    /// True for the synthetic root
    pub fn is_root(self) -> bool {
        self.raw().parent.is_none()
    }

    /// True for direct children of the synthetic root
    pub fn is_top_level(self) -> bool {
        self.raw().parent == Some(SchemaTree::ROOT)
    }

    /// Element was seen repeated under one parent element
    pub fn is_array(self) -> bool {
        self.raw().is_array
    }

    /// Element was seen with non-markup text content
    pub fn has_character_data(self) -> bool {
        self.raw().has_character_data
    }

    /// Attribute names in stored order
    pub fn attributes(self) -> &'a [String] {
        &self.raw().attributes
    }

    /// Parent node, `None` only for the synthetic root
    pub fn parent(self) -> Option<NodeRef<'a>> {
        let tree = self.tree;
        self.raw().parent.map(|id| NodeRef { tree, id })
    }

    /// Number of distinct child names
    pub fn child_count(self) -> usize {
        self.raw().children.len()
    }

    /// Children in stored order
    pub fn children(self) -> impl ExactSizeIterator<Item = NodeRef<'a>> + 'a {
        let tree = self.tree;
        self.raw()
            .children
            .iter()
            .map(move |&id| NodeRef { tree, id })
    }

    /// Child with the given raw name
    pub fn child(self, name: &str) -> Option<NodeRef<'a>> {
        let tree = self.tree;
        tree.child_of(self.id, name).map(|id| NodeRef { tree, id })
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("path", &self.tree.path(self.id).join("/"))
            .finish()
    }
}

/// Serializable snapshot of a schema node and its descendants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescriptor {
    pub name: String,
    #[serde(default)]
    pub is_array: bool,
    #[serde(default)]
    pub has_character_data: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeDescriptor>,
}

impl From<NodeRef<'_>> for NodeDescriptor {
    fn from(node: NodeRef<'_>) -> Self {
        Self {
            name: node.name().to_string(),
            is_array: node.is_array(),
            has_character_data: node.has_character_data(),
            attributes: node.attributes().to_vec(),
            children: node.children().map(NodeDescriptor::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> SchemaTree {
        let mut tree = SchemaTree::new();
        let top = tree.get_or_add_child(SchemaTree::ROOT, "top");
        let zeta = tree.get_or_add_child(top, "zeta");
        let alpha = tree.get_or_add_child(top, "alpha");
        tree.get_or_add_child(alpha, "leaf");
        tree.node_mut(top).add_attribute("b");
        tree.node_mut(top).add_attribute("a");
        tree.node_mut(zeta).is_array = true;
        tree
    }

    #[test]
    fn test_new_tree_is_empty() {
        let tree = SchemaTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(tree.root().is_root());
        assert_eq!(tree.root().name(), "");
    }

    #[test]
    fn test_get_or_add_child_reuses_by_name() {
        let mut tree = SchemaTree::new();
        let a = tree.get_or_add_child(SchemaTree::ROOT, "a");
        let again = tree.get_or_add_child(SchemaTree::ROOT, "a");
        let b = tree.get_or_add_child(SchemaTree::ROOT, "b");
        assert_eq!(a, again);
        assert_ne!(a, b);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.node(a).parent().map(|p| p.id()), Some(SchemaTree::ROOT));
        assert!(tree.node(a).is_top_level());
    }

    #[test]
    fn test_add_attribute_no_duplicates() {
        let mut tree = SchemaTree::new();
        let a = tree.get_or_add_child(SchemaTree::ROOT, "a");
        assert!(tree.node_mut(a).add_attribute("x"));
        assert!(!tree.node_mut(a).add_attribute("x"));
        assert!(tree.node_mut(a).add_attribute("y"));
        assert_eq!(tree.node(a).attributes(), ["x", "y"]);
    }

    #[test]
    fn test_find_and_path() {
        let tree = sample_tree();
        let leaf = tree.find(&["top", "alpha", "leaf"]).unwrap();
        assert_eq!(tree.path(leaf), vec!["top", "alpha", "leaf"]);
        assert!(tree.find(&["top", "missing"]).is_none());
        assert!(tree.find(&[]).is_none());
    }

    #[test]
    fn test_canonicalized_sorts_copy_only() {
        let tree = sample_tree();
        let sorted = tree.canonicalized();

        let top = tree.node(tree.find(&["top"]).unwrap());
        let names: Vec<_> = top.children().map(|c| c.name()).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
        assert_eq!(top.attributes(), ["b", "a"]);

        let sorted_top = sorted.node(sorted.find(&["top"]).unwrap());
        let names: Vec<_> = sorted_top.children().map(|c| c.name()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
        assert_eq!(sorted_top.attributes(), ["a", "b"]);
    }

    #[test]
    fn test_subtree_detaches_copy() {
        let tree = sample_tree();
        let alpha = tree.find(&["top", "alpha"]).unwrap();
        let sub = tree.subtree(alpha);

        assert_eq!(sub.len(), 2);
        let top: Vec<_> = sub.top_level().map(|n| n.name()).collect();
        assert_eq!(top, vec!["alpha"]);
        let leaf = sub.find(&["alpha", "leaf"]).unwrap();
        assert_eq!(sub.path(leaf), vec!["alpha", "leaf"]);
    }

    #[test]
    fn test_descriptor_roundtrip_preserves_facts() {
        let tree = sample_tree();
        let rebuilt = SchemaTree::from_descriptors(&tree.describe());
        assert_eq!(rebuilt.describe(), tree.describe());
        let zeta = rebuilt.find(&["top", "zeta"]).unwrap();
        assert!(rebuilt.node(zeta).is_array());
    }

    #[test]
    fn test_from_descriptors_folds_duplicate_names() {
        let descriptors: Vec<NodeDescriptor> = serde_json::from_str(
            r#"[
                {"name": "a", "attributes": ["x"]},
                {"name": "a", "hasCharacterData": true, "attributes": ["y", "x"]}
            ]"#,
        )
        .unwrap();
        let tree = SchemaTree::from_descriptors(&descriptors);
        assert_eq!(tree.len(), 1);
        let a = tree.node(tree.find(&["a"]).unwrap());
        assert!(a.has_character_data());
        assert_eq!(a.attributes(), ["x", "y"]);
    }
}
