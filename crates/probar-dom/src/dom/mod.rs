//! Minimal in-memory document model.
//!
//! Just enough of the DOM for element matchers to read: a tree of
//! reference-counted nodes owned by a [`Document`] that tracks the focused
//! element, attributes, form-control state, expando properties, inline and
//! resolved styles, and HTML fragment parsing/serialization.
//!
//! This is not a query engine and does not run scripts.

mod form;
mod node;
mod parse;
mod props;
mod serialize;
pub mod style;

pub use node::{Node, NodeType};
pub use style::{ComputedStyle, StyleDeclaration, StyleSource};

use std::rc::Weak;

/// A document: the root of a tree with `<html>`, `<head>` and `<body>`.
#[derive(Clone, PartialEq, Eq)]
pub struct Document(pub(crate) Node);

impl Document {
    /// Create an empty document (`<html><head></head><body></body></html>`)
    #[must_use]
    pub fn new() -> Self {
        let document = Self(Node::new_document());
        let html = document.create_element("html");
        html.push_child(document.create_element("head"));
        html.push_child(document.create_element("body"));
        document.0.push_child(html);
        document
    }

    /// The document as a plain node
    #[must_use]
    pub fn as_node(&self) -> &Node {
        &self.0
    }

    /// Create an element owned by this document (detached until appended)
    #[must_use]
    pub fn create_element(&self, tag: &str) -> Node {
        Node::new_element(self.0.owner_weak(), tag)
    }

    /// Create a text node owned by this document
    #[must_use]
    pub fn create_text_node(&self, data: &str) -> Node {
        Node::new_text(self.0.owner_weak(), data)
    }

    /// Create a comment node owned by this document
    #[must_use]
    pub fn create_comment(&self, data: &str) -> Node {
        Node::new_comment(self.0.owner_weak(), data)
    }

    /// Parse markup into detached nodes owned by this document
    pub fn parse_fragment(&self, html: &str) -> crate::DomResult<NodeList> {
        parse::parse_fragment(html, &self.0.owner_weak()).map(NodeList::from)
    }

    /// The `<html>` element
    #[must_use]
    pub fn document_element(&self) -> Option<Node> {
        self.0.children().into_iter().next()
    }

    fn root_child(&self, name: &str) -> Option<Node> {
        self.document_element()?
            .children()
            .into_iter()
            .find(|node| node.has_local_name(&[name]))
    }

    /// The `<head>` element
    #[must_use]
    pub fn head(&self) -> Option<Node> {
        self.root_child("head")
    }

    /// The `<body>` element
    #[must_use]
    pub fn body(&self) -> Option<Node> {
        self.root_child("body")
    }

    /// The element that currently has focus, if any
    #[must_use]
    pub fn focused_element(&self) -> Option<Node> {
        self.0
            .focused_slot()
            .and_then(|slot| slot.borrow().upgrade())
            .map(Node)
    }

    /// `document.activeElement`: the focused element, or `<body>` when
    /// nothing has focus
    #[must_use]
    pub fn active_element(&self) -> Option<Node> {
        self.focused_element().or_else(|| self.body())
    }

    pub(crate) fn set_focused(&self, node: Option<&Node>) {
        if let Some(slot) = self.0.focused_slot() {
            *slot.borrow_mut() = node.map_or_else(Weak::new, |node| std::rc::Rc::downgrade(&node.0));
        }
    }

    pub(crate) fn forget_focus_within(&self, subtree: &Node) {
        if self
            .focused_element()
            .is_some_and(|focused| subtree.contains(&focused))
        {
            self.set_focused(None);
        }
    }

    /// First connected element with the given `id`
    #[must_use]
    pub fn get_element_by_id(&self, id: &str) -> Option<Node> {
        self.0
            .descendants()
            .into_iter()
            .find(|node| node.is_element() && node.get_attribute("id").as_deref() == Some(id))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("focused", &self.focused_element())
            .finish_non_exhaustive()
    }
}

/// An ordered, static snapshot of nodes (`NodeList` / `HTMLCollection`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeList(Vec<Node>);

impl NodeList {
    /// Number of nodes
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Node at `index`
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.0.get(index)
    }

    /// Iterate over the nodes
    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.0.iter()
    }
}

impl From<Vec<Node>> for NodeList {
    fn from(nodes: Vec<Node>) -> Self {
        Self(nodes)
    }
}

impl FromIterator<Node> for NodeList {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for NodeList {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a NodeList {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
