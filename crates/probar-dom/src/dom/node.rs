//! Reference-counted DOM nodes.
//!
//! Nodes are cheap handles (`Rc`) over shared, interior-mutable state.
//! Parents are held weakly so that dropping a detached subtree frees it.
//! Identity is pointer identity: two handles are equal iff they refer to the
//! same node.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use serde_json::Value;

use super::form::FormState;
use super::{parse, serialize, Document, NodeList};
use crate::result::{DomError, DomResult};

/// DOM node type discriminator (`nodeType`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    /// Element node
    Element = 1,
    /// Text node
    Text = 3,
    /// Comment node
    Comment = 8,
    /// Document node
    Document = 9,
}

pub(crate) struct NodeInner {
    pub(crate) kind: NodeKind,
    parent: RefCell<Weak<NodeInner>>,
    children: RefCell<Vec<Node>>,
    owner: Weak<NodeInner>,
}

pub(crate) enum NodeKind {
    Document { focused: RefCell<Weak<NodeInner>> },
    Element(ElementData),
    Text(RefCell<String>),
    Comment(RefCell<String>),
}

pub(crate) struct ElementData {
    pub(crate) local_name: String,
    pub(crate) attrs: RefCell<Vec<(String, String)>>,
    pub(crate) form: RefCell<FormState>,
    pub(crate) expandos: RefCell<BTreeMap<String, Value>>,
}

/// Handle to a DOM node
#[derive(Clone)]
pub struct Node(pub(crate) Rc<NodeInner>);

impl Node {
    fn with_kind(owner: Weak<NodeInner>, kind: NodeKind) -> Self {
        Self(Rc::new(NodeInner {
            kind,
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
            owner,
        }))
    }

    pub(crate) fn new_document() -> Self {
        Self::with_kind(
            Weak::new(),
            NodeKind::Document {
                focused: RefCell::new(Weak::new()),
            },
        )
    }

    pub(crate) fn new_element(owner: Weak<NodeInner>, local_name: &str) -> Self {
        Self::with_kind(
            owner,
            NodeKind::Element(ElementData {
                local_name: local_name.to_ascii_lowercase(),
                attrs: RefCell::new(Vec::new()),
                form: RefCell::new(FormState::default()),
                expandos: RefCell::new(BTreeMap::new()),
            }),
        )
    }

    pub(crate) fn new_text(owner: Weak<NodeInner>, data: &str) -> Self {
        Self::with_kind(owner, NodeKind::Text(RefCell::new(data.to_string())))
    }

    pub(crate) fn new_comment(owner: Weak<NodeInner>, data: &str) -> Self {
        Self::with_kind(owner, NodeKind::Comment(RefCell::new(data.to_string())))
    }

    /// Create an element that belongs to no document.
    ///
    /// Such an element can never be connected or focused; it is what markup
    /// strings are parsed into when no document is at hand.
    #[must_use]
    pub fn orphan_element(tag: &str) -> Self {
        Self::new_element(Weak::new(), tag)
    }

    /// Weak handle of the document new descendants should belong to
    pub(crate) fn owner_weak(&self) -> Weak<NodeInner> {
        if self.is_document() {
            Rc::downgrade(&self.0)
        } else {
            self.0.owner.clone()
        }
    }

    pub(crate) fn element_data(&self) -> Option<&ElementData> {
        match &self.0.kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }

    /// Node type discriminator
    #[must_use]
    pub fn node_type(&self) -> NodeType {
        match &self.0.kind {
            NodeKind::Document { .. } => NodeType::Document,
            NodeKind::Element(_) => NodeType::Element,
            NodeKind::Text(_) => NodeType::Text,
            NodeKind::Comment(_) => NodeType::Comment,
        }
    }

    /// `nodeName`: upper-case tag for elements, `#text`, `#comment`, `#document` otherwise
    #[must_use]
    pub fn node_name(&self) -> String {
        match &self.0.kind {
            NodeKind::Document { .. } => "#document".to_string(),
            NodeKind::Element(data) => data.local_name.to_ascii_uppercase(),
            NodeKind::Text(_) => "#text".to_string(),
            NodeKind::Comment(_) => "#comment".to_string(),
        }
    }

    /// Whether this node is an element
    #[must_use]
    pub fn is_element(&self) -> bool {
        self.node_type() == NodeType::Element
    }

    /// Whether this node is a document
    #[must_use]
    pub fn is_document(&self) -> bool {
        self.node_type() == NodeType::Document
    }

    /// Whether this node is a text node
    #[must_use]
    pub fn is_text(&self) -> bool {
        self.node_type() == NodeType::Text
    }

    /// Whether `self` and `other` are the same node
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    // ------------------------------------------------------------------
    // Tree
    // ------------------------------------------------------------------

    /// Parent node, if attached to one
    #[must_use]
    pub fn parent_node(&self) -> Option<Self> {
        self.0.parent.borrow().upgrade().map(Self)
    }

    /// All child nodes, in document order
    #[must_use]
    pub fn child_nodes(&self) -> NodeList {
        NodeList::from(self.0.children.borrow().clone())
    }

    /// Element children, in document order
    #[must_use]
    pub fn children(&self) -> NodeList {
        self.0
            .children
            .borrow()
            .iter()
            .filter(|child| child.is_element())
            .cloned()
            .collect()
    }

    /// First child node
    #[must_use]
    pub fn first_child(&self) -> Option<Self> {
        self.0.children.borrow().first().cloned()
    }

    /// Owning document
    #[must_use]
    pub fn owner_document(&self) -> Option<Document> {
        if self.is_document() {
            return Some(Document(self.clone()));
        }
        self.0.owner.upgrade().map(|inner| Document(Self(inner)))
    }

    /// Whether `other` is `self` or one of its descendants
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        let mut cursor = Some(other.clone());
        while let Some(current) = cursor {
            if current.ptr_eq(self) {
                return true;
            }
            cursor = current.parent_node();
        }
        false
    }

    /// Whether the node's root is a document
    #[must_use]
    pub fn is_connected(&self) -> bool {
        let mut cursor = Some(self.clone());
        while let Some(current) = cursor {
            if current.is_document() {
                return true;
            }
            cursor = current.parent_node();
        }
        false
    }

    pub(crate) fn push_child(&self, child: Self) {
        *child.0.parent.borrow_mut() = Rc::downgrade(&self.0);
        self.0.children.borrow_mut().push(child);
    }

    /// Append `child` as the last child, moving it from its current parent.
    pub fn append_child(&self, child: &Self) -> DomResult<Self> {
        if !self.is_element() && !self.is_document() {
            return Err(DomError::HierarchyRequest {
                message: format!("{} cannot have children", self.node_name()),
            });
        }
        if child.is_document() {
            return Err(DomError::HierarchyRequest {
                message: "a document cannot be inserted".to_string(),
            });
        }
        if child.contains(self) {
            return Err(DomError::HierarchyRequest {
                message: "the new child is an ancestor of the parent".to_string(),
            });
        }
        child.remove();
        self.push_child(child.clone());
        Ok(child.clone())
    }

    /// Remove `child` from this node's children.
    pub fn remove_child(&self, child: &Self) -> DomResult<Self> {
        let is_child = child
            .parent_node()
            .is_some_and(|parent| parent.ptr_eq(self));
        if !is_child {
            return Err(DomError::NotFound {
                message: format!("{} is not a child of {}", child.node_name(), self.node_name()),
            });
        }
        child.remove();
        Ok(child.clone())
    }

    /// Detach this node from its parent (no-op when already detached).
    pub fn remove(&self) {
        let Some(parent) = self.parent_node() else {
            return;
        };
        parent
            .0
            .children
            .borrow_mut()
            .retain(|sibling| !sibling.ptr_eq(self));
        *self.0.parent.borrow_mut() = Weak::new();
        if let Some(document) = self.owner_document() {
            document.forget_focus_within(self);
        }
    }

    fn clear_children(&self) {
        let old = std::mem::take(&mut *self.0.children.borrow_mut());
        for child in &old {
            *child.0.parent.borrow_mut() = Weak::new();
        }
    }

    /// Depth-first pre-order walk over descendants (excluding `self`)
    pub(crate) fn descendants(&self) -> Vec<Self> {
        let mut out = Vec::new();
        let mut stack: Vec<Self> = self.0.children.borrow().iter().rev().cloned().collect();
        while let Some(node) = stack.pop() {
            stack.extend(node.0.children.borrow().iter().rev().cloned());
            out.push(node);
        }
        out
    }

    // ------------------------------------------------------------------
    // Element attributes
    // ------------------------------------------------------------------

    /// Lower-case local name of an element
    #[must_use]
    pub fn local_name(&self) -> Option<String> {
        self.element_data().map(|data| data.local_name.clone())
    }

    /// Upper-case `tagName` of an element
    #[must_use]
    pub fn tag_name(&self) -> Option<String> {
        self.element_data()
            .map(|data| data.local_name.to_ascii_uppercase())
    }

    pub(crate) fn has_local_name(&self, names: &[&str]) -> bool {
        self.element_data()
            .is_some_and(|data| names.contains(&data.local_name.as_str()))
    }

    /// Read an attribute
    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<String> {
        let data = self.element_data()?;
        let name = name.to_ascii_lowercase();
        data.attrs
            .borrow()
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.clone())
    }

    /// Whether the element carries an attribute
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.get_attribute(name).is_some()
    }

    /// Set an attribute, keeping the position of an existing one
    pub fn set_attribute(&self, name: &str, value: &str) {
        let Some(data) = self.element_data() else {
            tracing::debug!(node = %self.node_name(), name, "set_attribute on a non-element ignored");
            return;
        };
        let name = name.to_ascii_lowercase();
        let mut attrs = data.attrs.borrow_mut();
        if let Some(slot) = attrs.iter_mut().find(|(key, _)| *key == name) {
            slot.1 = value.to_string();
        } else {
            attrs.push((name, value.to_string()));
        }
    }

    /// Remove an attribute
    pub fn remove_attribute(&self, name: &str) {
        if let Some(data) = self.element_data() {
            let name = name.to_ascii_lowercase();
            data.attrs.borrow_mut().retain(|(key, _)| *key != name);
        }
    }

    pub(crate) fn toggle_attribute(&self, name: &str, present: bool) {
        if present {
            if !self.has_attribute(name) {
                self.set_attribute(name, "");
            }
        } else {
            self.remove_attribute(name);
        }
    }

    /// Attributes in insertion order
    #[must_use]
    pub fn attributes(&self) -> Vec<(String, String)> {
        self.element_data()
            .map(|data| data.attrs.borrow().clone())
            .unwrap_or_default()
    }

    /// `id` property (empty string when absent)
    #[must_use]
    pub fn id(&self) -> String {
        self.get_attribute("id").unwrap_or_default()
    }

    /// Set the `id` attribute
    pub fn set_id(&self, id: &str) {
        self.set_attribute("id", id);
    }

    /// `className` property (empty string when absent)
    #[must_use]
    pub fn class_name(&self) -> String {
        self.get_attribute("class").unwrap_or_default()
    }

    /// Set the `class` attribute
    pub fn set_class_name(&self, class_name: &str) {
        self.set_attribute("class", class_name);
    }

    /// Whitespace-separated tokens of the `class` attribute
    #[must_use]
    pub fn class_list(&self) -> Vec<String> {
        self.class_name()
            .split_ascii_whitespace()
            .map(str::to_string)
            .collect()
    }

    // ------------------------------------------------------------------
    // Content
    // ------------------------------------------------------------------

    /// `textContent`; `None` for documents, as in browsers
    #[must_use]
    pub fn text_content(&self) -> Option<String> {
        match &self.0.kind {
            NodeKind::Document { .. } => None,
            NodeKind::Text(data) | NodeKind::Comment(data) => Some(data.borrow().clone()),
            NodeKind::Element(_) => {
                let mut out = String::new();
                for node in self.descendants() {
                    if let NodeKind::Text(data) = &node.0.kind {
                        out.push_str(&data.borrow());
                    }
                }
                Some(out)
            }
        }
    }

    /// Replace all children with a single text node (or none for `""`)
    pub fn set_text_content(&self, text: &str) {
        match &self.0.kind {
            NodeKind::Document { .. } => {}
            NodeKind::Text(data) | NodeKind::Comment(data) => *data.borrow_mut() = text.to_string(),
            NodeKind::Element(_) => {
                self.clear_children();
                if !text.is_empty() {
                    self.push_child(Self::new_text(self.owner_weak(), text));
                }
            }
        }
    }

    /// Rendered text approximation (`innerText`): text outside of
    /// non-rendered elements (`script`, `style`, `template`, `head`, ...)
    #[must_use]
    pub fn inner_text(&self) -> String {
        const NOT_RENDERED: &[&str] = &["head", "script", "style", "template", "noscript", "title"];
        fn walk(node: &Node, out: &mut String) {
            for child in node.0.children.borrow().iter() {
                match &child.0.kind {
                    NodeKind::Text(data) => out.push_str(&data.borrow()),
                    NodeKind::Element(data) if !NOT_RENDERED.contains(&data.local_name.as_str()) => {
                        walk(child, out);
                    }
                    _ => {}
                }
            }
        }
        let mut out = String::new();
        match self.owner_document().filter(|_| self.is_document()) {
            Some(document) => {
                if let Some(body) = document.body() {
                    walk(&body, &mut out);
                }
            }
            None => walk(self, &mut out),
        }
        out
    }

    /// Serialized children (`innerHTML`)
    #[must_use]
    pub fn inner_html(&self) -> String {
        serialize::inner_html(self)
    }

    /// Serialized node including itself (`outerHTML`)
    #[must_use]
    pub fn outer_html(&self) -> String {
        serialize::outer_html(self)
    }

    /// Replace children with the parsed markup (`innerHTML = html`)
    pub fn set_inner_html(&self, html: &str) -> DomResult<()> {
        if !self.is_element() {
            return Err(DomError::HierarchyRequest {
                message: format!("cannot set innerHTML on {}", self.node_name()),
            });
        }
        let nodes = parse::parse_fragment(html, &self.owner_weak())?;
        self.clear_children();
        for node in nodes {
            self.push_child(node);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Focus
    // ------------------------------------------------------------------

    /// Focus this element; only connected elements can take focus.
    pub fn focus(&self) {
        if !self.is_element() || !self.is_connected() {
            return;
        }
        if let Some(document) = self.owner_document() {
            document.set_focused(Some(self));
        }
    }

    /// Drop focus if this element has it.
    pub fn blur(&self) {
        if let Some(document) = self.owner_document() {
            if document.focused_element().is_some_and(|node| node.ptr_eq(self)) {
                document.set_focused(None);
            }
        }
    }

    pub(crate) fn focused_slot(&self) -> Option<&RefCell<Weak<NodeInner>>> {
        match &self.0.kind {
            NodeKind::Document { focused } => Some(focused),
            _ => None,
        }
    }

    pub(crate) fn text_data(&self) -> Option<String> {
        match &self.0.kind {
            NodeKind::Text(data) => Some(data.borrow().clone()),
            _ => None,
        }
    }

    pub(crate) fn comment_data(&self) -> Option<String> {
        match &self.0.kind {
            NodeKind::Comment(data) => Some(data.borrow().clone()),
            _ => None,
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Node {}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.kind {
            NodeKind::Element(data) => f
                .debug_struct("Element")
                .field("tag", &data.local_name)
                .field("attrs", &data.attrs.borrow())
                .finish(),
            NodeKind::Text(data) => f.debug_tuple("Text").field(&data.borrow()).finish(),
            NodeKind::Comment(data) => f.debug_tuple("Comment").field(&data.borrow()).finish(),
            NodeKind::Document { .. } => f.write_str("Document"),
        }
    }
}
