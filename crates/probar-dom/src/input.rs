//! Values accepted as the subject of a DOM assertion.

use serde_json::Value;

use crate::dom::{Document, Node, NodeList};

/// Anything a test may hand to a DOM matcher as "actual".
///
/// The node resolver turns every accepted shape into exactly one element;
/// see [`to_dom_element`](crate::to_dom_element).
#[derive(Debug, Clone)]
pub enum Input {
    /// A DOM node handle (element or not)
    Node(Node),
    /// A markup string, parsed as a fragment on resolution
    Html(String),
    /// An array of inputs
    Collection(Vec<Input>),
    /// A node collection such as `child_nodes()` or `children()`
    NodeList(NodeList),
    /// A helper object exposing the real element under a named property
    Wrapper(Wrapper),
    /// Any other value (null, number, boolean, plain object, ...)
    Value(Value),
}

impl Input {
    /// Short description of the input shape, used in diagnostics
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Node(_) => "node",
            Self::Html(_) => "html",
            Self::Collection(_) => "collection",
            Self::NodeList(_) => "node list",
            Self::Wrapper(_) => "wrapper",
            Self::Value(_) => "value",
        }
    }
}

impl From<Node> for Input {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}

impl From<&Node> for Input {
    fn from(node: &Node) -> Self {
        Self::Node(node.clone())
    }
}

impl From<&Document> for Input {
    fn from(document: &Document) -> Self {
        Self::Node(document.as_node().clone())
    }
}

impl From<NodeList> for Input {
    fn from(nodes: NodeList) -> Self {
        Self::NodeList(nodes)
    }
}

impl From<&str> for Input {
    fn from(html: &str) -> Self {
        Self::Html(html.to_string())
    }
}

impl From<String> for Input {
    fn from(html: String) -> Self {
        Self::Html(html)
    }
}

impl From<Vec<Node>> for Input {
    fn from(nodes: Vec<Node>) -> Self {
        Self::Collection(nodes.into_iter().map(Self::Node).collect())
    }
}

impl From<Vec<Self>> for Input {
    fn from(inputs: Vec<Self>) -> Self {
        Self::Collection(inputs)
    }
}

impl From<Wrapper> for Input {
    fn from(wrapper: Wrapper) -> Self {
        Self::Wrapper(wrapper)
    }
}

impl From<Value> for Input {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

/// Object produced by a component-testing helper that holds the rendered
/// element under a conventional property (`nativeElement`, `element`,
/// `baseElement`).
///
/// ```
/// use probar_dom::{Node, Wrapper};
///
/// let fixture = Wrapper::new("ComponentFixture")
///     .field("nativeElement", Node::orphan_element("app-root"));
/// assert!(fixture.get("nativeElement").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Wrapper {
    name: String,
    fields: Vec<(String, Input)>,
}

impl Wrapper {
    /// Create an empty wrapper; `name` is only used when printing it
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add (or replace) a property
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Input>) -> Self {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.fields.iter_mut().find(|(key, _)| *key == name) {
            slot.1 = value;
        } else {
            self.fields.push((name, value));
        }
        self
    }

    /// Read a property
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Input> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Printable type name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Properties in insertion order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Input)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }
}
