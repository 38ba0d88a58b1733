//! Node resolution: turning any accepted input into exactly one element.
//!
//! Resolution order, first match wins:
//!
//! 1. an element is returned as is;
//! 2. markup is parsed into the child nodes of a detached container;
//! 3. collections (arrays, node lists, array-like objects) must hold
//!    exactly one entry, which is unwrapped;
//! 4. an element entry is returned;
//! 5. the [`WRAPPER_PROBES`] are tried in order;
//! 6. anything else is a usage error.

use serde_json::Value;

use crate::dom::Node;
use crate::input::Input;
use crate::predicates::array_like_length;
use crate::pretty::PrettyPrinter;
use crate::result::{DomError, DomResult};

/// A known wrapper convention: a one-property projection
#[derive(Debug, Clone, Copy)]
pub struct WrapperProbe {
    /// Property holding the wrapped element
    pub name: &'static str,
    /// Projection; `None` when the input does not have this shape
    pub project: fn(&Input) -> Option<Input>,
}

/// Wrapper conventions, tried in order
pub const WRAPPER_PROBES: [WrapperProbe; 3] = [
    WrapperProbe {
        name: "nativeElement",
        project: native_element,
    },
    WrapperProbe {
        name: "element",
        project: element,
    },
    WrapperProbe {
        name: "baseElement",
        project: base_element,
    },
];

fn native_element(input: &Input) -> Option<Input> {
    project_field(input, "nativeElement")
}

fn element(input: &Input) -> Option<Input> {
    project_field(input, "element")
}

fn base_element(input: &Input) -> Option<Input> {
    project_field(input, "baseElement")
}

fn project_field(input: &Input, name: &str) -> Option<Input> {
    match input {
        Input::Wrapper(wrapper) => wrapper.get(name).cloned(),
        Input::Value(Value::Object(map)) => map.get(name).cloned().map(Input::Value),
        _ => None,
    }
}

/// Resolve `value` to exactly one element.
///
/// # Errors
///
/// - [`DomError::EmptyNodeList`] for an empty collection
/// - [`DomError::NodeListTooLarge`] for a collection of several entries
/// - [`DomError::NotAnElement`] when the single entry of a collection is
///   not an element (nor a wrapper of one)
/// - [`DomError::NotADomNode`] for any other unresolvable value
pub fn to_dom_element(value: &Input, pp: &dyn PrettyPrinter) -> DomResult<Node> {
    if let Input::Node(node) = value {
        if node.is_element() {
            return Ok(node.clone());
        }
    }

    let parsed;
    let candidate = match markup(value) {
        Some(html) => {
            parsed = parse_markup(html)?;
            &parsed
        }
        None => value,
    };

    if let Some((size, first)) = singleton_view(candidate) {
        return match (size, first) {
            (0, _) => Err(DomError::EmptyNodeList),
            (1, Some(entry)) => {
                tracing::debug!(kind = candidate.kind(), "unwrapping singleton collection");
                resolve_entry(&entry, pp).ok_or_else(|| DomError::NotAnElement {
                    dump: pp.pp_input(candidate),
                })
            }
            (1, None) => Err(DomError::NotAnElement {
                dump: pp.pp_input(candidate),
            }),
            (size, _) => Err(DomError::NodeListTooLarge {
                size,
                dump: pp.pp_input(candidate),
            }),
        };
    }

    resolve_entry(candidate, pp).ok_or_else(|| DomError::NotADomNode {
        dump: pp.pp_input(value),
    })
}

fn markup(value: &Input) -> Option<&str> {
    match value {
        Input::Html(html) => Some(html),
        Input::Value(Value::String(html)) => Some(html),
        _ => None,
    }
}

/// Child nodes of a throwaway container holding the parsed markup
fn parse_markup(html: &str) -> DomResult<Input> {
    let container = Node::orphan_element("div");
    container.set_inner_html(html)?;
    Ok(Input::NodeList(container.child_nodes()))
}

/// Size and first entry of a collection-shaped input
fn singleton_view(candidate: &Input) -> Option<(usize, Option<Input>)> {
    match candidate {
        Input::Collection(items) => Some((items.len(), items.first().cloned())),
        Input::NodeList(nodes) => Some((nodes.len(), nodes.get(0).cloned().map(Input::Node))),
        Input::Value(Value::Array(items)) => {
            Some((items.len(), items.first().cloned().map(Input::Value)))
        }
        Input::Value(Value::Object(map)) => {
            let size = array_like_length(candidate)?;
            Some((size, map.get("0").cloned().map(Input::Value)))
        }
        _ => None,
    }
}

fn resolve_entry(entry: &Input, pp: &dyn PrettyPrinter) -> Option<Node> {
    if let Input::Node(node) = entry {
        return node.is_element().then(|| node.clone());
    }
    WRAPPER_PROBES.iter().find_map(|probe| {
        let projection = (probe.project)(entry)?;
        let node = to_dom_element(&projection, pp).ok()?;
        tracing::debug!(probe = probe.name, "resolved element through wrapper");
        Some(node)
    })
}
