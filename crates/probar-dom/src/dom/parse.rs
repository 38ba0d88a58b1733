//! HTML fragment parsing backed by html5ever.
//!
//! Markup is parsed as the content of a `<body>` so that leading whitespace,
//! comments and metadata elements stay in place, which matches what
//! assigning `innerHTML` on a detached `<div>` produces.

use std::rc::Weak;

use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use super::node::{Node, NodeInner};
use crate::result::DomResult;

/// Parse `html` into detached nodes owned by `owner`.
pub(crate) fn parse_fragment(html: &str, owner: &Weak<NodeInner>) -> DomResult<Vec<Node>> {
    let source = format!("<body>{html}");
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(source.as_str());

    let Some(body) = find_body(&dom.document) else {
        return Ok(Vec::new());
    };

    let nodes = body
        .children
        .borrow()
        .iter()
        .filter_map(|child| convert(child, owner))
        .collect();
    Ok(nodes)
}

fn find_body(handle: &Handle) -> Option<Handle> {
    if let NodeData::Element { name, .. } = &handle.data {
        if name.local.as_ref() == "body" {
            return Some(handle.clone());
        }
    }
    handle
        .children
        .borrow()
        .iter()
        .find_map(find_body)
}

fn convert(handle: &Handle, owner: &Weak<NodeInner>) -> Option<Node> {
    match &handle.data {
        NodeData::Element { name, attrs, .. } => {
            let element = Node::new_element(owner.clone(), name.local.as_ref());
            for attr in attrs.borrow().iter() {
                let local: &str = attr.name.local.as_ref();
                let qualified = match &attr.name.prefix {
                    Some(prefix) => {
                        let prefix: &str = prefix.as_ref();
                        format!("{prefix}:{local}")
                    }
                    None => local.to_string(),
                };
                element.set_attribute(&qualified, &attr.value);
            }
            for child in handle.children.borrow().iter() {
                if let Some(node) = convert(child, owner) {
                    element.push_child(node);
                }
            }
            Some(element)
        }
        NodeData::Text { contents } => Some(Node::new_text(owner.clone(), &contents.borrow())),
        NodeData::Comment { contents } => Some(Node::new_comment(owner.clone(), contents)),
        _ => None,
    }
}
