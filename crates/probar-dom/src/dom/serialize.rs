//! HTML fragment serialization (`innerHTML` / `outerHTML`).
//!
//! Nodes are walked through html5ever's [`Serialize`] trait, so void
//! elements, raw-text parents and escaping follow the HTML serializer.

use std::io;

use html5ever::serialize::{serialize, Serialize, SerializeOpts, Serializer, TraversalScope};
use html5ever::{ns, LocalName, QualName};

use super::node::{Node, NodeKind};

struct SerializableNode<'a>(&'a Node);

impl Serialize for SerializableNode<'_> {
    fn serialize<S>(&self, serializer: &mut S, traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        let node = self.0;
        let include_node = matches!(traversal_scope, TraversalScope::IncludeNode);
        match &node.0.kind {
            NodeKind::Element(data) if include_node => {
                let name = element_name(&data.local_name);
                let attrs: Vec<(QualName, String)> = data
                    .attrs
                    .borrow()
                    .iter()
                    .map(|(attr, value)| {
                        (QualName::new(None, ns!(), LocalName::from(attr.as_str())), value.clone())
                    })
                    .collect();
                serializer.start_elem(
                    name.clone(),
                    attrs.iter().map(|(attr, value)| (attr, value.as_str())),
                )?;
                serialize_children(node, serializer)?;
                serializer.end_elem(name)
            }
            NodeKind::Element(_) | NodeKind::Document { .. } => {
                serialize_children(node, serializer)
            }
            NodeKind::Text(_) | NodeKind::Comment(_) if !include_node => Ok(()),
            NodeKind::Text(_) => serializer.write_text(&node.text_data().unwrap_or_default()),
            NodeKind::Comment(_) => {
                serializer.write_comment(&node.comment_data().unwrap_or_default())
            }
        }
    }
}

fn serialize_children<S: Serializer>(node: &Node, serializer: &mut S) -> io::Result<()> {
    for child in node.child_nodes().iter() {
        SerializableNode(child).serialize(serializer, TraversalScope::IncludeNode)?;
    }
    Ok(())
}

fn element_name(local_name: &str) -> QualName {
    QualName::new(None, ns!(html), LocalName::from(local_name))
}

fn to_html(node: &Node, traversal_scope: TraversalScope) -> String {
    let mut bytes = Vec::new();
    let opts = SerializeOpts {
        traversal_scope,
        ..Default::default()
    };
    if let Err(err) = serialize(&mut bytes, &SerializableNode(node), opts) {
        tracing::warn!(error = %err, "html serialization failed");
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Children only. The node's own name is handed to the serializer so the
/// contents of `<script>` and friends stay verbatim.
pub(crate) fn inner_html(node: &Node) -> String {
    let parent = node.local_name().map(|name| element_name(&name));
    to_html(node, TraversalScope::ChildrenOnly(parent))
}

pub(crate) fn outer_html(node: &Node) -> String {
    to_html(node, TraversalScope::IncludeNode)
}
