//! Pretty-printing of values for diagnostic messages.
//!
//! Output follows the host framework's conventions: strings in single
//! quotes, arrays as `[ a, b ]`, objects as `Object({ key: value })`,
//! elements as their quoted `outerHTML`, patterns as `/source/`.

use serde_json::Value;

use crate::bag::ExpectedBag;
use crate::compare::{number_form, Expected};
use crate::config::DomConfig;
use crate::dom::Node;
use crate::input::Input;

/// Formats values for failure messages; injected into every matcher.
///
/// Only [`pp`](PrettyPrinter::pp) is required: nodes, inputs, expectations
/// and bags are printed through it by the provided methods.
pub trait PrettyPrinter {
    /// Print a plain value
    fn pp(&self, value: &Value) -> String;

    /// Print a node: elements as their quoted markup, other nodes opaquely
    fn pp_node(&self, node: &Node) -> String {
        if node.is_element() {
            self.pp(&Value::String(node.outer_html()))
        } else {
            "HTMLNode".to_string()
        }
    }

    /// Print any matcher input
    fn pp_input(&self, input: &Input) -> String {
        match input {
            Input::Node(node) => self.pp_node(node),
            Input::Html(html) => self.pp(&Value::String(html.clone())),
            Input::Collection(items) => list(items.iter().map(|item| self.pp_input(item))),
            Input::NodeList(nodes) => list(nodes.iter().map(|node| self.pp_node(node))),
            Input::Wrapper(wrapper) => {
                let name = if wrapper.name().is_empty() {
                    "Object"
                } else {
                    wrapper.name()
                };
                object(
                    name,
                    wrapper
                        .fields()
                        .map(|(key, value)| (key.to_string(), self.pp_input(value))),
                )
            }
            Input::Value(value) => self.pp(value),
        }
    }

    /// Print an expectation
    fn pp_expected(&self, expected: &Expected) -> String {
        match expected {
            Expected::Value(value) => self.pp(value),
            Expected::Pattern(regex) => format!("/{}/", regex.as_str()),
            Expected::Matcher(matcher) => matcher.description(),
        }
    }

    /// Print a bag of named expectations; names without a value print as `undefined`
    fn pp_bag(&self, bag: &ExpectedBag) -> String {
        object(
            "Object",
            bag.iter().map(|(name, expected)| {
                let printed = expected.map_or_else(|| "undefined".to_string(), |e| self.pp_expected(e));
                (name.to_string(), printed)
            }),
        )
    }
}

impl<F> PrettyPrinter for F
where
    F: Fn(&Value) -> String,
{
    fn pp(&self, value: &Value) -> String {
        self(value)
    }
}

fn list(items: impl Iterator<Item = String>) -> String {
    format!("[ {} ]", items.collect::<Vec<_>>().join(", "))
}

fn object(name: &str, fields: impl Iterator<Item = (String, String)>) -> String {
    let body = fields
        .map(|(key, value)| format!("{key}: {value}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{name}({{ {body} }})")
}

/// Printer with depth, array-length and size limits
#[derive(Debug, Clone)]
pub struct DefaultPrinter {
    max_depth: usize,
    max_array_length: usize,
    max_chars: usize,
}

impl DefaultPrinter {
    /// Printer using the limits of `config`
    #[must_use]
    pub fn new(config: &DomConfig) -> Self {
        Self {
            max_depth: config.max_pretty_print_depth,
            max_array_length: config.max_pretty_print_array_length,
            max_chars: config.max_pretty_print_chars,
        }
    }

    fn format(&self, value: &Value, depth: usize) -> String {
        match value {
            Value::Null => "null".to_string(),
            Value::Bool(flag) => flag.to_string(),
            Value::Number(number) => number_form(number),
            Value::String(text) => format!("'{text}'"),
            Value::Array(_) if depth >= self.max_depth => "Array".to_string(),
            Value::Object(_) if depth >= self.max_depth => "Object".to_string(),
            Value::Array(items) => {
                let mut printed: Vec<String> = items
                    .iter()
                    .take(self.max_array_length)
                    .map(|item| self.format(item, depth + 1))
                    .collect();
                if items.len() > self.max_array_length {
                    printed.push("...".to_string());
                }
                list(printed.into_iter())
            }
            Value::Object(map) => object(
                "Object",
                map.iter()
                    .map(|(key, item)| (key.clone(), self.format(item, depth + 1))),
            ),
        }
    }
}

impl Default for DefaultPrinter {
    fn default() -> Self {
        Self::new(&DomConfig::default())
    }
}

impl PrettyPrinter for DefaultPrinter {
    fn pp(&self, value: &Value) -> String {
        let printed = self.format(value, 0);
        if printed.chars().count() <= self.max_chars {
            return printed;
        }
        let mut truncated: String = printed.chars().take(self.max_chars).collect();
        truncated.push_str("...");
        truncated
    }
}
