//! Attribute, property and style extraction against an [`ExpectedBag`].
//!
//! Every requested key is checked, so [`BagCheck::mismatched_keys`] lists
//! all failing names, not only the first one.

use serde_json::Value;

use crate::bag::ExpectedBag;
use crate::compare::{match_or_equals, Equality, Expected};
use crate::dom::style::{dash_to_camel, resolve_style};
use crate::dom::Node;

/// Outcome of checking a bag against a node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BagCheck {
    /// Whether every key passed
    pub pass: bool,
    /// Keys that did not pass, in bag order
    pub mismatched_keys: Vec<String>,
}

impl BagCheck {
    fn collect<'a>(
        facet: &'static str,
        bag: &'a ExpectedBag,
        mut check: impl FnMut(&'a str, Option<&'a Expected>) -> bool,
    ) -> Self {
        let mismatched_keys: Vec<String> = bag
            .iter()
            .filter(|&(name, expected)| !check(name, expected))
            .map(|(name, _)| name.to_string())
            .collect();
        if !mismatched_keys.is_empty() {
            tracing::debug!(facet, mismatched = ?mismatched_keys, "bag check failed");
        }
        Self {
            pass: mismatched_keys.is_empty(),
            mismatched_keys,
        }
    }
}

/// Attributes: each name must be present; its value is compared only when
/// one is given.
pub fn check_attrs(node: &Node, bag: &ExpectedBag, equals: &dyn Equality) -> BagCheck {
    BagCheck::collect("attribute", bag, |name, expected| {
        let Some(actual) = node.get_attribute(name) else {
            return false;
        };
        expected.map_or(true, |expected| {
            match_or_equals(&Value::String(actual), expected, equals)
        })
    })
}

/// Properties read off the node; a name without a value only requires the
/// property to exist. Missing properties read as null.
pub fn check_props(node: &Node, bag: &ExpectedBag, equals: &dyn Equality) -> BagCheck {
    BagCheck::collect("property", bag, |name, expected| match expected {
        Some(expected) => {
            let actual = node.get_property(name).unwrap_or(Value::Null);
            match_or_equals(&actual, expected, equals)
        }
        None => node.has_property(name),
    })
}

/// Inline styles; names are accepted dash-cased or camelCased. A name
/// without a value requires a non-empty declaration.
pub fn check_styles(node: &Node, bag: &ExpectedBag, equals: &dyn Equality) -> BagCheck {
    let style = node.style();
    BagCheck::collect("style", bag, |name, expected| {
        compare_style(style.get(&dash_to_camel(name)), expected, equals)
    })
}

/// Resolved styles, obtained through the style provider chain.
pub fn check_computed_styles(node: &Node, bag: &ExpectedBag, equals: &dyn Equality) -> BagCheck {
    let style = resolve_style(node);
    BagCheck::collect("computed style", bag, |name, expected| {
        compare_style(style.get(&dash_to_camel(name)), expected, equals)
    })
}

fn compare_style(actual: &str, expected: Option<&Expected>, equals: &dyn Equality) -> bool {
    match expected {
        Some(expected) => match_or_equals(&Value::String(actual.to_string()), expected, equals),
        None => !actual.is_empty(),
    }
}
