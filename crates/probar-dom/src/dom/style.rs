//! Inline style declarations and style resolution.
//!
//! Style property names are accepted in either dash-case (`font-size`) or
//! camelCase (`fontSize`). Declarations are stored dash-cased, resolved
//! styles are keyed camelCase, matching how scripts see `element.style` and
//! `getComputedStyle(element)`.

use std::collections::BTreeMap;

use super::Node;
use crate::result::{DomError, DomResult};

/// Properties whose value flows from parent to child when not set
const INHERITED: &[&str] = &[
    "color",
    "cursor",
    "direction",
    "font-family",
    "font-size",
    "font-style",
    "font-variant",
    "font-weight",
    "letter-spacing",
    "line-height",
    "text-align",
    "text-indent",
    "text-transform",
    "visibility",
    "white-space",
    "word-spacing",
];

const BLOCK: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "dd", "details", "dialog", "div", "dl",
    "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5",
    "h6", "header", "hgroup", "hr", "html", "legend", "main", "menu", "nav", "ol", "p", "pre",
    "section", "summary", "ul",
];

const NOT_RENDERED: &[&str] = &[
    "base", "datalist", "head", "link", "meta", "noscript", "param", "script", "style", "template",
    "title",
];

const INLINE_BLOCK: &[&str] = &["button", "input", "meter", "progress", "select", "textarea"];

/// Convert a dash-case style name to camelCase (`font-size` → `fontSize`).
///
/// Custom properties (`--name`) are returned unchanged.
#[must_use]
pub fn dash_to_camel(name: &str) -> String {
    if name.starts_with("--") {
        return name.to_string();
    }
    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for c in name.chars() {
        if c == '-' {
            upper = true;
        } else if upper {
            out.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Convert a camelCase style name to dash-case (`fontSize` → `font-size`).
#[must_use]
pub fn camel_to_dash(name: &str) -> String {
    if name.starts_with("--") {
        return name.to_string();
    }
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Canonical (dash-case, lower-case) declaration name
fn canonical(name: &str) -> String {
    let name = name.trim();
    if name.starts_with("--") {
        name.to_string()
    } else {
        camel_to_dash(name).to_ascii_lowercase()
    }
}

/// Parsed `style` attribute (`CSSStyleDeclaration`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDeclaration {
    entries: Vec<(String, String)>,
}

impl StyleDeclaration {
    /// Parse a declaration block such as `display: none; font-size: 10px`.
    ///
    /// Semicolons inside quotes or parentheses do not split declarations.
    /// Entries without a colon or with an empty value are dropped; a later
    /// declaration of the same property replaces an earlier one.
    #[must_use]
    pub fn parse(css: &str) -> Self {
        let mut style = Self::default();
        for declaration in split_declarations(css) {
            let Some((name, value)) = declaration.split_once(':') else {
                continue;
            };
            let value = value.trim();
            let value = value
                .strip_suffix("!important")
                .map_or(value, str::trim_end);
            style.set(name, value);
        }
        style
    }

    /// Value of a property (`""` when not declared)
    #[must_use]
    pub fn get(&self, name: &str) -> &str {
        let name = canonical(name);
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map_or("", |(_, value)| value.as_str())
    }

    /// Declare a property; an empty value removes it.
    pub fn set(&mut self, name: &str, value: &str) {
        let name = canonical(name);
        if name.is_empty() {
            return;
        }
        let value = value.trim();
        if value.is_empty() {
            self.entries.retain(|(key, _)| *key != name);
            return;
        }
        if let Some(slot) = self.entries.iter_mut().find(|(key, _)| *key == name) {
            slot.1 = value.to_string();
        } else {
            self.entries.push((name, value.to_string()));
        }
    }

    /// Serialized declarations (`cssText`)
    #[must_use]
    pub fn to_css_text(&self) -> String {
        self.entries
            .iter()
            .map(|(name, value)| format!("{name}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Declarations as (dash-case name, value) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of declarations
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is declared
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn split_declarations(css: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (index, c) in css.char_indices() {
        match (quote, c) {
            (Some(open), c) if c == open => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                parts.push(&css[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    parts.push(&css[start..]);
    parts
}

impl Node {
    /// Inline style (`element.style`), parsed from the `style` attribute
    #[must_use]
    pub fn style(&self) -> StyleDeclaration {
        self.get_attribute("style")
            .map(|css| StyleDeclaration::parse(&css))
            .unwrap_or_default()
    }

    /// Set one inline style property (`element.style[name] = value`);
    /// an empty value removes the declaration.
    pub fn set_style_property(&self, name: &str, value: &str) {
        if !self.is_element() {
            return;
        }
        let mut style = self.style();
        style.set(name, value);
        self.set_attribute("style", &style.to_css_text());
    }
}

/// Resolved style of an element, keyed by camelCase property name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComputedStyle {
    values: BTreeMap<String, String>,
}

impl ComputedStyle {
    /// Value of a property in either naming convention (`""` when unset)
    #[must_use]
    pub fn get(&self, name: &str) -> &str {
        self.values
            .get(&dash_to_camel(&canonical(name)))
            .map_or("", String::as_str)
    }

    /// All resolved properties
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    fn insert(&mut self, dashed: &str, value: &str) {
        self.values.insert(dash_to_camel(dashed), value.to_string());
    }
}

/// A way of obtaining the style an element is rendered with.
///
/// Providers are tried in [`StyleSource::CHAIN`] order; one that cannot
/// produce a style for an element fails and the next one is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleSource {
    /// Fully computed style: user-agent defaults, inherited values and
    /// inline declarations. Only available for connected elements.
    Computed,
    /// Cascaded ("current") style: inherited values and inline declarations,
    /// without user-agent defaults. Works on detached elements.
    Cascaded,
    /// Inline declarations only
    Inline,
}

impl StyleSource {
    /// Provider priority
    pub const CHAIN: [Self; 3] = [Self::Computed, Self::Cascaded, Self::Inline];

    /// Provider name used in diagnostics
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Computed => "computed",
            Self::Cascaded => "cascaded",
            Self::Inline => "inline",
        }
    }

    /// Resolve the style of `node` with this provider.
    pub fn resolve(self, node: &Node) -> DomResult<ComputedStyle> {
        let Some(tag) = node.local_name() else {
            return Err(DomError::StyleUnavailable {
                reason: format!("{} is not an element", node.node_name()),
            });
        };
        match self {
            Self::Inline => {
                let mut resolved = ComputedStyle::default();
                for (name, value) in node.style().iter() {
                    resolved.insert(name, value);
                }
                Ok(resolved)
            }
            Self::Cascaded => Ok(cascade(node, false)),
            Self::Computed => {
                if !node.is_connected() {
                    return Err(DomError::StyleUnavailable {
                        reason: format!("<{tag}> is not connected to a document"),
                    });
                }
                Ok(cascade(node, true))
            }
        }
    }
}

fn cascade(node: &Node, user_agent: bool) -> ComputedStyle {
    let mut resolved = ComputedStyle::default();

    let mut ancestors = Vec::new();
    let mut cursor = node.parent_node();
    while let Some(parent) = cursor {
        if parent.is_element() {
            ancestors.push(parent.clone());
        }
        cursor = parent.parent_node();
    }
    for ancestor in ancestors.iter().rev() {
        for (name, value) in ancestor.style().iter() {
            if INHERITED.contains(&name) && value != "inherit" {
                resolved.insert(name, value);
            }
        }
    }

    if user_agent {
        let tag = node.local_name().unwrap_or_default();
        resolved.insert("display", default_display(&tag));
    }
    if node.has_attribute("hidden") {
        resolved.insert("display", "none");
    }

    for (name, value) in node.style().iter() {
        if value == "inherit" {
            continue;
        }
        resolved.insert(name, value);
    }
    resolved
}

fn default_display(tag: &str) -> &'static str {
    match tag {
        "li" => "list-item",
        "table" => "table",
        "tr" => "table-row",
        "td" | "th" => "table-cell",
        "thead" => "table-header-group",
        "tbody" => "table-row-group",
        "tfoot" => "table-footer-group",
        "caption" => "table-caption",
        "colgroup" => "table-column-group",
        "col" => "table-column",
        _ if NOT_RENDERED.contains(&tag) => "none",
        _ if BLOCK.contains(&tag) => "block",
        _ if INLINE_BLOCK.contains(&tag) => "inline-block",
        _ => "inline",
    }
}

/// Resolve the style of `node` through the provider chain.
///
/// Each provider's failure is logged and the next provider is tried; the
/// inline provider never fails for an element, and a non-element yields an
/// empty style.
#[must_use]
pub fn resolve_style(node: &Node) -> ComputedStyle {
    for source in StyleSource::CHAIN {
        match source.resolve(node) {
            Ok(style) => return style,
            Err(err) => {
                tracing::debug!(provider = source.name(), error = %err, "style provider fell through");
            }
        }
    }
    ComputedStyle::default()
}

#[cfg(test)]
mod tests {
    use super::super::Document;
    use super::*;

    mod naming_tests {
        use super::*;

        #[test]
        fn test_dash_to_camel() {
            assert_eq!(dash_to_camel("font-size"), "fontSize");
            assert_eq!(dash_to_camel("display"), "display");
            assert_eq!(dash_to_camel("border-top-left-radius"), "borderTopLeftRadius");
            assert_eq!(dash_to_camel("--main-color"), "--main-color");
        }

        #[test]
        fn test_camel_to_dash() {
            assert_eq!(camel_to_dash("fontSize"), "font-size");
            assert_eq!(camel_to_dash("display"), "display");
        }
    }

    mod declaration_tests {
        use super::*;

        #[test]
        fn test_parse_and_get_either_case() {
            let style = StyleDeclaration::parse("display: none; Font-Size:10px");
            assert_eq!(style.get("display"), "none");
            assert_eq!(style.get("font-size"), "10px");
            assert_eq!(style.get("fontSize"), "10px");
            assert_eq!(style.get("color"), "");
        }

        #[test]
        fn test_parse_respects_quotes_and_parens() {
            let style = StyleDeclaration::parse(
                r#"background: url("a;b.png"); content: ';'; color: red"#,
            );
            assert_eq!(style.len(), 3);
            assert_eq!(style.get("background"), r#"url("a;b.png")"#);
            assert_eq!(style.get("content"), "';'");
        }

        #[test]
        fn test_parse_drops_important_and_empty() {
            let style = StyleDeclaration::parse("color: red !important; margin: ; ;junk");
            assert_eq!(style.get("color"), "red");
            assert_eq!(style.len(), 1);
        }

        #[test]
        fn test_set_and_remove() {
            let mut style = StyleDeclaration::default();
            style.set("fontSize", "10px");
            style.set("display", "block");
            assert_eq!(style.to_css_text(), "font-size: 10px; display: block;");
            style.set("font-size", "");
            assert_eq!(style.to_css_text(), "display: block;");
        }

        #[test]
        fn test_node_style_property_updates_attribute() {
            let div = Node::orphan_element("div");
            div.set_style_property("display", "none");
            assert_eq!(div.get_attribute("style"), Some("display: none;".to_string()));
            assert_eq!(div.style().get("display"), "none");
        }
    }

    mod resolution_tests {
        use super::*;

        #[test]
        fn test_computed_requires_connection() {
            let doc = Document::new();
            let div = doc.create_element("div");
            assert!(StyleSource::Computed.resolve(&div).is_err());
            doc.body().unwrap().append_child(&div).unwrap();
            let style = StyleSource::Computed.resolve(&div).unwrap();
            assert_eq!(style.get("display"), "block");
        }

        #[test]
        fn test_cascaded_inherits_from_ancestors() {
            let outer = Node::orphan_element("div");
            outer.set_attribute("style", "color: red; display: flex");
            outer.set_inner_html("<span></span>").unwrap();
            let span = outer.first_child().unwrap();
            let style = StyleSource::Cascaded.resolve(&span).unwrap();
            assert_eq!(style.get("color"), "red");
            assert_eq!(style.get("display"), "");
        }

        #[test]
        fn test_hidden_attribute_hides() {
            let doc = Document::new();
            let p = doc.create_element("p");
            p.set_attribute("hidden", "");
            doc.body().unwrap().append_child(&p).unwrap();
            assert_eq!(resolve_style(&p).get("display"), "none");
            p.set_style_property("display", "inline");
            assert_eq!(resolve_style(&p).get("display"), "inline");
        }

        #[test]
        fn test_chain_falls_through_for_detached() {
            let div = Node::orphan_element("div");
            div.set_style_property("display", "none");
            assert_eq!(resolve_style(&div).get("display"), "none");
            assert_eq!(resolve_style(&div).get("fontSize"), "");
        }

        #[test]
        fn test_non_element_has_empty_style() {
            let doc = Document::new();
            let text = doc.create_text_node("x");
            assert!(StyleSource::Inline.resolve(&text).is_err());
            assert_eq!(resolve_style(&text), ComputedStyle::default());
        }
    }
}
