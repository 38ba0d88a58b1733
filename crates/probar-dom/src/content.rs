//! Text and markup normalization.
//!
//! Both sides of a content comparison pass through the same pipeline, so
//! surrounding whitespace (text) and serializer differences such as quote
//! style or tag case (markup) never cause a false failure.

use serde_json::Value;

use crate::compare::{string_form, Expected};
use crate::dom::Node;
use crate::result::DomResult;

/// Text of an element: `textContent`, falling back to `innerText` where
/// the former is absent.
#[must_use]
pub fn read_text(node: &Node) -> String {
    node.text_content().unwrap_or_else(|| node.inner_text())
}

/// Canonical text: surrounding whitespace removed
#[must_use]
pub fn normalize_text(text: &str) -> String {
    text.trim().to_string()
}

/// Expected text: primitives are stringified, arrays are lines joined with
/// `\n`, then trimmed. Patterns, matchers, null and objects are left alone.
#[must_use]
pub fn expected_text(expected: &Expected) -> Expected {
    match expected {
        Expected::Value(Value::Array(lines)) => {
            let joined = lines
                .iter()
                .map(|line| string_form(line).unwrap_or_default())
                .collect::<Vec<_>>()
                .join("\n");
            Expected::from(normalize_text(&joined))
        }
        Expected::Value(value @ (Value::String(_) | Value::Number(_) | Value::Bool(_))) => {
            Expected::from(normalize_text(&string_form(value).unwrap_or_default()))
        }
        other => other.clone(),
    }
}

/// Canonical markup: `html` written into a detached container and read back
pub fn normalize_html(html: &str) -> DomResult<String> {
    let container = Node::orphan_element("div");
    container.set_inner_html(html)?;
    Ok(container.inner_html())
}

/// Expected markup: primitives are normalized, patterns and matchers are
/// compared as given.
pub fn expected_html(expected: &Expected) -> DomResult<Expected> {
    match expected {
        Expected::Value(value @ (Value::String(_) | Value::Number(_) | Value::Bool(_))) => {
            let html = string_form(value).unwrap_or_default();
            Ok(Expected::from(normalize_html(&html)?))
        }
        other => Ok(other.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    mod text_tests {
        use super::*;

        #[test]
        fn test_normalize_text_trims() {
            assert_eq!(normalize_text("  foo  "), "foo");
            assert_eq!(normalize_text("\n\tfoo bar \n"), "foo bar");
        }

        #[test]
        fn test_expected_text_shapes() {
            let lines = expected_text(&Expected::from(json!(["foo", "bar"])));
            assert_eq!(lines.as_value(), Some(&json!("foo\nbar")));
            let number = expected_text(&Expected::from(10));
            assert_eq!(number.as_value(), Some(&json!("10")));
            let padded = expected_text(&Expected::from(" foo "));
            assert_eq!(padded.as_value(), Some(&json!("foo")));
        }

        #[test]
        fn test_expected_text_keeps_patterns() {
            let pattern = expected_text(&Expected::pattern("^ foo").unwrap());
            assert!(matches!(pattern, Expected::Pattern(regex) if regex.as_str() == "^ foo"));
        }

        #[test]
        fn test_read_text() {
            let div = Node::orphan_element("div");
            div.set_inner_html("<b>foo</b> bar").unwrap();
            assert_eq!(read_text(&div), "foo bar");
        }
    }

    mod html_tests {
        use super::*;

        #[test]
        fn test_normalize_html_quotes_and_case() {
            assert_eq!(
                normalize_html("<SPAN class='foo'>bar</SPAN>").unwrap(),
                r#"<span class="foo">bar</span>"#
            );
        }

        #[test]
        fn test_normalize_html_closes_tags() {
            assert_eq!(normalize_html("<p>foo").unwrap(), "<p>foo</p>");
        }

        #[test]
        fn test_expected_html_leaves_matchers() {
            let matcher = expected_html(&Expected::anything()).unwrap();
            assert!(matches!(matcher, Expected::Matcher(_)));
            let markup = expected_html(&Expected::from("<I>x</I>")).unwrap();
            assert_eq!(markup.as_value(), Some(&json!("<i>x</i>")));
        }
    }
}
