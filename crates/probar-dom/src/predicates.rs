//! Runtime shape predicates over inputs, values and expectations.

use serde_json::Value;

use crate::compare::Expected;
use crate::input::Input;
use crate::resolve::WRAPPER_PROBES;

/// Largest integer a script `length` can hold exactly
const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

/// Null input
#[must_use]
pub const fn is_nil(input: &Input) -> bool {
    matches!(input, Input::Value(Value::Null))
}

/// Markup or string value
#[must_use]
pub const fn is_string(input: &Input) -> bool {
    matches!(input, Input::Html(_) | Input::Value(Value::String(_)))
}

/// Array of inputs or array value
#[must_use]
pub const fn is_array(input: &Input) -> bool {
    matches!(input, Input::Collection(_) | Input::Value(Value::Array(_)))
}

/// Node collection (`NodeList` / `HTMLCollection`)
#[must_use]
pub const fn is_node_collection(input: &Input) -> bool {
    matches!(input, Input::NodeList(_))
}

/// Arrays, node collections, and objects with an integral, non-negative
/// numeric `length`
#[must_use]
pub fn is_array_like(input: &Input) -> bool {
    if is_array(input) || is_node_collection(input) {
        return true;
    }
    array_like_length(input).is_some()
}

/// `length` of an array-like plain object
pub(crate) fn array_like_length(input: &Input) -> Option<usize> {
    let Input::Value(Value::Object(map)) = input else {
        return None;
    };
    let length = map.get("length")?.as_f64()?;
    let valid = length >= 0.0 && length.fract() == 0.0 && length <= MAX_SAFE_INTEGER as f64;
    valid.then_some(length as usize)
}

/// An element node
#[must_use]
pub fn is_dom_element(input: &Input) -> bool {
    matches!(input, Input::Node(node) if node.is_element())
}

/// An object exposing one of the known wrapper properties
#[must_use]
pub fn is_wrapper(input: &Input) -> bool {
    WRAPPER_PROBES.iter().any(|probe| (probe.project)(input).is_some())
}

/// String, number, boolean or null
#[must_use]
pub const fn is_primitive(value: &Value) -> bool {
    matches!(
        value,
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_)
    )
}

/// A regular-expression expectation
#[must_use]
pub const fn is_regexp(expected: &Expected) -> bool {
    matches!(expected, Expected::Pattern(_))
}

/// Script truthiness: `false`, `0`, `NaN`, `""` and null are falsy
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Node;
    use crate::input::Wrapper;
    use serde_json::json;

    #[test]
    fn test_shape_predicates() {
        let element = Input::from(Node::orphan_element("div"));
        assert!(is_dom_element(&element));
        assert!(!is_array_like(&element));
        assert!(is_nil(&Input::Value(Value::Null)));
        assert!(is_string(&Input::from("<p></p>")));
        assert!(is_string(&Input::Value(json!("x"))));
        assert!(is_array(&Input::Value(json!([]))));
        assert!(is_node_collection(&Input::from(
            Node::orphan_element("div").child_nodes()
        )));
    }

    #[test]
    fn test_array_like_objects() {
        assert!(is_array_like(&Input::Value(json!({"length": 0}))));
        assert!(is_array_like(&Input::Value(json!({"length": 2, "0": 1, "1": 2}))));
        assert!(!is_array_like(&Input::Value(json!({"length": -1}))));
        assert!(!is_array_like(&Input::Value(json!({"length": 1.5}))));
        assert!(!is_array_like(&Input::Value(json!({"length": "1"}))));
        assert!(!is_array_like(&Input::Value(json!(3))));
    }

    #[test]
    fn test_text_node_is_not_an_element() {
        let div = Node::orphan_element("div");
        div.set_text_content("foo");
        let text = div.first_child().unwrap();
        assert!(!is_dom_element(&Input::from(text)));
    }

    #[test]
    fn test_wrapper_detection() {
        let wrapper = Wrapper::new("Fixture").field("nativeElement", Node::orphan_element("div"));
        assert!(is_wrapper(&Input::from(wrapper)));
        assert!(is_wrapper(&Input::Value(json!({"element": "<div></div>"}))));
        assert!(!is_wrapper(&Input::Value(json!({"other": 1}))));
        assert!(!is_wrapper(&Input::from(Wrapper::new("Empty"))));
    }

    #[test]
    fn test_truthiness() {
        for falsy in [json!(null), json!(false), json!(0), json!(""), json!(0.0)] {
            assert!(!is_truthy(&falsy), "{falsy} should be falsy");
        }
        for truthy in [json!(true), json!(1), json!("0"), json!([]), json!({})] {
            assert!(is_truthy(&truthy), "{truthy} should be truthy");
        }
    }

    #[test]
    fn test_primitive_and_regexp() {
        assert!(is_primitive(&json!("a")));
        assert!(!is_primitive(&json!([])));
        assert!(is_regexp(&Expected::pattern("a").unwrap()));
        assert!(!is_regexp(&Expected::from("a")));
    }
}
