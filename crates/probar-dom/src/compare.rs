//! Expected values and the pattern-or-equality comparison rule.
//!
//! Every facet matcher (id, attributes, properties, styles, tag name, text,
//! value) funnels through [`match_or_equals`]: patterns are matched against
//! the string form of the actual value, everything else is handed to the
//! injected [`Equality`].

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde_json::Value;

use crate::result::DomResult;

/// Value an actual facet is compared against
#[derive(Clone)]
pub enum Expected {
    /// Literal value, compared with the injected equality
    Value(Value),
    /// Regular expression, matched anywhere in the string form of the actual value
    Pattern(Regex),
    /// Opaque matcher evaluated by the injected equality
    Matcher(Arc<dyn AsymmetricMatcher>),
}

impl Expected {
    /// Compile `pattern` into a pattern expectation
    pub fn pattern(pattern: &str) -> DomResult<Self> {
        Ok(Self::Pattern(Regex::new(pattern)?))
    }

    /// Matches any value of the given kind
    #[must_use]
    pub fn any(kind: ValueKind) -> Self {
        Self::Matcher(Arc::new(Any(kind)))
    }

    /// Matches anything except null
    #[must_use]
    pub fn anything() -> Self {
        Self::Matcher(Arc::new(Anything))
    }

    /// Matches strings containing `needle`
    #[must_use]
    pub fn string_containing(needle: impl Into<String>) -> Self {
        Self::Matcher(Arc::new(StringContaining(needle.into())))
    }

    /// Wrap a custom matcher
    #[must_use]
    pub fn matcher(matcher: impl AsymmetricMatcher + 'static) -> Self {
        Self::Matcher(Arc::new(matcher))
    }

    /// Whether this is a literal primitive (string, number, boolean or null)
    #[must_use]
    pub const fn is_primitive(&self) -> bool {
        matches!(
            self,
            Self::Value(Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_))
        )
    }

    /// Literal value, if any
    #[must_use]
    pub const fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Debug for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Pattern(regex) => f.debug_tuple("Pattern").field(&regex.as_str()).finish(),
            Self::Matcher(matcher) => f.debug_tuple("Matcher").field(&matcher.description()).finish(),
        }
    }
}

impl From<Value> for Expected {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Regex> for Expected {
    fn from(regex: Regex) -> Self {
        Self::Pattern(regex)
    }
}

impl From<&str> for Expected {
    fn from(value: &str) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<String> for Expected {
    fn from(value: String) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<&String> for Expected {
    fn from(value: &String) -> Self {
        Self::Value(Value::from(value.as_str()))
    }
}

macro_rules! expected_from_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Expected {
                fn from(value: $ty) -> Self {
                    Self::Value(Value::from(value))
                }
            }
        )*
    };
}

expected_from_value!(bool, i32, i64, u32, u64, usize, f64);

/// Runtime kind of a JSON-like value, for [`Expected::any`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Strings
    String,
    /// Numbers
    Number,
    /// Booleans
    Boolean,
    /// Arrays
    Array,
    /// Objects
    Object,
}

impl ValueKind {
    /// Kind of `value` (`None` for null)
    #[must_use]
    pub const fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(_) => Some(Self::Boolean),
            Value::Number(_) => Some(Self::Number),
            Value::String(_) => Some(Self::String),
            Value::Array(_) => Some(Self::Array),
            Value::Object(_) => Some(Self::Object),
        }
    }

    const fn type_name(self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Number => "Number",
            Self::Boolean => "Boolean",
            Self::Array => "Array",
            Self::Object => "Object",
        }
    }
}

/// A predicate standing in for an expected value ("any string", ...)
pub trait AsymmetricMatcher: Send + Sync {
    /// Whether `actual` satisfies the matcher
    fn asymmetric_match(&self, actual: &Value) -> bool;

    /// Printed form used in failure messages
    fn description(&self) -> String;
}

/// Matches any non-null value of a kind
#[derive(Debug, Clone, Copy)]
pub struct Any(pub ValueKind);

impl AsymmetricMatcher for Any {
    fn asymmetric_match(&self, actual: &Value) -> bool {
        ValueKind::of(actual) == Some(self.0)
    }

    fn description(&self) -> String {
        format!("<jasmine.any({})>", self.0.type_name())
    }
}

/// Matches anything except null
#[derive(Debug, Clone, Copy)]
pub struct Anything;

impl AsymmetricMatcher for Anything {
    fn asymmetric_match(&self, actual: &Value) -> bool {
        !actual.is_null()
    }

    fn description(&self) -> String {
        "<jasmine.anything>".to_string()
    }
}

/// Matches strings containing a substring
#[derive(Debug, Clone)]
pub struct StringContaining(pub String);

impl AsymmetricMatcher for StringContaining {
    fn asymmetric_match(&self, actual: &Value) -> bool {
        actual.as_str().is_some_and(|text| text.contains(&self.0))
    }

    fn description(&self) -> String {
        format!("<jasmine.stringContaining(\"{}\")>", self.0)
    }
}

/// Equality predicate injected by the host test framework
pub trait Equality {
    /// Whether `actual` equals `expected`
    fn equals(&self, actual: &Value, expected: &Expected) -> bool;
}

impl<F> Equality for F
where
    F: Fn(&Value, &Expected) -> bool,
{
    fn equals(&self, actual: &Value, expected: &Expected) -> bool {
        self(actual, expected)
    }
}

/// Deep structural equality with asymmetric matcher support.
///
/// Numbers compare by value (`1` equals `1.0`); a pattern is never equal to
/// a value.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeepEquality;

impl Equality for DeepEquality {
    fn equals(&self, actual: &Value, expected: &Expected) -> bool {
        match expected {
            Expected::Value(value) => deep_equals(actual, value),
            Expected::Matcher(matcher) => matcher.asymmetric_match(actual),
            Expected::Pattern(_) => false,
        }
    }
}

fn deep_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| deep_equals(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| deep_equals(x, y)))
        }
        _ => a == b,
    }
}

/// Script `String(value)`; `None` for null, which has no string form here.
#[must_use]
pub fn string_form(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number_form(number)),
        Value::String(text) => Some(text.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| string_form(item).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => Some("[object Object]".to_string()),
    }
}

/// Integral floats print without a fractional part, as in scripts
pub(crate) fn number_form(number: &serde_json::Number) -> String {
    match number.as_f64() {
        Some(float)
            if !number.is_i64() && !number.is_u64() && float.fract() == 0.0 && float.abs() < 1e21 =>
        {
            format!("{float:.0}")
        }
        _ => number.to_string(),
    }
}

/// Whether `actual` satisfies `expected`.
///
/// A pattern matches when it finds a match anywhere in the string form of
/// `actual` (null never matches); anything else is delegated to `equals`.
pub fn match_or_equals(actual: &Value, expected: &Expected, equals: &dyn Equality) -> bool {
    let pass = match expected {
        Expected::Pattern(regex) => string_form(actual).is_some_and(|text| regex.is_match(&text)),
        _ => equals.equals(actual, expected),
    };
    tracing::trace!(?actual, ?expected, pass, "match_or_equals");
    pass
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    mod pattern_tests {
        use super::*;

        #[test]
        fn test_pattern_contains_match() {
            let expected = Expected::pattern("oo").unwrap();
            assert!(match_or_equals(&json!("foo"), &expected, &DeepEquality));
            assert!(!match_or_equals(&json!("bar"), &expected, &DeepEquality));
        }

        #[test]
        fn test_pattern_never_matches_null() {
            let expected = Expected::pattern(".*").unwrap();
            assert!(!match_or_equals(&Value::Null, &expected, &DeepEquality));
        }

        #[test]
        fn test_pattern_uses_string_form() {
            let expected = Expected::pattern("^1$").unwrap();
            assert!(match_or_equals(&json!(1), &expected, &DeepEquality));
            let expected = Expected::pattern("^true$").unwrap();
            assert!(match_or_equals(&json!(true), &expected, &DeepEquality));
        }

        #[test]
        fn test_invalid_pattern() {
            assert!(Expected::pattern("(").is_err());
        }

        #[test]
        fn test_pattern_skips_equality() {
            let never = |_: &Value, _: &Expected| -> bool { panic!("equality called") };
            let expected = Expected::pattern("a").unwrap();
            assert!(match_or_equals(&json!("a"), &expected, &never));
        }
    }

    mod equality_tests {
        use super::*;

        #[test]
        fn test_delegates_to_equality() {
            let always = |_: &Value, _: &Expected| true;
            assert!(match_or_equals(&json!(1), &Expected::from("x"), &always));
            assert!(!match_or_equals(&json!(1), &Expected::from("x"), &DeepEquality));
        }

        #[test]
        fn test_deep_equality_numbers() {
            assert!(DeepEquality.equals(&json!(1), &Expected::from(1.0)));
            assert!(DeepEquality.equals(&json!([1, {"a": 2}]), &Expected::from(json!([1.0, {"a": 2}]))));
            assert!(!DeepEquality.equals(&json!("1"), &Expected::from(1)));
        }

        #[test]
        fn test_asymmetric_matchers() {
            assert!(DeepEquality.equals(&json!("x"), &Expected::any(ValueKind::String)));
            assert!(!DeepEquality.equals(&json!(1), &Expected::any(ValueKind::String)));
            assert!(DeepEquality.equals(&json!(0), &Expected::anything()));
            assert!(!DeepEquality.equals(&Value::Null, &Expected::anything()));
            assert!(DeepEquality.equals(&json!("foobar"), &Expected::string_containing("oba")));
        }
    }

    mod string_form_tests {
        use super::*;

        #[test]
        fn test_string_form() {
            assert_eq!(string_form(&Value::Null), None);
            assert_eq!(string_form(&json!(1.0)), Some("1".to_string()));
            assert_eq!(string_form(&json!(1.5)), Some("1.5".to_string()));
            assert_eq!(string_form(&json!(-2)), Some("-2".to_string()));
            assert_eq!(string_form(&json!(["a", null, 1])), Some("a,,1".to_string()));
            assert_eq!(string_form(&json!({})), Some("[object Object]".to_string()));
        }
    }
}
