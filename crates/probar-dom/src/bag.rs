//! Normalized matcher arguments: named expectation bags and class lists.
//!
//! Matchers taking "a name and a value, or an object of names to values"
//! receive an [`ExpectedBag`]; every call shape converts into the same
//! ordered mapping before anything is compared.

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde_json::{Map, Value};

use crate::compare::{string_form, AsymmetricMatcher, Expected};
use crate::pretty::PrettyPrinter;

/// Ordered mapping from a name to an optional expected value.
///
/// A name without a value only requires presence (attributes) or a
/// non-empty value (properties, styles).
///
/// ```
/// use probar_dom::ExpectedBag;
///
/// let presence = ExpectedBag::from("data-id");
/// let pair = ExpectedBag::from(("data-id", "1"));
/// let object = ExpectedBag::from(serde_json::json!({"data-id": "1", "title": "x"}));
/// assert_eq!(presence.len() + pair.len() + object.len(), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExpectedBag {
    entries: Vec<(String, Option<Expected>)>,
}

impl ExpectedBag {
    /// Empty bag
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a name with an expected value (replacing an earlier one)
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, expected: impl Into<Expected>) -> Self {
        self.insert(name.into(), Some(expected.into()));
        self
    }

    /// Add a name without a value
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.insert(name.into(), None);
        self
    }

    fn insert(&mut self, name: String, expected: Option<Expected>) {
        if let Some(slot) = self.entries.iter_mut().find(|(key, _)| *key == name) {
            slot.1 = expected;
        } else {
            self.entries.push((name, expected));
        }
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Expected>)> {
        self.entries
            .iter()
            .map(|(name, expected)| (name.as_str(), expected.as_ref()))
    }

    /// Names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the bag is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<&str> for ExpectedBag {
    fn from(name: &str) -> Self {
        Self::new().with_name(name)
    }
}

impl From<String> for ExpectedBag {
    fn from(name: String) -> Self {
        Self::new().with_name(name)
    }
}

impl<N, E> From<(N, E)> for ExpectedBag
where
    N: Into<String>,
    E: Into<Expected>,
{
    fn from((name, expected): (N, E)) -> Self {
        Self::new().with(name, expected)
    }
}

impl<N, E> From<Vec<(N, E)>> for ExpectedBag
where
    N: Into<String>,
    E: Into<Expected>,
{
    fn from(pairs: Vec<(N, E)>) -> Self {
        pairs
            .into_iter()
            .fold(Self::new(), |bag, (name, expected)| bag.with(name, expected))
    }
}

impl From<Map<String, Value>> for ExpectedBag {
    fn from(map: Map<String, Value>) -> Self {
        map.into_iter()
            .fold(Self::new(), |bag, (name, value)| bag.with(name, value))
    }
}

/// Objects map names to values; a string is a single name; anything else
/// yields an empty bag.
impl From<Value> for ExpectedBag {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::from(map),
            Value::String(name) => Self::from(name),
            _ => Self::new(),
        }
    }
}

impl FromIterator<(String, Option<Expected>)> for ExpectedBag {
    fn from_iter<I: IntoIterator<Item = (String, Option<Expected>)>>(iter: I) -> Self {
        let mut bag = Self::new();
        for (name, expected) in iter {
            bag.insert(name, expected);
        }
        bag
    }
}

/// One expected CSS class
#[derive(Clone)]
pub enum ClassPattern {
    /// Exact class name
    Name(String),
    /// Pattern that must match at least one class
    Pattern(Regex),
    /// Matcher that must accept at least one class
    Matcher(Arc<dyn AsymmetricMatcher>),
    /// Null entry; no class ever equals it
    Null,
}

impl ClassPattern {
    /// Whether this expectation is met by one of `classes`
    #[must_use]
    pub fn matches(&self, classes: &[String]) -> bool {
        match self {
            Self::Name(name) => classes.iter().any(|class| class == name),
            Self::Pattern(regex) => classes.iter().any(|class| regex.is_match(class)),
            Self::Matcher(matcher) => classes
                .iter()
                .any(|class| matcher.asymmetric_match(&Value::String(class.clone()))),
            Self::Null => false,
        }
    }
}

impl fmt::Debug for ClassPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.debug_tuple("Name").field(name).finish(),
            Self::Pattern(regex) => f.debug_tuple("Pattern").field(&regex.as_str()).finish(),
            Self::Matcher(matcher) => f.debug_tuple("Matcher").field(&matcher.description()).finish(),
            Self::Null => f.write_str("Null"),
        }
    }
}

/// Expected CSS classes, remembering the shape they were given in for
/// failure messages.
#[derive(Debug, Clone)]
pub struct ClassList {
    patterns: Vec<ClassPattern>,
    source: Vec<Expected>,
    is_list: bool,
}

impl ClassList {
    /// Parsed class expectations
    #[must_use]
    pub fn patterns(&self) -> &[ClassPattern] {
        &self.patterns
    }

    /// Print the expectation the way the caller wrote it
    #[must_use]
    pub fn describe(&self, pp: &dyn PrettyPrinter) -> String {
        if !self.is_list {
            if let Some(single) = self.source.first() {
                return pp.pp_expected(single);
            }
        }
        let items: Vec<String> = self.source.iter().map(|class| pp.pp_expected(class)).collect();
        format!("[ {} ]", items.join(", "))
    }
}

/// Space-separated class names; blank tokens are dropped
impl From<&str> for ClassList {
    fn from(classes: &str) -> Self {
        Self {
            patterns: classes
                .split(' ')
                .map(str::trim)
                .filter(|class| !class.is_empty())
                .map(|class| ClassPattern::Name(class.to_string()))
                .collect(),
            source: vec![Expected::from(classes)],
            is_list: false,
        }
    }
}

/// A list of names, taken as is
impl From<Vec<&str>> for ClassList {
    fn from(classes: Vec<&str>) -> Self {
        Self::from(classes.into_iter().map(Expected::from).collect::<Vec<_>>())
    }
}

/// A single pattern
impl From<Regex> for ClassList {
    fn from(regex: Regex) -> Self {
        Self {
            patterns: vec![ClassPattern::Pattern(regex.clone())],
            source: vec![Expected::Pattern(regex)],
            is_list: false,
        }
    }
}

/// A mixed list of names, patterns and matchers; other literals are
/// compared by their string form, null is never present.
impl From<Vec<Expected>> for ClassList {
    fn from(classes: Vec<Expected>) -> Self {
        let patterns = classes
            .iter()
            .map(|class| match class {
                Expected::Pattern(regex) => ClassPattern::Pattern(regex.clone()),
                Expected::Value(value) => string_form(value).map_or(ClassPattern::Null, ClassPattern::Name),
                Expected::Matcher(matcher) => ClassPattern::Matcher(Arc::clone(matcher)),
            })
            .collect();
        Self {
            patterns,
            source: classes,
            is_list: true,
        }
    }
}
