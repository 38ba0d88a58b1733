//! Result and error types for probar-dom.

use thiserror::Error;

/// Result type for probar-dom operations
pub type DomResult<T> = Result<T, DomError>;

/// Errors that can occur in probar-dom
///
/// Usage errors (the tested value cannot be turned into a DOM element, or the
/// element lacks a property the matcher needs) are reported through this type
/// and never downgraded to a failed assertion.
#[derive(Debug, Error)]
pub enum DomError {
    /// Resolution of a collection with no entries
    #[error("Expect valid node but found empty node list")]
    EmptyNodeList,

    /// Resolution of a collection with more than one entry
    #[error("Expect single node but found node list of {size} nodes: {dump}")]
    NodeListTooLarge {
        /// Number of entries in the collection
        size: usize,
        /// Pretty-printed collection
        dump: String,
    },

    /// Singleton collection whose entry is not an element
    #[error("Expect single node but found value: {dump}")]
    NotAnElement {
        /// Pretty-printed collection
        dump: String,
    },

    /// Value that cannot be resolved to a DOM element at all
    #[error("Expect DOM node but found: {dump}")]
    NotADomNode {
        /// Pretty-printed value
        dump: String,
    },

    /// Element lacks a property required by a matcher
    #[error("Cannot run `{matcher}` matcher on a DOM node without `{property}` property")]
    MissingProperty {
        /// Matcher name (camel case, as reported to test authors)
        matcher: &'static str,
        /// Required property
        property: &'static str,
    },

    /// Property exists but cannot be assigned
    #[error("Property `{property}` is read-only")]
    ReadOnlyProperty {
        /// Property name
        property: String,
    },

    /// Tree mutation that would produce an invalid document
    #[error("Hierarchy request error: {message}")]
    HierarchyRequest {
        /// Error message
        message: String,
    },

    /// Node is not where the operation expected it
    #[error("Node not found: {message}")]
    NotFound {
        /// Error message
        message: String,
    },

    /// A style provider could not compute a style for the element
    #[error("Style unavailable: {reason}")]
    StyleUnavailable {
        /// Why the provider gave up
        reason: String,
    },

    /// Invalid regular expression used as an expected pattern
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Assertion failed (reported by the `DomAssertion` adapter)
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Error message
        message: String,
    },

    /// Configuration could not be loaded
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DomError {
    /// Whether this error reports a failed assertion rather than a misuse
    #[must_use]
    pub const fn is_assertion_failure(&self) -> bool {
        matches!(self, Self::AssertionFailed { .. })
    }
}
