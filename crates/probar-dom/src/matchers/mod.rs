//! DOM matchers.
//!
//! Each matcher receives a [`MatcherContext`] plus its own arguments,
//! resolves the actual value to one element, reads a facet, compares it and
//! returns a [`MatchResult`]. Usage errors (unresolvable input, missing
//! property) are returned as `Err`, never as a failed match.
//!
//! Messages contain a `[NOT]` placeholder that the caller substitutes with
//! [`negate_message`](crate::negate_message).

mod bags;
mod content;
mod state;

pub use bags::{to_have_attrs, to_have_computed_style, to_have_css_class, to_have_props, to_have_style};
pub use content::{
    to_have_html, to_have_id, to_have_selected_index, to_have_tag_name, to_have_text, to_have_value,
};
pub use state::{
    to_be_checked, to_be_detached_element, to_be_disabled, to_be_displayed, to_be_focused,
    to_be_indeterminate, to_be_read_only, to_be_required, to_be_selected,
};

use std::fmt;

use crate::compare::Equality;
use crate::dom::Node;
use crate::input::Input;
use crate::pretty::PrettyPrinter;
use crate::resolve::to_dom_element;
use crate::result::{DomError, DomResult};

/// Per-invocation context: the value under test and the injected services
#[derive(Clone, Copy)]
pub struct MatcherContext<'a> {
    /// Value under test
    pub actual: &'a Input,
    /// Equality predicate
    pub equals: &'a dyn Equality,
    /// Pretty-printer for messages
    pub pp: &'a dyn PrettyPrinter,
}

impl<'a> MatcherContext<'a> {
    /// Build a context
    #[must_use]
    pub fn new(actual: &'a Input, equals: &'a dyn Equality, pp: &'a dyn PrettyPrinter) -> Self {
        Self { actual, equals, pp }
    }

    /// Resolve the actual value to one element
    pub fn resolve(&self) -> DomResult<Node> {
        to_dom_element(self.actual, self.pp)
    }

    /// Build a result whose message is rendered from the printed actual value
    pub(crate) fn result(
        &self,
        pass: bool,
        message: impl Fn(&str) -> String + 'a,
    ) -> MatchResult<'a> {
        let pp = self.pp;
        let actual = self.actual;
        MatchResult::new(pass, move || message(&pp.pp_input(actual)))
    }
}

impl fmt::Debug for MatcherContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatcherContext")
            .field("actual", self.actual)
            .finish_non_exhaustive()
    }
}

/// Outcome of a matcher: pass flag and a lazily rendered message
pub struct MatchResult<'a> {
    /// Whether the (non-negated) expectation holds
    pub pass: bool,
    message: Box<dyn Fn() -> String + 'a>,
}

impl<'a> MatchResult<'a> {
    /// Build a result
    #[must_use]
    pub fn new(pass: bool, message: impl Fn() -> String + 'a) -> Self {
        Self {
            pass,
            message: Box::new(message),
        }
    }

    /// Render the message (still containing the `[NOT]` placeholder)
    #[must_use]
    pub fn message(&self) -> String {
        (self.message)()
    }
}

impl fmt::Debug for MatchResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchResult")
            .field("pass", &self.pass)
            .finish_non_exhaustive()
    }
}

/// Fail with a usage error unless `node` has `property`.
pub fn ensure_has_property(
    node: &Node,
    matcher: &'static str,
    property: &'static str,
) -> DomResult<()> {
    if node.has_property(property) {
        Ok(())
    } else {
        Err(DomError::MissingProperty { matcher, property })
    }
}
