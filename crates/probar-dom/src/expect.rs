//! Fluent DOM assertions.
//!
//! [`expect_dom`] wraps a value under test and runs matchers against it
//! with injected equality and pretty-printing services:
//!
//! ```
//! use probar_dom::{expect_dom, DomResult};
//!
//! # fn main() -> DomResult<()> {
//! let mut assertion = expect_dom(r#"<input id="name" value="Ada" required>"#);
//! assertion
//!     .to_have_id("name")?
//!     .to_have_value("Ada")?
//!     .to_be_required()?
//!     .not()
//!     .to_be_disabled()?;
//! # Ok(())
//! # }
//! ```
//!
//! Failures are returned as [`DomError::AssertionFailed`], or collected in
//! soft mode and reported together by [`DomAssertion::finalize`]. Usage
//! errors (nothing to resolve, missing property) always propagate.

use std::fmt;

use crate::bag::{ClassList, ExpectedBag};
use crate::compare::{DeepEquality, Equality, Expected};
use crate::config::DomConfig;
use crate::input::Input;
use crate::matchers::{self, MatchResult, MatcherContext};
use crate::pretty::{DefaultPrinter, PrettyPrinter};
use crate::result::{DomError, DomResult};

/// Substitute the `[NOT]` placeholder of a matcher message
#[must_use]
pub fn negate_message(is_not: bool, message: &str) -> String {
    if is_not {
        message.replace("[NOT]", "not")
    } else {
        message.replace("[NOT] ", "")
    }
}

/// DOM assertion builder
pub struct DomAssertion {
    actual: Input,
    equals: Box<dyn Equality>,
    printer: Box<dyn PrettyPrinter>,
    negated: bool,
    soft_mode: bool,
    errors: Vec<String>,
}

impl DomAssertion {
    /// Create an assertion with deep equality and the default printer
    #[must_use]
    pub fn new(actual: impl Into<Input>) -> Self {
        Self {
            actual: actual.into(),
            equals: Box::new(DeepEquality),
            printer: Box::new(DefaultPrinter::default()),
            negated: false,
            soft_mode: false,
            errors: Vec::new(),
        }
    }

    /// Apply printer limits and the initial mode from `config`
    #[must_use]
    pub fn with_config(mut self, config: &DomConfig) -> Self {
        self.printer = Box::new(DefaultPrinter::new(config));
        self.soft_mode = config.soft;
        self
    }

    /// Replace the equality predicate
    #[must_use]
    pub fn with_equality(mut self, equals: impl Equality + 'static) -> Self {
        self.equals = Box::new(equals);
        self
    }

    /// Replace the pretty-printer
    #[must_use]
    pub fn with_printer(mut self, printer: impl PrettyPrinter + 'static) -> Self {
        self.printer = Box::new(printer);
        self
    }

    /// Enable soft assertion mode (collect errors instead of failing immediately)
    #[must_use]
    pub fn soft(mut self) -> Self {
        self.soft_mode = true;
        self
    }

    /// Negate the next matcher only
    pub fn not(&mut self) -> &mut Self {
        self.negated = !self.negated;
        self
    }

    /// Run any matcher against the value under test
    pub fn check(
        &mut self,
        matcher: impl for<'a> FnOnce(&MatcherContext<'a>) -> DomResult<MatchResult<'a>>,
    ) -> DomResult<&mut Self> {
        let negated = std::mem::take(&mut self.negated);
        let failure = {
            let ctx = MatcherContext::new(&self.actual, &*self.equals, &*self.printer);
            let result = matcher(&ctx)?;
            (result.pass == negated).then(|| negate_message(negated, &result.message()))
        };
        if let Some(message) = failure {
            tracing::debug!(negated, soft = self.soft_mode, %message, "DOM assertion failed");
            if self.soft_mode {
                self.errors.push(message);
            } else {
                return Err(DomError::AssertionFailed { message });
            }
        }
        Ok(self)
    }

    /// Assert the element is checked
    pub fn to_be_checked(&mut self) -> DomResult<&mut Self> {
        self.check(matchers::to_be_checked)
    }

    /// Assert the element is disabled
    pub fn to_be_disabled(&mut self) -> DomResult<&mut Self> {
        self.check(matchers::to_be_disabled)
    }

    /// Assert the option is selected
    pub fn to_be_selected(&mut self) -> DomResult<&mut Self> {
        self.check(matchers::to_be_selected)
    }

    /// Assert the element is required
    pub fn to_be_required(&mut self) -> DomResult<&mut Self> {
        self.check(matchers::to_be_required)
    }

    /// Assert the element is indeterminate
    pub fn to_be_indeterminate(&mut self) -> DomResult<&mut Self> {
        self.check(matchers::to_be_indeterminate)
    }

    /// Assert the element is read-only
    pub fn to_be_read_only(&mut self) -> DomResult<&mut Self> {
        self.check(matchers::to_be_read_only)
    }

    /// Assert the element has focus
    pub fn to_be_focused(&mut self) -> DomResult<&mut Self> {
        self.check(matchers::to_be_focused)
    }

    /// Assert the element is displayed
    pub fn to_be_displayed(&mut self) -> DomResult<&mut Self> {
        self.check(matchers::to_be_displayed)
    }

    /// Assert the element is not attached to a document
    pub fn to_be_detached_element(&mut self) -> DomResult<&mut Self> {
        self.check(matchers::to_be_detached_element)
    }

    /// Assert the element has the given id
    pub fn to_have_id(&mut self, id: impl Into<Expected>) -> DomResult<&mut Self> {
        let id = id.into();
        self.check(move |ctx| matchers::to_have_id(ctx, Some(id)))
    }

    /// Assert the element has a non-empty id
    pub fn to_have_an_id(&mut self) -> DomResult<&mut Self> {
        self.check(|ctx| matchers::to_have_id(ctx, None))
    }

    /// Assert attributes
    pub fn to_have_attrs(&mut self, attrs: impl Into<ExpectedBag>) -> DomResult<&mut Self> {
        let attrs = attrs.into();
        self.check(move |ctx| matchers::to_have_attrs(ctx, attrs))
    }

    /// Assert properties
    pub fn to_have_props(&mut self, props: impl Into<ExpectedBag>) -> DomResult<&mut Self> {
        let props = props.into();
        self.check(move |ctx| matchers::to_have_props(ctx, props))
    }

    /// Assert inline styles
    pub fn to_have_style(&mut self, styles: impl Into<ExpectedBag>) -> DomResult<&mut Self> {
        let styles = styles.into();
        self.check(move |ctx| matchers::to_have_style(ctx, styles))
    }

    /// Assert resolved styles
    pub fn to_have_computed_style(
        &mut self,
        styles: impl Into<ExpectedBag>,
    ) -> DomResult<&mut Self> {
        let styles = styles.into();
        self.check(move |ctx| matchers::to_have_computed_style(ctx, styles))
    }

    /// Assert CSS classes
    pub fn to_have_css_class(&mut self, classes: impl Into<ClassList>) -> DomResult<&mut Self> {
        let classes = classes.into();
        self.check(move |ctx| matchers::to_have_css_class(ctx, classes))
    }

    /// Assert the tag name, ignoring case
    pub fn to_have_tag_name(&mut self, tag_name: impl Into<Expected>) -> DomResult<&mut Self> {
        let tag_name = tag_name.into();
        self.check(move |ctx| matchers::to_have_tag_name(ctx, tag_name))
    }

    /// Assert the trimmed text content
    pub fn to_have_text(&mut self, text: impl Into<Expected>) -> DomResult<&mut Self> {
        let text = text.into();
        self.check(move |ctx| matchers::to_have_text(ctx, text))
    }

    /// Assert the normalized inner HTML
    pub fn to_have_html(&mut self, html: impl Into<Expected>) -> DomResult<&mut Self> {
        let html = html.into();
        self.check(move |ctx| matchers::to_have_html(ctx, html))
    }

    /// Assert the form value
    pub fn to_have_value(&mut self, value: impl Into<Expected>) -> DomResult<&mut Self> {
        let value = value.into();
        self.check(move |ctx| matchers::to_have_value(ctx, value))
    }

    /// Assert the selected index of a `<select>`
    pub fn to_have_selected_index(&mut self, index: impl Into<Expected>) -> DomResult<&mut Self> {
        let index = index.into();
        self.check(move |ctx| matchers::to_have_selected_index(ctx, index))
    }

    /// Finalize soft assertions and return any collected errors
    pub fn finalize(&self) -> DomResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(DomError::AssertionFailed {
                message: format!(
                    "{} assertion(s) failed:\n{}",
                    self.errors.len(),
                    self.errors.join("\n\n")
                ),
            })
        }
    }

    /// Get collected errors (for soft assertions)
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

impl fmt::Debug for DomAssertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomAssertion")
            .field("actual", &self.actual)
            .field("negated", &self.negated)
            .field("soft_mode", &self.soft_mode)
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

/// Create a DOM assertion
#[must_use]
pub fn expect_dom(actual: impl Into<Input>) -> DomAssertion {
    DomAssertion::new(actual)
}
