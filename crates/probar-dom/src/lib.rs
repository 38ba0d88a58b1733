//! Probar DOM: element matchers for document-model assertions
//!
//! Assertions about the state of a DOM element (checked, disabled,
//! focused, displayed, attributes, classes, styles, tag name, text, HTML
//! and form values) over a small in-memory document.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────┐   ┌───────────┐   ┌────────────┐   ┌─────────────┐
//! │ Input    │──►│ Resolver │──►│ Extractor │──►│ Comparator │──►│ MatchResult │
//! │ (any     │   │ (one     │   │ (attrs,   │   │ (pattern   │   │ (pass +     │
//! │  shape)  │   │ element) │   │  styles)  │   │  or equals)│   │  message)   │
//! └──────────┘   └──────────┘   └───────────┘   └────────────┘   └─────────────┘
//! ```
//!
//! Every matcher receives the value under test together with injected
//! [`Equality`] and [`PrettyPrinter`] services through a [`MatcherContext`].
//! [`expect_dom`] bundles them into a fluent, soft-capable assertion.
//!
//! ```
//! use probar_dom::{expect_dom, DomResult, Document};
//!
//! # fn main() -> DomResult<()> {
//! let document = Document::new();
//! let body = document.body().ok_or(probar_dom::DomError::NotFound {
//!     message: "body".to_string(),
//! })?;
//! body.set_inner_html(r#"<button id="save" class="btn primary">Save</button>"#)?;
//! let button = document.get_element_by_id("save").ok_or(probar_dom::DomError::NotFound {
//!     message: "#save".to_string(),
//! })?;
//!
//! expect_dom(&button)
//!     .to_have_css_class("primary")?
//!     .to_have_text("Save")?
//!     .not()
//!     .to_be_detached_element()?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod bag;
mod compare;
mod config;
mod content;
pub mod dom;
mod expect;
mod extract;
mod input;
pub mod matchers;
pub mod predicates;
mod pretty;
mod resolve;
mod result;

pub use bag::{ClassList, ClassPattern, ExpectedBag};
pub use compare::{
    match_or_equals, string_form, Any, Anything, AsymmetricMatcher, DeepEquality, Equality,
    Expected, StringContaining, ValueKind,
};
pub use config::{
    DomConfig, DEFAULT_MAX_PRETTY_PRINT_ARRAY_LENGTH, DEFAULT_MAX_PRETTY_PRINT_CHARS,
    DEFAULT_MAX_PRETTY_PRINT_DEPTH,
};
pub use content::{expected_html, expected_text, normalize_html, normalize_text, read_text};
pub use dom::{ComputedStyle, Document, Node, NodeList, NodeType, StyleDeclaration, StyleSource};
pub use expect::{expect_dom, negate_message, DomAssertion};
pub use extract::{check_attrs, check_computed_styles, check_props, check_styles, BagCheck};
pub use input::{Input, Wrapper};
pub use matchers::{MatchResult, MatcherContext};
pub use pretty::{DefaultPrinter, PrettyPrinter};
pub use resolve::{to_dom_element, WrapperProbe, WRAPPER_PROBES};
pub use result::{DomError, DomResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::{
        expect_dom, ClassList, Document, DomAssertion, DomConfig, DomError, DomResult, Expected,
        ExpectedBag, Input, Node, Wrapper,
    };
}
