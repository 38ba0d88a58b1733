//! End-to-end tests for probar-dom.
//!
//! Each test drives the public assertion API against a document built the
//! way a UI test would build it.

use probar_dom::prelude::*;
use probar_dom::{DefaultPrinter, DeepEquality, MatcherContext};
use regex::Regex;
use serde_json::{json, Value};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("probar_dom=debug")
        .try_init();
}

fn mount(document: &Document, html: &str) -> DomResult<()> {
    let body = document.body().ok_or_else(|| DomError::NotFound {
        message: "document has no body".to_string(),
    })?;
    body.set_inner_html(html)
}

fn by_id(document: &Document, id: &str) -> Node {
    document.get_element_by_id(id).unwrap()
}

// ============================================================================
// Identity
// ============================================================================

#[test]
fn id_matches_given_value_or_any() {
    init_tracing();
    let document = Document::new();
    mount(&document, r#"<div id="foo"></div><div class="anonymous"></div>"#).unwrap();

    let foo = by_id(&document, "foo");
    expect_dom(&foo).to_have_id("foo").unwrap().to_have_an_id().unwrap();

    let err = expect_dom(&foo).to_have_id("bar").unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"Assertion failed: Expect '<div id="foo"></div>' to have id 'bar' but was 'foo'"#
    );

    let anonymous = document.body().unwrap().children().get(1).cloned().unwrap();
    expect_dom(&anonymous).not().to_have_an_id().unwrap();
}

// ============================================================================
// CSS classes
// ============================================================================

#[test]
fn css_classes_as_string_list_or_pattern() {
    init_tracing();
    let mut assertion = expect_dom(r#"<div class="foo bar"></div>"#);
    assertion
        .to_have_css_class("foo")
        .unwrap()
        .to_have_css_class("bar foo")
        .unwrap()
        .to_have_css_class(Regex::new("^ba").unwrap())
        .unwrap()
        .to_have_css_class(vec!["foo", "bar"])
        .unwrap()
        .not()
        .to_have_css_class("baz")
        .unwrap();
}

#[test]
fn css_class_list_entries_are_never_skipped() {
    init_tracing();
    let err = expect_dom("<div></div>")
        .to_have_css_class(vec![Expected::anything()])
        .unwrap_err();
    assert!(err.is_assertion_failure());
    assert!(expect_dom("<div></div>")
        .to_have_css_class(vec![Expected::from(json!(null))])
        .is_err());
    expect_dom(r#"<div class="open"></div>"#)
        .to_have_css_class(vec![Expected::anything()])
        .unwrap();
}

// ============================================================================
// Attributes
// ============================================================================

#[test]
fn attribute_presence_does_not_consult_equality() {
    init_tracing();
    let strict = |_: &Value, _: &Expected| -> bool { panic!("equality consulted") };
    let mut assertion = expect_dom(r#"<input type="text" data-id="1">"#).with_equality(strict);
    assertion.to_have_attrs("data-id").unwrap();
    assertion.not().to_have_attrs("title").unwrap();
}

#[test]
fn attribute_values_and_patterns() {
    init_tracing();
    let mut assertion = expect_dom(r#"<a href="/docs/intro" target="_blank">Docs</a>"#);
    assertion
        .to_have_attrs(json!({"target": "_blank"}))
        .unwrap()
        .to_have_attrs(ExpectedBag::new().with("href", Expected::pattern("^/docs/").unwrap()))
        .unwrap()
        .to_have_tag_name("A")
        .unwrap()
        .to_have_text("Docs")
        .unwrap();
}

// ============================================================================
// Form state
// ============================================================================

#[test]
fn select_index_follows_selection() {
    init_tracing();
    let document = Document::new();
    mount(
        &document,
        r#"<select id="size"><option>S</option><option selected>M</option><option>L</option></select>"#,
    )
    .unwrap();
    let select = by_id(&document, "size");

    expect_dom(&select).to_have_selected_index(1).unwrap().to_have_value("M").unwrap();

    select.set_selected_index(2);
    expect_dom(&select).to_have_selected_index(2).unwrap().to_have_value("L").unwrap();

    let options = select.options();
    expect_dom(&options[2]).to_be_selected().unwrap();
    expect_dom(&options[1]).not().to_be_selected().unwrap();
}

#[test]
fn form_controls_report_boolean_state() {
    init_tracing();
    let document = Document::new();
    mount(
        &document,
        r#"<input id="agree" type="checkbox" checked required><textarea id="notes" readonly disabled></textarea>"#,
    )
    .unwrap();

    expect_dom(by_id(&document, "agree"))
        .to_be_checked()
        .unwrap()
        .to_be_required()
        .unwrap()
        .not()
        .to_be_disabled()
        .unwrap();
    expect_dom(by_id(&document, "notes"))
        .to_be_read_only()
        .unwrap()
        .to_be_disabled()
        .unwrap()
        .to_have_value("")
        .unwrap();
}

#[test]
fn missing_property_is_a_usage_error() {
    init_tracing();
    let err = expect_dom("<span></span>").soft().to_be_checked().unwrap_err();
    assert!(!err.is_assertion_failure());
    assert_eq!(
        err.to_string(),
        "Cannot run `toBeChecked` matcher on a DOM node without `checked` property"
    );
}

// ============================================================================
// Content
// ============================================================================

#[test]
fn html_is_compared_after_normalization() {
    init_tracing();
    let mut assertion = expect_dom(r#"<div><span class="foo">bar</span></div>"#);
    assertion
        .to_have_html("<span class='foo'>bar</span>")
        .unwrap()
        .to_have_html(r#"<SPAN CLASS="foo">bar</SPAN>"#)
        .unwrap()
        .not()
        .to_have_html("<span>bar</span>")
        .unwrap();
}

#[test]
fn text_ignores_surrounding_whitespace() {
    init_tracing();
    let mut assertion = expect_dom("<p>\n   Hello world   \n</p>");
    assertion
        .to_have_text("Hello world")
        .unwrap()
        .to_have_text("  Hello world")
        .unwrap()
        .to_have_text(Expected::string_containing("world"))
        .unwrap();
}

// ============================================================================
// Attachment, focus and visibility
// ============================================================================

#[test]
fn detached_until_attached_to_body() {
    init_tracing();
    let document = Document::new();
    let panel = document.create_element("div");
    expect_dom(&panel).to_be_detached_element().unwrap();

    document.body().unwrap().append_child(&panel).unwrap();
    expect_dom(&panel).not().to_be_detached_element().unwrap();

    panel.remove();
    expect_dom(&panel).to_be_detached_element().unwrap();
}

#[test]
fn focus_moves_with_active_element() {
    init_tracing();
    let document = Document::new();
    mount(&document, r#"<input id="first"><input id="second">"#).unwrap();
    let first = by_id(&document, "first");
    let second = by_id(&document, "second");

    first.focus();
    expect_dom(&first).to_be_focused().unwrap();
    second.focus();
    expect_dom(&first).not().to_be_focused().unwrap();
    expect_dom(&second).to_be_focused().unwrap();
}

#[test]
fn display_follows_style_and_hidden() {
    init_tracing();
    let document = Document::new();
    mount(
        &document,
        r#"<div id="shown"></div><div id="inline" style="display: none"></div><div id="hidden" hidden></div>"#,
    )
    .unwrap();

    expect_dom(by_id(&document, "shown"))
        .to_be_displayed()
        .unwrap()
        .to_have_computed_style(("display", "block"))
        .unwrap();
    expect_dom(by_id(&document, "inline"))
        .not()
        .to_be_displayed()
        .unwrap()
        .to_have_style(("display", "none"))
        .unwrap();
    expect_dom(by_id(&document, "hidden")).not().to_be_displayed().unwrap();
}

// ============================================================================
// Input shapes
// ============================================================================

#[test]
fn wrappers_resolve_through_known_properties() {
    init_tracing();
    let document = Document::new();
    mount(&document, r#"<app-root id="app"></app-root>"#).unwrap();
    let fixture = Wrapper::new("ComponentFixture").field("nativeElement", by_id(&document, "app"));

    expect_dom(fixture).to_have_id("app").unwrap();

    let unknown = Wrapper::new("Fixture").field("host", by_id(&document, "app"));
    let err = expect_dom(unknown).to_have_an_id().unwrap_err();
    assert!(matches!(err, DomError::NotADomNode { .. }));
}

#[test]
fn collections_must_hold_exactly_one_element() {
    init_tracing();
    let err = expect_dom("<span></span><span></span>").to_be_displayed().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Expect single node but found node list of 2 nodes: [ '<span></span>', '<span></span>' ]"
    );

    let err = expect_dom(Vec::<Node>::new()).to_be_displayed().unwrap_err();
    assert!(matches!(err, DomError::EmptyNodeList));

    expect_dom(vec![Node::orphan_element("p")]).to_have_tag_name("p").unwrap();
}

// ============================================================================
// Soft mode and services
// ============================================================================

#[test]
fn soft_mode_reports_every_failure() {
    init_tracing();
    let config = DomConfig::from_yaml("soft: true\nmax_pretty_print_chars: 40\n").unwrap();
    let mut assertion = expect_dom(r#"<button class="btn">Save</button>"#).with_config(&config);
    let _ = assertion.to_have_text("Cancel");
    let _ = assertion.to_have_css_class("primary");
    let _ = assertion.to_have_tag_name("button");

    assert_eq!(assertion.errors().len(), 2);
    let err = assertion.finalize().unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("Assertion failed: 2 assertion(s) failed:\n"));
    assert!(message.contains("to have text 'Cancel' but was 'Save'"));
    assert!(message.contains("to have css class 'primary'"));
}

#[test]
fn matcher_functions_run_with_injected_services() {
    init_tracing();
    let actual = Input::from(r#"<input type="checkbox">"#);
    let printer = DefaultPrinter::default();
    let ctx = MatcherContext::new(&actual, &DeepEquality, &printer);

    let result = probar_dom::matchers::to_be_checked(&ctx).unwrap();
    assert!(!result.pass);
    assert_eq!(
        probar_dom::negate_message(false, &result.message()),
        r#"Expect '<input type="checkbox">' to be checked"#
    );
}
