//! Matchers over named expectations: attributes, properties, styles and
//! CSS classes.

use super::{MatchResult, MatcherContext};
use crate::bag::{ClassList, ExpectedBag};
use crate::compare::Equality;
use crate::dom::Node;
use crate::extract::{check_attrs, check_computed_styles, check_props, check_styles, BagCheck};
use crate::result::DomResult;

type BagChecker = fn(&Node, &ExpectedBag, &dyn Equality) -> BagCheck;

fn bag_matcher<'a>(
    ctx: &MatcherContext<'a>,
    bag: ExpectedBag,
    check: BagChecker,
    facet: &'static str,
) -> DomResult<MatchResult<'a>> {
    let node = ctx.resolve()?;
    let pass = check(&node, &bag, ctx.equals).pass;
    let pp = ctx.pp;
    Ok(ctx.result(pass, move |actual| {
        format!("Expect {actual} [NOT] to have {facet} {}", pp.pp_bag(&bag))
    }))
}

/// Every named attribute is present, with a matching value when one is given
pub fn to_have_attrs<'a>(ctx: &MatcherContext<'a>, bag: ExpectedBag) -> DomResult<MatchResult<'a>> {
    bag_matcher(ctx, bag, check_attrs, "attributes")
}

/// Every named property exists, with a matching value when one is given
pub fn to_have_props<'a>(ctx: &MatcherContext<'a>, bag: ExpectedBag) -> DomResult<MatchResult<'a>> {
    bag_matcher(ctx, bag, check_props, "properties")
}

/// Inline styles match
pub fn to_have_style<'a>(ctx: &MatcherContext<'a>, bag: ExpectedBag) -> DomResult<MatchResult<'a>> {
    bag_matcher(ctx, bag, check_styles, "styles")
}

/// Resolved styles match
pub fn to_have_computed_style<'a>(
    ctx: &MatcherContext<'a>,
    bag: ExpectedBag,
) -> DomResult<MatchResult<'a>> {
    bag_matcher(ctx, bag, check_computed_styles, "computed styles")
}

/// Every expected class is present; a pattern or matcher must accept at
/// least one class
pub fn to_have_css_class<'a>(
    ctx: &MatcherContext<'a>,
    classes: ClassList,
) -> DomResult<MatchResult<'a>> {
    let node = ctx.resolve()?;
    let actual_classes = node.class_list();
    let pass = classes
        .patterns()
        .iter()
        .all(|pattern| pattern.matches(&actual_classes));
    let pp = ctx.pp;
    Ok(ctx.result(pass, move |actual| {
        format!("Expect {actual} [NOT] to have css class {}", classes.describe(pp))
    }))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::run;
    use super::*;
    use crate::compare::Expected;
    use crate::dom::Document;
    use regex::Regex;
    use serde_json::json;

    mod attr_tests {
        use super::*;

        #[test]
        fn test_presence_and_values() {
            let html = r#"<input type="text" data-id="12">"#;
            assert!(run(html, |ctx| to_have_attrs(ctx, "data-id".into())).unwrap().0);
            let bag = ExpectedBag::from(json!({"type": "text", "data-id": "12"}));
            assert!(run(html, |ctx| to_have_attrs(ctx, bag)).unwrap().0);
        }

        #[test]
        fn test_message_prints_bag() {
            let bag = ExpectedBag::new().with("title", "foo").with_name("data-id");
            let (pass, message) = run("<div></div>", |ctx| to_have_attrs(ctx, bag)).unwrap();
            assert!(!pass);
            assert_eq!(
                message,
                "Expect '<div></div>' [NOT] to have attributes Object({ title: 'foo', data-id: undefined })"
            );
        }
    }

    mod prop_tests {
        use super::*;

        #[test]
        fn test_props() {
            let bag = ExpectedBag::new().with("checked", true).with("type", "checkbox");
            let html = r#"<input type="checkbox" checked>"#;
            assert!(run(html, |ctx| to_have_props(ctx, bag)).unwrap().0);
            let (pass, message) =
                run(html, |ctx| to_have_props(ctx, ("disabled", true).into())).unwrap();
            assert!(!pass);
            assert!(message.ends_with("[NOT] to have properties Object({ disabled: true })"));
        }
    }

    mod style_tests {
        use super::*;

        #[test]
        fn test_inline_style() {
            let html = r#"<div style="font-size: 10px; display: none"></div>"#;
            let bag = ExpectedBag::from(vec![("font-size", "10px"), ("display", "none")]);
            assert!(run(html, |ctx| to_have_style(ctx, bag)).unwrap().0);
            let camel = ExpectedBag::from(("fontSize", Expected::pattern("px$").unwrap()));
            assert!(run(html, |ctx| to_have_style(ctx, camel)).unwrap().0);
        }

        #[test]
        fn test_computed_style() {
            let doc = Document::new();
            let span = doc.create_element("span");
            doc.body().unwrap().append_child(&span).unwrap();
            let bag = ExpectedBag::from(("display", "inline"));
            assert!(run(&span, |ctx| to_have_computed_style(ctx, bag)).unwrap().0);
            let (pass, message) =
                run(&span, |ctx| to_have_computed_style(ctx, ("color", "red").into())).unwrap();
            assert!(!pass);
            assert!(message.ends_with("[NOT] to have computed styles Object({ color: 'red' })"));
        }

        #[test]
        fn test_computed_style_falls_back_for_detached() {
            let div = Node::orphan_element("div");
            div.set_style_property("color", "red");
            let bag = ExpectedBag::from(("color", "red"));
            assert!(run(&div, |ctx| to_have_computed_style(ctx, bag)).unwrap().0);
        }
    }

    mod class_tests {
        use super::*;

        #[test]
        fn test_space_separated() {
            let html = r#"<div class="foo bar baz"></div>"#;
            assert!(run(html, |ctx| to_have_css_class(ctx, "foo".into())).unwrap().0);
            assert!(run(html, |ctx| to_have_css_class(ctx, " foo  bar ".into())).unwrap().0);
            let (pass, message) =
                run(html, |ctx| to_have_css_class(ctx, "foo qux".into())).unwrap();
            assert!(!pass);
            assert_eq!(
                message,
                r#"Expect '<div class="foo bar baz"></div>' [NOT] to have css class 'foo qux'"#
            );
        }

        #[test]
        fn test_list_and_pattern() {
            let html = r#"<div class="item-1 active"></div>"#;
            let list = ClassList::from(vec![
                Expected::from("active"),
                Expected::pattern("^item-").unwrap(),
            ]);
            let (pass, message) = run(html, |ctx| to_have_css_class(ctx, list)).unwrap();
            assert!(pass);
            assert!(message.ends_with("[NOT] to have css class [ 'active', /^item-/ ]"));

            let single = ClassList::from(Regex::new("^nope").unwrap());
            assert!(!run(html, |ctx| to_have_css_class(ctx, single)).unwrap().0);
        }

        #[test]
        fn test_matcher_entries_need_a_class() {
            let anything = ClassList::from(vec![Expected::anything()]);
            let (pass, message) = run("<div></div>", |ctx| to_have_css_class(ctx, anything)).unwrap();
            assert!(!pass);
            assert!(message.ends_with("[NOT] to have css class [ <jasmine.anything> ]"));

            let containing = ClassList::from(vec![Expected::string_containing("tiv")]);
            let html = r#"<div class="active"></div>"#;
            assert!(run(html, |ctx| to_have_css_class(ctx, containing)).unwrap().0);
        }

        #[test]
        fn test_null_entry_is_never_present() {
            let null = ClassList::from(vec![Expected::from(json!(null))]);
            assert!(!run("<div></div>", |ctx| to_have_css_class(ctx, null)).unwrap().0);
            let mixed = ClassList::from(vec![Expected::from("foo"), Expected::from(json!(null))]);
            let html = r#"<div class="foo null"></div>"#;
            assert!(!run(html, |ctx| to_have_css_class(ctx, mixed)).unwrap().0);
        }
    }
}
