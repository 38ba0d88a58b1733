//! Boolean and identity state matchers.

use serde_json::Value;

use super::{ensure_has_property, MatchResult, MatcherContext};
use crate::compare::Expected;
use crate::dom::style::resolve_style;
use crate::result::DomResult;

fn boolean_property<'a>(
    ctx: &MatcherContext<'a>,
    matcher: &'static str,
    property: &'static str,
    description: &'static str,
) -> DomResult<MatchResult<'a>> {
    let node = ctx.resolve()?;
    ensure_has_property(&node, matcher, property)?;
    let pass = node.get_property(property) == Some(Value::Bool(true));
    Ok(ctx.result(pass, move |actual| {
        format!("Expect {actual} [NOT] to be {description}")
    }))
}

/// The element's `checked` property is `true`
pub fn to_be_checked<'a>(ctx: &MatcherContext<'a>) -> DomResult<MatchResult<'a>> {
    boolean_property(ctx, "toBeChecked", "checked", "checked")
}

/// The element's `disabled` property is `true`
pub fn to_be_disabled<'a>(ctx: &MatcherContext<'a>) -> DomResult<MatchResult<'a>> {
    boolean_property(ctx, "toBeDisabled", "disabled", "disabled")
}

/// The element's `selected` property is `true`
pub fn to_be_selected<'a>(ctx: &MatcherContext<'a>) -> DomResult<MatchResult<'a>> {
    boolean_property(ctx, "toBeSelected", "selected", "selected")
}

/// The element's `required` property is `true`
pub fn to_be_required<'a>(ctx: &MatcherContext<'a>) -> DomResult<MatchResult<'a>> {
    boolean_property(ctx, "toBeRequired", "required", "required")
}

/// The element's `indeterminate` property is `true`
pub fn to_be_indeterminate<'a>(ctx: &MatcherContext<'a>) -> DomResult<MatchResult<'a>> {
    boolean_property(ctx, "toBeIndeterminate", "indeterminate", "indeterminate")
}

/// The element's `readOnly` property is `true`
pub fn to_be_read_only<'a>(ctx: &MatcherContext<'a>) -> DomResult<MatchResult<'a>> {
    boolean_property(ctx, "toBeReadOnly", "readOnly", "read-only")
}

/// The element is its document's active element
pub fn to_be_focused<'a>(ctx: &MatcherContext<'a>) -> DomResult<MatchResult<'a>> {
    let node = ctx.resolve()?;
    let pass = node
        .owner_document()
        .and_then(|document| document.active_element())
        .is_some_and(|active| active.ptr_eq(&node));
    Ok(ctx.result(pass, |actual| format!("Expect {actual} [NOT] to be focused")))
}

/// The element's effective `display` is not `none`
pub fn to_be_displayed<'a>(ctx: &MatcherContext<'a>) -> DomResult<MatchResult<'a>> {
    let node = ctx.resolve()?;
    let display = resolve_style(&node).get("display").to_string();
    let pass = !ctx
        .equals
        .equals(&Value::String(display), &Expected::from("none"));
    Ok(ctx.result(pass, |actual| format!("Expect {actual} [NOT] to be displayed")))
}

/// Walking up `parentNode` never reaches a document or its `<body>`
pub fn to_be_detached_element<'a>(ctx: &MatcherContext<'a>) -> DomResult<MatchResult<'a>> {
    let node = ctx.resolve()?;
    let body = node.owner_document().and_then(|document| document.body());
    let mut pass = true;
    let mut cursor = Some(node);
    while let Some(current) = cursor {
        if current.is_document() || body.as_ref().is_some_and(|body| body.ptr_eq(&current)) {
            pass = false;
            break;
        }
        cursor = current.parent_node();
    }
    Ok(ctx.result(pass, |actual| {
        format!("Expect {actual} [NOT] to be detached element")
    }))
}
