//! Identity, content and form value matchers.

use serde_json::Value;

use super::{ensure_has_property, MatchResult, MatcherContext};
use crate::compare::{match_or_equals, Expected};
use crate::content::{expected_html, expected_text, normalize_text, read_text};
use crate::result::DomResult;

/// The element has a non-empty id, equal to `id` when one is given
pub fn to_have_id<'a>(
    ctx: &MatcherContext<'a>,
    id: Option<Expected>,
) -> DomResult<MatchResult<'a>> {
    let node = ctx.resolve()?;
    let actual_id = node.id();
    let mut pass = !actual_id.is_empty();
    if let Some(expected) = &id {
        pass = pass && match_or_equals(&Value::String(actual_id.clone()), expected, ctx.equals);
    }
    let pp = ctx.pp;
    Ok(ctx.result(pass, move |actual| match &id {
        Some(expected) => format!(
            "Expect {actual} [NOT] to have id {} but was {}",
            pp.pp_expected(expected),
            pp.pp(&Value::String(actual_id.clone()))
        ),
        None => format!("Expect {actual} [NOT] to have id"),
    }))
}

/// Trimmed text content matches `text`
pub fn to_have_text<'a>(ctx: &MatcherContext<'a>, text: Expected) -> DomResult<MatchResult<'a>> {
    let node = ctx.resolve()?;
    let actual_text = Value::String(normalize_text(&read_text(&node)));
    let expected = expected_text(&text);
    let pass = match_or_equals(&actual_text, &expected, ctx.equals);
    let pp = ctx.pp;
    Ok(ctx.result(pass, move |actual| {
        format!(
            "Expect {actual} [NOT] to have text {} but was {}",
            pp.pp_expected(&expected),
            pp.pp(&actual_text)
        )
    }))
}

/// `innerHTML` matches `html` after both sides are normalized
pub fn to_have_html<'a>(ctx: &MatcherContext<'a>, html: Expected) -> DomResult<MatchResult<'a>> {
    let node = ctx.resolve()?;
    let actual_html = Value::String(node.inner_html());
    let expected = expected_html(&html)?;
    let pass = match_or_equals(&actual_html, &expected, ctx.equals);
    let pp = ctx.pp;
    Ok(ctx.result(pass, move |actual| {
        format!(
            "Expect {actual} [NOT] to have HTML {} but was {}",
            pp.pp_expected(&html),
            pp.pp(&actual_html)
        )
    }))
}

/// The element's `value` property matches `value`
pub fn to_have_value<'a>(ctx: &MatcherContext<'a>, value: Expected) -> DomResult<MatchResult<'a>> {
    let node = ctx.resolve()?;
    ensure_has_property(&node, "toHaveValue", "value")?;
    let actual_value = node.get_property("value").unwrap_or(Value::Null);
    let pass = match_or_equals(&actual_value, &value, ctx.equals);
    let pp = ctx.pp;
    Ok(ctx.result(pass, move |actual| {
        format!(
            "Expect {actual} [NOT] to have value {} but was {}",
            pp.pp_expected(&value),
            pp.pp(&actual_value)
        )
    }))
}

/// The element's `selectedIndex` property matches `index`
pub fn to_have_selected_index<'a>(
    ctx: &MatcherContext<'a>,
    index: Expected,
) -> DomResult<MatchResult<'a>> {
    let node = ctx.resolve()?;
    ensure_has_property(&node, "toHaveSelectedIndex", "selectedIndex")?;
    let actual_index = node.get_property("selectedIndex").unwrap_or(Value::Null);
    let pass = match_or_equals(&actual_index, &index, ctx.equals);
    let pp = ctx.pp;
    Ok(ctx.result(pass, move |actual| {
        format!(
            "Expect {actual} [NOT] to have selectedIndex {} but was {}",
            pp.pp_expected(&index),
            pp.pp(&actual_index)
        )
    }))
}

/// Case-insensitive tag name match
pub fn to_have_tag_name<'a>(
    ctx: &MatcherContext<'a>,
    tag_name: Expected,
) -> DomResult<MatchResult<'a>> {
    let node = ctx.resolve()?;
    let actual_tag = node.tag_name().unwrap_or_default();
    let lowered = match &tag_name {
        Expected::Value(Value::String(name)) => Expected::from(name.to_lowercase()),
        other => other.clone(),
    };
    let pass = match_or_equals(
        &Value::String(actual_tag.to_lowercase()),
        &lowered,
        ctx.equals,
    );
    let pp = ctx.pp;
    Ok(ctx.result(pass, move |actual| {
        format!(
            "Expect {actual} [NOT] to have tag name {} but was {}",
            pp.pp_expected(&tag_name),
            pp.pp(&Value::String(actual_tag.clone()))
        )
    }))
}
