//! Script-level property access (`node[name]`).
//!
//! Known IDL properties are computed from attributes and form state, and
//! only exist on the elements that define them (`checked` on `<input>`,
//! `selectedIndex` on `<select>`, ...). Any other name reads and writes an
//! expando property stored on the node.

use serde_json::{json, Value};

use super::Node;
use crate::predicates::is_truthy;
use crate::result::{DomError, DomResult};

const CHECKABLE: &[&str] = &["input"];
const DISABLEABLE: &[&str] = &[
    "button", "fieldset", "input", "optgroup", "option", "select", "textarea",
];
const REQUIRABLE: &[&str] = &["input", "select", "textarea"];
const READ_ONLY_CAPABLE: &[&str] = &["input", "textarea"];
const VALUED: &[&str] = &[
    "button", "data", "input", "meter", "option", "output", "param", "progress", "select",
    "textarea",
];
const NAMED: &[&str] = &[
    "button", "fieldset", "form", "iframe", "input", "map", "meta", "object", "output", "select",
    "slot", "textarea",
];
const LINKS: &[&str] = &["a", "area", "base", "link"];
const SOURCED: &[&str] = &[
    "audio", "embed", "iframe", "img", "input", "script", "source", "track", "video",
];
const PLACEHOLDER: &[&str] = &["input", "textarea"];

/// Properties that cannot be assigned
const READ_ONLY_PROPERTIES: &[&str] = &[
    "tagName",
    "nodeName",
    "localName",
    "nodeType",
    "outerHTML",
    "isConnected",
    "childElementCount",
    "options",
    "index",
];

impl Node {
    /// Read a property by its script name; `None` when the node has no such
    /// property (the `in` operator would be false).
    #[must_use]
    pub fn get_property(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.known_property(name) {
            return Some(value);
        }
        self.element_data()
            .and_then(|data| data.expandos.borrow().get(name).cloned())
    }

    /// Whether `name in node` would be true
    #[must_use]
    pub fn has_property(&self, name: &str) -> bool {
        self.get_property(name).is_some()
    }

    fn known_property(&self, name: &str) -> Option<Value> {
        let tag = self.local_name()?;
        let is = |set: &[&str]| set.contains(&tag.as_str());
        let value = match name {
            "id" => json!(self.id()),
            "className" => json!(self.class_name()),
            "tagName" | "nodeName" => json!(self.node_name()),
            "localName" => json!(tag),
            "nodeType" => json!(self.node_type() as u8),
            "textContent" => json!(self.text_content()),
            "innerText" => json!(self.inner_text()),
            "innerHTML" => json!(self.inner_html()),
            "outerHTML" => json!(self.outer_html()),
            "title" | "lang" | "dir" => json!(self.get_attribute(name).unwrap_or_default()),
            "hidden" => json!(self.has_attribute("hidden")),
            "isConnected" => json!(self.is_connected()),
            "childElementCount" => json!(self.children().len()),
            "checked" if is(CHECKABLE) => json!(self.checked()),
            "defaultChecked" if is(CHECKABLE) => json!(self.has_attribute("checked")),
            "indeterminate" if is(CHECKABLE) => json!(self.indeterminate()),
            "type" if tag == "input" => json!(self
                .get_attribute("type")
                .map_or_else(|| "text".to_string(), |kind| kind.to_ascii_lowercase())),
            "type" if tag == "button" => json!(self
                .get_attribute("type")
                .map_or_else(|| "submit".to_string(), |kind| kind.to_ascii_lowercase())),
            "type" if tag == "select" => json!(if self.multiple() {
                "select-multiple"
            } else {
                "select-one"
            }),
            "disabled" if is(DISABLEABLE) => json!(self.disabled()),
            "required" if is(REQUIRABLE) => json!(self.required()),
            "readOnly" if is(READ_ONLY_CAPABLE) => json!(self.read_only()),
            "value" if is(VALUED) => json!(self.value()),
            "defaultValue" if is(&["input", "textarea"]) => json!(self.default_value()),
            "name" if is(NAMED) => json!(self.get_attribute("name").unwrap_or_default()),
            "placeholder" if is(PLACEHOLDER) => {
                json!(self.get_attribute("placeholder").unwrap_or_default())
            }
            "href" if is(LINKS) => json!(self.get_attribute("href").unwrap_or_default()),
            "src" if is(SOURCED) => json!(self.get_attribute("src").unwrap_or_default()),
            "selected" if tag == "option" => json!(self.selected()),
            "defaultSelected" if tag == "option" => json!(self.has_attribute("selected")),
            "index" if tag == "option" => json!(self.option_index()),
            "selectedIndex" if tag == "select" => json!(self.selected_index()),
            "multiple" if tag == "select" => json!(self.multiple()),
            "length" if tag == "select" => json!(self.options().len()),
            "options" if tag == "select" => Value::Array(
                self.options()
                    .iter()
                    .map(|option| json!(option.outer_html()))
                    .collect(),
            ),
            _ => return None,
        };
        Some(value)
    }

    /// Assign a property by its script name.
    ///
    /// Known properties go through their setters with script coercions
    /// (truthiness for booleans, string conversion for strings); unknown
    /// names are stored as expandos.
    pub fn set_property(&self, name: &str, value: impl Into<Value>) -> DomResult<()> {
        let value = value.into();
        if !self.is_element() {
            return Err(DomError::HierarchyRequest {
                message: format!("cannot set property `{name}` on {}", self.node_name()),
            });
        }
        if self.known_property(name).is_some() {
            if READ_ONLY_PROPERTIES.contains(&name) {
                return Err(DomError::ReadOnlyProperty {
                    property: name.to_string(),
                });
            }
            self.assign_known(name, &value);
            return Ok(());
        }
        if let Some(data) = self.element_data() {
            data.expandos.borrow_mut().insert(name.to_string(), value);
        }
        Ok(())
    }

    fn assign_known(&self, name: &str, value: &Value) {
        let text = || crate::compare::string_form(value).unwrap_or_default();
        match name {
            "id" => self.set_id(&text()),
            "className" => self.set_class_name(&text()),
            "textContent" | "innerText" => self.set_text_content(&text()),
            "innerHTML" => {
                if let Err(err) = self.set_inner_html(&text()) {
                    tracing::debug!(error = %err, "innerHTML assignment ignored");
                }
            }
            "hidden" => self.toggle_attribute("hidden", is_truthy(value)),
            "checked" => self.set_checked(is_truthy(value)),
            "defaultChecked" => self.toggle_attribute("checked", is_truthy(value)),
            "indeterminate" => self.set_indeterminate(is_truthy(value)),
            "disabled" => self.set_disabled(is_truthy(value)),
            "required" => self.set_required(is_truthy(value)),
            "readOnly" => self.set_read_only(is_truthy(value)),
            "multiple" => self.toggle_attribute("multiple", is_truthy(value)),
            "selected" => self.set_selected(is_truthy(value)),
            "defaultSelected" => self.toggle_attribute("selected", is_truthy(value)),
            "selectedIndex" => self.set_selected_index(value.as_f64().map_or(-1, |n| n as i64)),
            "value" => self.set_value(&text()),
            "defaultValue" => self.set_attribute("value", &text()),
            "length" => {}
            other => self.set_attribute(&other.to_ascii_lowercase(), &text()),
        }
    }
}
