//! Form-control state: checkedness, selectedness and dirty values.
//!
//! Content attributes (`checked`, `selected`, `value`) provide defaults;
//! setting the corresponding property makes the state "dirty" and detaches
//! it from the attribute, as browsers do.

use super::Node;

#[derive(Debug, Clone, Default)]
pub(crate) struct FormState {
    checked: Option<bool>,
    indeterminate: bool,
    selected: Option<bool>,
    value: Option<String>,
}

impl Node {
    fn with_form<R>(&self, f: impl FnOnce(&mut FormState) -> R) -> Option<R> {
        self.element_data().map(|data| f(&mut data.form.borrow_mut()))
    }

    fn read_form<R>(&self, f: impl FnOnce(&FormState) -> R) -> Option<R> {
        self.element_data().map(|data| f(&data.form.borrow()))
    }

    /// `checked` state of an `<input>`
    #[must_use]
    pub fn checked(&self) -> bool {
        self.read_form(|state| state.checked)
            .flatten()
            .unwrap_or_else(|| self.has_attribute("checked"))
    }

    /// Set the `checked` state
    pub fn set_checked(&self, checked: bool) {
        self.with_form(|state| state.checked = Some(checked));
    }

    /// `indeterminate` state of an `<input>`
    #[must_use]
    pub fn indeterminate(&self) -> bool {
        self.read_form(|state| state.indeterminate).unwrap_or(false)
    }

    /// Set the `indeterminate` state
    pub fn set_indeterminate(&self, indeterminate: bool) {
        self.with_form(|state| state.indeterminate = indeterminate);
    }

    /// `disabled` (reflects the attribute)
    #[must_use]
    pub fn disabled(&self) -> bool {
        self.has_attribute("disabled")
    }

    /// Set `disabled`
    pub fn set_disabled(&self, disabled: bool) {
        self.toggle_attribute("disabled", disabled);
    }

    /// `required` (reflects the attribute)
    #[must_use]
    pub fn required(&self) -> bool {
        self.has_attribute("required")
    }

    /// Set `required`
    pub fn set_required(&self, required: bool) {
        self.toggle_attribute("required", required);
    }

    /// `readOnly` (reflects the `readonly` attribute)
    #[must_use]
    pub fn read_only(&self) -> bool {
        self.has_attribute("readonly")
    }

    /// Set `readOnly`
    pub fn set_read_only(&self, read_only: bool) {
        self.toggle_attribute("readonly", read_only);
    }

    /// `multiple` (reflects the attribute)
    #[must_use]
    pub fn multiple(&self) -> bool {
        self.has_attribute("multiple")
    }

    // ------------------------------------------------------------------
    // Values
    // ------------------------------------------------------------------

    /// `value` of a form control
    ///
    /// - `<input>`: dirty value, else the `value` attribute, else `""`
    /// - `<textarea>`: dirty value, else its text
    /// - `<select>`: value of the first selected option, else `""`
    /// - `<option>`: `value` attribute, else its collapsed text
    /// - other elements: the `value` attribute, else `""`
    #[must_use]
    pub fn value(&self) -> String {
        let dirty = self.read_form(|state| state.value.clone()).flatten();
        match self.local_name().as_deref() {
            Some("input") => dirty
                .or_else(|| self.get_attribute("value"))
                .unwrap_or_default(),
            Some("textarea") => dirty
                .or_else(|| self.text_content())
                .unwrap_or_default(),
            Some("select") => self
                .options()
                .into_iter()
                .find(Node::selected)
                .map(|option| option.value())
                .unwrap_or_default(),
            Some("option") => self.get_attribute("value").unwrap_or_else(|| {
                self.text_content()
                    .unwrap_or_default()
                    .split_ascii_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
            }),
            _ => self.get_attribute("value").unwrap_or_default(),
        }
    }

    /// Set `value`; on a `<select>` this selects the first option with
    /// that value (or none).
    pub fn set_value(&self, value: &str) {
        match self.local_name().as_deref() {
            Some("select") => {
                let index = self
                    .options()
                    .iter()
                    .position(|option| option.value() == value)
                    .map_or(-1, |index| index as i64);
                self.set_selected_index(index);
            }
            Some("input" | "textarea") => {
                self.with_form(|state| state.value = Some(value.to_string()));
            }
            _ => self.set_attribute("value", value),
        }
    }

    /// `defaultValue`: the `value` attribute (text for `<textarea>`)
    #[must_use]
    pub fn default_value(&self) -> String {
        if self.has_local_name(&["textarea"]) {
            return self.text_content().unwrap_or_default();
        }
        self.get_attribute("value").unwrap_or_default()
    }

    // ------------------------------------------------------------------
    // Selects and options
    // ------------------------------------------------------------------

    /// `<option>` descendants of a `<select>` (directly or through `<optgroup>`)
    #[must_use]
    pub fn options(&self) -> Vec<Self> {
        if !self.has_local_name(&["select"]) {
            return Vec::new();
        }
        let mut options = Vec::new();
        for child in self.children() {
            if child.has_local_name(&["option"]) {
                options.push(child);
            } else if child.has_local_name(&["optgroup"]) {
                options.extend(
                    child
                        .children()
                        .into_iter()
                        .filter(|node| node.has_local_name(&["option"])),
                );
            }
        }
        options
    }

    fn owning_select(&self) -> Option<Self> {
        let parent = self.parent_node()?;
        if parent.has_local_name(&["select"]) {
            return Some(parent);
        }
        if parent.has_local_name(&["optgroup"]) {
            return parent
                .parent_node()
                .filter(|grand| grand.has_local_name(&["select"]));
        }
        None
    }

    fn explicitly_selected(&self) -> bool {
        self.read_form(|state| state.selected)
            .flatten()
            .unwrap_or_else(|| self.has_attribute("selected"))
    }

    /// `selectedIndex` of a `<select>`, `-1` when nothing is selected
    ///
    /// A single-choice select with no explicit selection selects its first
    /// enabled option; the last explicitly selected option wins otherwise.
    /// Once options were deselected through properties, nothing is selected.
    #[must_use]
    pub fn selected_index(&self) -> i64 {
        let options = self.options();
        if self.multiple() {
            return options
                .iter()
                .position(Node::explicitly_selected)
                .map_or(-1, |index| index as i64);
        }
        if let Some(index) = options.iter().rposition(Node::explicitly_selected) {
            return index as i64;
        }
        let deselected = options
            .iter()
            .any(|option| option.read_form(|state| state.selected.is_some()) == Some(true));
        if deselected {
            return -1;
        }
        options
            .iter()
            .position(|option| !option.disabled())
            .map_or(-1, |index| index as i64)
    }

    /// Select the option at `index` (any out-of-range index clears the selection)
    pub fn set_selected_index(&self, index: i64) {
        for (position, option) in self.options().iter().enumerate() {
            let selected = position as i64 == index;
            option.with_form(|state| state.selected = Some(selected));
        }
    }

    /// `selected` state of an `<option>`
    #[must_use]
    pub fn selected(&self) -> bool {
        match self.owning_select() {
            Some(select) if !select.multiple() => {
                let index = select.selected_index();
                index >= 0
                    && select
                        .options()
                        .get(index as usize)
                        .is_some_and(|option| option.ptr_eq(self))
            }
            _ => self.explicitly_selected(),
        }
    }

    /// Set the `selected` state; in a single-choice select this deselects
    /// the other options.
    pub fn set_selected(&self, selected: bool) {
        if selected {
            if let Some(select) = self.owning_select().filter(|select| !select.multiple()) {
                for option in select.options() {
                    option.with_form(|state| state.selected = Some(false));
                }
            }
        }
        self.with_form(|state| state.selected = Some(selected));
    }

    /// `index` of an `<option>` within its select (`0` when detached)
    #[must_use]
    pub fn option_index(&self) -> i64 {
        self.owning_select()
            .and_then(|select| select.options().iter().position(|option| option.ptr_eq(self)))
            .map_or(0, |index| index as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::super::Document;
    use super::*;

    fn select_with(html: &str) -> Node {
        let doc = Document::new();
        let select = doc.create_element("select");
        select.set_inner_html(html).unwrap();
        select
    }

    mod checked_tests {
        use super::*;

        #[test]
        fn test_checked_defaults_to_attribute() {
            let input = Node::orphan_element("input");
            assert!(!input.checked());
            input.set_attribute("checked", "");
            assert!(input.checked());
        }

        #[test]
        fn test_dirty_checked_ignores_attribute() {
            let input = Node::orphan_element("input");
            input.set_attribute("checked", "");
            input.set_checked(false);
            assert!(!input.checked());
        }

        #[test]
        fn test_boolean_reflection() {
            let input = Node::orphan_element("input");
            input.set_disabled(true);
            input.set_required(true);
            input.set_read_only(true);
            assert!(input.disabled() && input.required() && input.read_only());
            assert_eq!(
                input.outer_html(),
                r#"<input disabled="" required="" readonly="">"#
            );
            input.set_disabled(false);
            assert!(!input.has_attribute("disabled"));
        }
    }

    mod value_tests {
        use super::*;

        #[test]
        fn test_input_value() {
            let input = Node::orphan_element("input");
            input.set_attribute("value", "initial");
            assert_eq!(input.value(), "initial");
            input.set_value("typed");
            assert_eq!(input.value(), "typed");
            assert_eq!(input.default_value(), "initial");
        }

        #[test]
        fn test_textarea_value_from_text() {
            let textarea = Node::orphan_element("textarea");
            textarea.set_text_content("hello");
            assert_eq!(textarea.value(), "hello");
        }

        #[test]
        fn test_option_value_falls_back_to_text() {
            let select = select_with("<option>  One   Two </option>");
            assert_eq!(select.options()[0].value(), "One Two");
        }

        #[test]
        fn test_select_value() {
            let select = select_with(r#"<option value="a">A</option><option value="b">B</option>"#);
            assert_eq!(select.value(), "a");
            select.set_value("b");
            assert_eq!(select.value(), "b");
            assert_eq!(select.selected_index(), 1);
        }
    }

    mod selection_tests {
        use super::*;

        #[test]
        fn test_single_select_defaults_to_first() {
            let select = select_with("<option>a</option><option>b</option>");
            assert_eq!(select.selected_index(), 0);
            assert!(select.options()[0].selected());
        }

        #[test]
        fn test_selected_attribute_wins() {
            let select = select_with("<option>a</option><option selected>b</option>");
            assert_eq!(select.selected_index(), 1);
            assert!(!select.options()[0].selected());
        }

        #[test]
        fn test_set_selected_index() {
            let select = select_with("<option>a</option><option>b</option>");
            select.set_selected_index(1);
            assert_eq!(select.selected_index(), 1);
            assert!(select.options()[1].selected());
            select.set_selected_index(-1);
            assert_eq!(select.selected_index(), -1);
            assert!(!select.options()[0].selected());
        }

        #[test]
        fn test_optgroup_options() {
            let select = select_with(
                "<optgroup><option>a</option></optgroup><option>b</option>",
            );
            assert_eq!(select.options().len(), 2);
            assert_eq!(select.options()[1].option_index(), 1);
        }

        #[test]
        fn test_multiple_select_has_no_default() {
            let select = select_with("<option>a</option><option>b</option>");
            select.set_attribute("multiple", "");
            assert_eq!(select.selected_index(), -1);
            select.options()[1].set_selected(true);
            assert_eq!(select.selected_index(), 1);
        }

        #[test]
        fn test_empty_select() {
            let select = select_with("");
            assert_eq!(select.selected_index(), -1);
            assert_eq!(select.value(), "");
        }
    }
}
