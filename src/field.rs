// SPDX-License-Identifier: AGPL-3.0-or-later

//! Capabilities the controller needs from form elements.
//!
//! The controller is written against these traits only. The WebAssembly build implements them on
//! top of `web-sys` elements, tests use the in-memory fakes from `test_utils`.

/// A form control carrying a submittable value.
pub trait Field {
    /// Current value, empty string when nothing was entered or selected.
    fn value(&self) -> String;

    /// Overwrites the value without dispatching any events.
    fn set_value(&self, value: &str);

    /// Name the value is submitted under.
    fn name(&self) -> String;

    fn set_name(&self, name: &str);

    fn set_required(&self, required: bool);

    fn is_disabled(&self) -> bool;

    /// Disabled controls are left out of the form submission by the browser.
    fn set_disabled(&self, disabled: bool);

    fn set_visible(&self, visible: bool);
}

/// A form control offering a list of options, like a `<select>` element.
pub trait ChoiceField: Field {
    /// Values of all options in display order.
    fn options(&self) -> Vec<String>;

    /// Removes all options.
    fn clear_options(&self);

    /// Appends an option whose value and label are both `value`.
    fn append_option(&self, value: &str);

    fn option_count(&self) -> usize {
        self.options().len()
    }
}

/// A container which is shown or hidden as a unit.
pub trait Section {
    fn set_visible(&self, visible: bool);
}

/// The control a user clicks to submit a form.
pub trait SubmitControl {
    fn set_disabled(&self, disabled: bool);

    /// Adds a CSS class, used for the busy indicator.
    fn add_class(&self, class: &str);
}
