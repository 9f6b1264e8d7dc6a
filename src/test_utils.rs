// SPDX-License-Identifier: AGPL-3.0-or-later

//! In-memory form elements for exercising the controller without a browser.
//!
//! All fakes are cheap handles onto shared state, clones observe the same element just like two
//! references to one DOM node do.
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use crate::config::ARGUMENT_NAME;
use crate::field::{ChoiceField, Field, Section, SubmitControl};

#[derive(Clone, Debug, Default)]
struct FieldState {
    value: String,
    name: String,
    required: bool,
    disabled: bool,
    hidden: bool,
    options: Vec<String>,
}

#[derive(Clone, Debug, Default)]
struct Control(Rc<RefCell<FieldState>>);

impl Control {
    fn named(name: &str) -> Self {
        Self(Rc::new(RefCell::new(FieldState {
            name: name.to_owned(),
            ..FieldState::default()
        })))
    }

    fn state(&self) -> Ref<'_, FieldState> {
        self.0.borrow()
    }

    fn state_mut(&self) -> RefMut<'_, FieldState> {
        self.0.borrow_mut()
    }
}

fn set_text_value(state: &mut FieldState, value: &str) {
    state.value = value.to_owned();
}

// Browsers clear the selection when a select is set to a value none of its options carries.
fn set_select_value(state: &mut FieldState, value: &str) {
    state.value = if state.options.iter().any(|option| option == value) {
        value.to_owned()
    } else {
        String::new()
    };
}

macro_rules! impl_field {
    ($type:ty, $set_value:path) => {
        impl $type {
            pub fn is_required(&self) -> bool {
                self.0.state().required
            }

            pub fn is_visible(&self) -> bool {
                !self.0.state().hidden
            }

            /// True if the browser would submit this control's value as the argument.
            pub fn submits_argument(&self) -> bool {
                let state = self.0.state();
                !state.disabled && state.name == ARGUMENT_NAME
            }
        }

        impl Field for $type {
            fn value(&self) -> String {
                self.0.state().value.clone()
            }

            fn set_value(&self, value: &str) {
                $set_value(&mut self.0.state_mut(), value);
            }

            fn name(&self) -> String {
                self.0.state().name.clone()
            }

            fn set_name(&self, name: &str) {
                self.0.state_mut().name = name.to_owned();
            }

            fn set_required(&self, required: bool) {
                self.0.state_mut().required = required;
            }

            fn is_disabled(&self) -> bool {
                self.0.state().disabled
            }

            fn set_disabled(&self, disabled: bool) {
                self.0.state_mut().disabled = disabled;
            }

            fn set_visible(&self, visible: bool) {
                self.0.state_mut().hidden = !visible;
            }
        }
    };
}

/// Fake `<input>` or `<textarea>` element.
#[derive(Clone, Debug, Default)]
pub struct FakeField(Control);

impl FakeField {
    pub fn named(name: &str) -> Self {
        Self(Control::named(name))
    }
}

impl_field!(FakeField, set_text_value);

/// Fake `<select>` element.
///
/// Like a browser, the value follows the options: it can only be set to an offered value and the
/// first appended option becomes the selection.
#[derive(Clone, Debug, Default)]
pub struct FakeSelect(Control);

impl FakeSelect {
    pub fn named(name: &str) -> Self {
        Self(Control::named(name))
    }

    pub fn with_options(name: &str, options: &[&str]) -> Self {
        let select = Self::named(name);
        for option in options {
            select.append_option(option);
        }
        select
    }
}

impl_field!(FakeSelect, set_select_value);

impl ChoiceField for FakeSelect {
    fn options(&self) -> Vec<String> {
        self.0.state().options.clone()
    }

    fn clear_options(&self) {
        let mut state = self.0.state_mut();
        state.options.clear();
        state.value.clear();
    }

    fn append_option(&self, value: &str) {
        let mut state = self.0.state_mut();
        if state.options.is_empty() {
            state.value = value.to_owned();
        }
        state.options.push(value.to_owned());
    }
}

/// Fake container element.
#[derive(Clone, Debug, Default)]
pub struct FakeSection(Rc<RefCell<bool>>);

impl FakeSection {
    pub fn is_visible(&self) -> bool {
        !*self.0.borrow()
    }
}

impl Section for FakeSection {
    fn set_visible(&self, visible: bool) {
        *self.0.borrow_mut() = !visible;
    }
}

#[derive(Clone, Debug, Default)]
struct ButtonState {
    disabled: bool,
    classes: Vec<String>,
}

/// Fake submit button.
#[derive(Clone, Debug, Default)]
pub struct FakeButton(Rc<RefCell<ButtonState>>);

impl FakeButton {
    pub fn is_disabled(&self) -> bool {
        self.0.borrow().disabled
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|name| name == class)
    }

    pub fn class_count(&self) -> usize {
        self.0.borrow().classes.len()
    }
}

impl SubmitControl for FakeButton {
    fn set_disabled(&self, disabled: bool) {
        self.0.borrow_mut().disabled = disabled;
    }

    fn add_class(&self, class: &str) {
        let mut state = self.0.borrow_mut();
        if !state.classes.iter().any(|name| name == class) {
            state.classes.push(class.to_owned());
        }
    }
}
