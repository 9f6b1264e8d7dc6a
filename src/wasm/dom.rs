// SPDX-License-Identifier: AGPL-3.0-or-later

//! Form capabilities implemented on top of `web-sys` elements.
use tracing::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Element, Event, EventTarget, HtmlButtonElement, HtmlElement, HtmlInputElement,
    HtmlOptionElement, HtmlSelectElement, HtmlTextAreaElement,
};

use crate::field::{ChoiceField, Field, Section, SubmitControl};

/// Shows or hides an element the way `jQuery.show()` and `jQuery.hide()` do.
fn set_displayed(element: &HtmlElement, visible: bool) {
    let style = element.style();
    let result = if visible {
        style.remove_property("display").map(|_| ())
    } else {
        style.set_property("display", "none")
    };

    if let Err(err) = result {
        warn!("failed changing visibility of element: {err:?}");
    }
}

/// Returns all elements below `root` matching the CSS selector, in document order.
pub fn query_all(root: &Element, selector: &str) -> Result<Vec<Element>, JsValue> {
    let nodes = root.query_selector_all(selector)?;

    Ok((0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Returns the first element below `root` matching the CSS selector.
pub fn query_one(root: &Element, selector: &str) -> Result<Option<Element>, JsValue> {
    root.query_selector(selector)
}

/// Text input, text area or select element.
#[derive(Clone, Debug)]
pub enum DomField {
    Input(HtmlInputElement),
    TextArea(HtmlTextAreaElement),
    Select(HtmlSelectElement),
}

macro_rules! each_control {
    ($field:expr, $element:ident => $body:expr) => {
        match $field {
            DomField::Input($element) => $body,
            DomField::TextArea($element) => $body,
            DomField::Select($element) => $body,
        }
    };
}

impl DomField {
    /// Wraps an element, `None` if it is no form control carrying a value.
    pub fn from_element(element: Element) -> Option<Self> {
        let element = match element.dyn_into::<HtmlInputElement>() {
            Ok(input) => return Some(Self::Input(input)),
            Err(element) => element,
        };

        let element = match element.dyn_into::<HtmlTextAreaElement>() {
            Ok(text_area) => return Some(Self::TextArea(text_area)),
            Err(element) => element,
        };

        element.dyn_into::<HtmlSelectElement>().ok().map(Self::Select)
    }

    pub fn html_element(&self) -> &HtmlElement {
        each_control!(self, element => element)
    }
}

impl Field for DomField {
    fn value(&self) -> String {
        each_control!(self, element => element.value())
    }

    fn set_value(&self, value: &str) {
        each_control!(self, element => element.set_value(value))
    }

    fn name(&self) -> String {
        each_control!(self, element => element.name())
    }

    fn set_name(&self, name: &str) {
        each_control!(self, element => element.set_name(name))
    }

    fn set_required(&self, required: bool) {
        each_control!(self, element => element.set_required(required))
    }

    fn is_disabled(&self) -> bool {
        each_control!(self, element => element.disabled())
    }

    fn set_disabled(&self, disabled: bool) {
        each_control!(self, element => element.set_disabled(disabled))
    }

    fn set_visible(&self, visible: bool) {
        set_displayed(self.html_element(), visible);
    }
}

/// A `<select>` element.
#[derive(Clone, Debug)]
pub struct DomSelect(pub HtmlSelectElement);

impl DomSelect {
    pub fn from_element(element: Element) -> Option<Self> {
        element.dyn_into::<HtmlSelectElement>().ok().map(Self)
    }
}

impl Field for DomSelect {
    fn value(&self) -> String {
        self.0.value()
    }

    fn set_value(&self, value: &str) {
        self.0.set_value(value);
    }

    fn name(&self) -> String {
        self.0.name()
    }

    fn set_name(&self, name: &str) {
        self.0.set_name(name);
    }

    fn set_required(&self, required: bool) {
        self.0.set_required(required);
    }

    fn is_disabled(&self) -> bool {
        self.0.disabled()
    }

    fn set_disabled(&self, disabled: bool) {
        self.0.set_disabled(disabled);
    }

    fn set_visible(&self, visible: bool) {
        set_displayed(&self.0, visible);
    }
}

impl ChoiceField for DomSelect {
    fn options(&self) -> Vec<String> {
        (0..self.0.length())
            .filter_map(|index| self.0.item(index))
            .filter_map(|element| element.dyn_into::<HtmlOptionElement>().ok())
            .map(|option| option.value())
            .collect()
    }

    fn clear_options(&self) {
        self.0.set_length(0);
    }

    fn append_option(&self, value: &str) {
        let result = HtmlOptionElement::new_with_text_and_value(value, value)
            .and_then(|option| self.0.add_with_html_option_element(&option));

        if let Err(err) = result {
            warn!(value, "failed adding option to dropdown: {err:?}");
        }
    }

    fn option_count(&self) -> usize {
        self.0.length() as usize
    }
}

/// Container shown or hidden as a unit, usually a Bootstrap form group.
#[derive(Clone, Debug)]
pub struct DomSection(pub HtmlElement);

impl DomSection {
    pub fn from_element(element: Element) -> Option<Self> {
        element.dyn_into::<HtmlElement>().ok().map(Self)
    }
}

impl Section for DomSection {
    fn set_visible(&self, visible: bool) {
        set_displayed(&self.0, visible);
    }
}

/// Submit `<button>` or `<input type="submit">`.
#[derive(Clone, Debug)]
pub struct DomSubmitControl(pub HtmlElement);

impl DomSubmitControl {
    pub fn from_element(element: Element) -> Option<Self> {
        element.dyn_into::<HtmlElement>().ok().map(Self)
    }
}

impl SubmitControl for DomSubmitControl {
    fn set_disabled(&self, disabled: bool) {
        if let Some(button) = self.0.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
        } else if let Some(input) = self.0.dyn_ref::<HtmlInputElement>() {
            input.set_disabled(disabled);
        } else if let Err(err) = self.0.toggle_attribute_with_force("disabled", disabled) {
            warn!("failed disabling submit control: {err:?}");
        }
    }

    fn add_class(&self, class: &str) {
        if let Err(err) = self.0.class_list().add_1(class) {
            warn!(class, "failed adding class to submit control: {err:?}");
        }
    }
}

/// Event listener which is removed again when dropped.
pub struct EventListener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    pub fn new<H>(target: &EventTarget, event: &'static str, handler: H) -> Result<Self, JsValue>
    where
        H: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;

        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

impl std::fmt::Debug for EventListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventListener")
            .field("event", &self.event)
            .finish()
    }
}
