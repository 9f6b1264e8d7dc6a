// SPDX-License-Identifier: AGPL-3.0-or-later


use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, EventInit, HtmlElement, HtmlInputElement, HtmlSelectElement};

pub const TABLE: &str = r#"{"edit": ["*"], "view": ["prod", "staging"], "deploy": ["prod"]}"#;

/// Appends a `<form>` with the given attributes and inner HTML to the document body.
pub fn mount(attributes: &[(&str, &str)], inner_html: &str) -> Element {
    let document = web_sys::window().unwrap().document().unwrap();
    let form = document.create_element("form").unwrap();

    for (name, value) in attributes {
        form.set_attribute(name, value).unwrap();
    }
    form.set_inner_html(inner_html);

    document.body().unwrap().append_child(&form).unwrap();
    form
}

pub fn find<T: JsCast>(root: &Element, selector: &str) -> T {
    root.query_selector(selector)
        .unwrap()
        .unwrap()
        .dyn_into::<T>()
        .unwrap()
}

pub fn input(root: &Element, selector: &str) -> HtmlInputElement {
    find(root, selector)
}

pub fn select(root: &Element, selector: &str) -> HtmlSelectElement {
    find(root, selector)
}

pub fn is_hidden(root: &Element, selector: &str) -> bool {
    let element: HtmlElement = find(root, selector);
    element.style().get_property_value("display").unwrap() == "none"
}

pub fn options(select: &HtmlSelectElement) -> Vec<String> {
    (0..select.length())
        .filter_map(|index| select.item(index))
        .map(|option| option.get_attribute("value").unwrap_or_default())
        .collect()
}

/// Dispatches a cancelable event, returns false if a listener cancelled it.
pub fn dispatch(target: &Element, event_type: &str) -> bool {
    let init = EventInit::new();
    init.set_cancelable(true);
    let event = Event::new_with_event_init_dict(event_type, &init).unwrap();
    target.dispatch_event(&event).unwrap()
}

/// Selects a value in a dropdown the way a user does.
pub fn choose(select: &HtmlSelectElement, value: &str) {
    select.set_value(value);
    dispatch(select, "change");
}

pub fn property(object: &JsValue, key: &str) -> JsValue {
    js_sys::Reflect::get(object, &JsValue::from_str(key)).unwrap()
}
