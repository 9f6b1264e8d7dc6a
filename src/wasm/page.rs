// SPDX-License-Identifier: AGPL-3.0-or-later

use tracing::debug;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::JsValue;
use web_sys::Element;

use crate::wasm::dom::query_all;
use crate::wasm::error::{describe, jserr};
use crate::wasm::form::{
    PermissionRequestForm, SingleSubmitForm, BOUND_ATTRIBUTE, SINGLE_SUBMIT_ATTRIBUTE,
    SINGLE_SUBMIT_BOUND_ATTRIBUTE, TABLE_ATTRIBUTE,
};
use crate::widget;

/// Forms of one page, bound by [`init_page`].
#[wasm_bindgen]
#[derive(Debug)]
pub struct Page {
    forms: Vec<PermissionRequestForm>,
    single_submit: Vec<SingleSubmitForm>,
}

#[wasm_bindgen]
impl Page {
    /// Number of bound permission request forms.
    #[wasm_bindgen(getter, js_name = formCount)]
    pub fn form_count(&self) -> usize {
        self.forms.len()
    }

    /// Number of forms guarded against repeated submission.
    #[wasm_bindgen(getter, js_name = singleSubmitCount)]
    pub fn single_submit_count(&self) -> usize {
        self.single_submit.len()
    }
}

fn document_root() -> Result<Element, &'static str> {
    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.document_element())
        .ok_or("no document available")
}

/// Selector for elements carrying `attribute` which were not bound yet.
fn unbound(attribute: &str, marker: &str) -> String {
    format!("[{attribute}]:not([{marker}])")
}

/// Installs the browser console logger. Calling it again has no effect.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    let _ = tracing_wasm::try_set_as_global_default();
}

/// Binds every permission request form and every single-submit form of the document.
///
/// Each form is bound independently, a form which fails to bind is logged and skipped. Forms
/// bound already, by an earlier call or by `attach`, are left alone.
#[wasm_bindgen(js_name = initPage)]
pub fn init_page() -> Result<Page, JsValue> {
    init_logging();

    let root = jserr!(document_root());

    let forms = query_all(&root, &unbound(TABLE_ATTRIBUTE, BOUND_ATTRIBUTE))?
        .iter()
        .filter_map(|element| {
            widget::guarded("permission request form", || {
                PermissionRequestForm::bind(element)
            })
        })
        .collect::<Vec<_>>();

    let single_submit = query_all(
        &root,
        &unbound(SINGLE_SUBMIT_ATTRIBUTE, SINGLE_SUBMIT_BOUND_ATTRIBUTE),
    )?
        .iter()
        .filter_map(|element| {
            widget::guarded("single submit form", || SingleSubmitForm::bind(element))
        })
        .collect::<Vec<_>>();

    debug!(
        forms = forms.len(),
        single_submit = single_submit.len(),
        "initialised page"
    );

    Ok(Page {
        forms,
        single_submit,
    })
}

/// Runs the initialisation callback of a third-party widget, returns false if it threw.
///
/// The exception is logged and not rethrown so the remaining widgets of the page still get
/// initialised.
#[wasm_bindgen(js_name = initWidget)]
pub fn init_widget(name: &str, init: &js_sys::Function) -> bool {
    widget::guarded(name, || init.call0(&JsValue::NULL).map_err(|err| describe(&err))).is_some()
}
