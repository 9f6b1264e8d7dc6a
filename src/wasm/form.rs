// SPDX-License-Identifier: AGPL-3.0-or-later

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlInputElement, HtmlSelectElement};

use crate::config::FormConfig;
use crate::controller::{FormController, FormElements};
use crate::field::Field;
use crate::guard::{SubmitDecision, SubmitGuard};
use crate::strategy;
use crate::table::PermissionArgumentTable;
use crate::wasm::dom::{
    query_all, query_one, DomField, DomSection, DomSelect, DomSubmitControl, EventListener,
};
use crate::wasm::error::{jserr, AttachError};
use crate::wasm::serde::serialize_to_js;

/// Attribute holding the permission argument table as JSON.
pub const TABLE_ATTRIBUTE: &str = "data-permission-request";

/// Attribute holding the optional form configuration as JSON.
pub const CONFIG_ATTRIBUTE: &str = "data-form-config";

/// Attribute selecting the argument strategy, overrides the configuration.
pub const STRATEGY_ATTRIBUTE: &str = "data-argument-strategy";

/// Attribute flagging forms which may only be submitted once.
pub const SINGLE_SUBMIT_ATTRIBUTE: &str = "data-single-submit";

/// Marks a form element with a bound permission request form.
pub const BOUND_ATTRIBUTE: &str = "data-permission-request-bound";

/// Marks a form element with a bound submission guard.
pub const SINGLE_SUBMIT_BOUND_ATTRIBUTE: &str = "data-single-submit-bound";

const PERMISSION_FIELDS: &str = ".input-permission_name, select[name=permission_name]";
const REASON_FIELDS: &str = ".input-reason, [name=reason]";
const GROUP_FIELD: &str = "select[name=group_name]";
const ARGUMENT_SECTIONS: &str = ".form-group-argument";
const REASON_SECTIONS: &str = ".form-group-reason";
const SUBMIT_CONTROLS: &str = "button[type=submit], input[type=submit]";

type DomController = FormController<DomField, DomSelect, DomSection>;

fn read_config(root: &Element, with_strategy: bool) -> Result<FormConfig, AttachError> {
    let strategy = if with_strategy {
        root.get_attribute(STRATEGY_ATTRIBUTE)
    } else {
        None
    };

    Ok(FormConfig::from_attributes(
        root.get_attribute(CONFIG_ATTRIBUTE).as_deref(),
        strategy.as_deref(),
    )?)
}

/// Inserts a dropdown right after the text field, carrying the same name and classes.
fn generate_dropdown(
    document: &Document,
    text: &HtmlInputElement,
) -> Result<HtmlSelectElement, JsValue> {
    let select = document
        .create_element("select")?
        .dyn_into::<HtmlSelectElement>()
        .map_err(JsValue::from)?;

    select.set_name(&text.name());
    select.set_class_name(&text.class_name());
    text.after_with_node_1(&select)?;

    Ok(select)
}

fn sections(root: &Element, selector: &str) -> Result<Vec<DomSection>, JsValue> {
    Ok(query_all(root, selector)?
        .into_iter()
        .filter_map(DomSection::from_element)
        .collect())
}

/// Permission request form bound to its DOM element.
///
/// Dropping the instance (calling `free()` from JavaScript) removes all event listeners.
#[wasm_bindgen]
#[derive(Debug)]
pub struct PermissionRequestForm {
    root: Element,
    controller: Rc<RefCell<DomController>>,
    _listeners: Vec<EventListener>,
}

impl PermissionRequestForm {
    /// Reads table, configuration and fields from the form element and registers the listeners.
    ///
    /// A form element holds one binding at a time, dropping the instance releases it.
    pub fn bind(root: &Element) -> Result<Self, AttachError> {
        if root.has_attribute(BOUND_ATTRIBUTE) {
            return Err(AttachError::AlreadyBound(BOUND_ATTRIBUTE));
        }

        let json = root
            .get_attribute(TABLE_ATTRIBUTE)
            .ok_or(AttachError::MissingAttribute(TABLE_ATTRIBUTE))?;
        let table = PermissionArgumentTable::from_json(&json)?;
        let config = read_config(root, true)?;

        let permission: Vec<DomSelect> = query_all(root, PERMISSION_FIELDS)?
            .into_iter()
            .filter_map(DomSelect::from_element)
            .collect();
        if permission.is_empty() {
            return Err(AttachError::MissingField("permission selector"));
        }

        let text = query_one(root, &format!("input[name={}]", config.argument_name))?
            .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
            .ok_or(AttachError::MissingField("argument text field"))?;

        let select = match query_one(root, &format!("select[name={}]", config.argument_name))? {
            Some(element) => DomSelect::from_element(element)
                .ok_or(AttachError::MissingField("argument dropdown"))?,
            None => {
                let document = root
                    .owner_document()
                    .ok_or(AttachError::Dom("form element has no document".into()))?;
                debug!("generating argument dropdown");
                DomSelect(generate_dropdown(&document, &text)?)
            }
        };

        let reason: Vec<DomField> = query_all(root, REASON_FIELDS)?
            .into_iter()
            .filter_map(DomField::from_element)
            .collect();

        let group = query_one(root, GROUP_FIELD)?.and_then(DomSelect::from_element);

        let elements = FormElements {
            permission: permission.clone(),
            group,
            text: DomField::Input(text),
            select,
            reason: reason.clone(),
            argument_sections: sections(root, ARGUMENT_SECTIONS)?,
            reason_sections: sections(root, REASON_SECTIONS)?,
        };

        let controller = Rc::new(RefCell::new(FormController::new(
            table,
            elements,
            strategy::from_config(&config),
        )));

        let mut listeners = Vec::new();

        for selector in permission {
            let controller = controller.clone();
            let target = selector.0.clone();
            listeners.push(EventListener::new(&target, "change", move |_| {
                // Unknown permissions are logged by the controller
                let _ = controller.borrow_mut().permission_changed(&selector.0.value());
            })?);
        }

        for field in reason {
            let controller = controller.clone();
            let target = field.html_element().clone();
            listeners.push(EventListener::new(&target, "input", move |_| {
                controller.borrow().reason_changed(&field.value());
            })?);
        }

        {
            let controller = controller.clone();
            listeners.push(EventListener::new(root, "submit", move |_| {
                controller.borrow().before_submit();
            })?);
        }

        root.set_attribute(BOUND_ATTRIBUTE, "")?;

        debug!(
            permissions = controller.borrow().table().len(),
            "attached permission request form"
        );

        Ok(Self {
            root: root.clone(),
            controller,
            _listeners: listeners,
        })
    }
}

impl Drop for PermissionRequestForm {
    fn drop(&mut self) {
        let _ = self.root.remove_attribute(BOUND_ATTRIBUTE);
    }
}

#[wasm_bindgen]
impl PermissionRequestForm {
    /// Binds a permission request form element carrying a `data-permission-request` table.
    #[wasm_bindgen]
    pub fn attach(root: &Element) -> Result<PermissionRequestForm, JsValue> {
        Ok(jserr!(Self::bind(root)))
    }

    /// Returns `{ permission, mode, eligible, options, locked }` describing the current state.
    #[wasm_bindgen]
    pub fn state(&self) -> Result<JsValue, JsValue> {
        Ok(jserr!(serialize_to_js(&self.controller.borrow().state())))
    }

    /// Derives the mode again from the current permission selection.
    #[wasm_bindgen]
    pub fn refresh(&self) -> Result<(), JsValue> {
        jserr!(self.controller.borrow_mut().refresh());
        Ok(())
    }

    /// Selects a permission programmatically, equivalent to a user changing the selector.
    #[wasm_bindgen(js_name = selectPermission)]
    pub fn select_permission(&self, permission: &str) -> Result<(), JsValue> {
        jserr!(self.controller.borrow_mut().permission_changed(permission));
        Ok(())
    }
}

/// Form which may only be submitted once.
#[wasm_bindgen]
#[derive(Debug)]
pub struct SingleSubmitForm {
    root: Element,
    guard: Rc<RefCell<SubmitGuard<DomSubmitControl>>>,
    _listener: EventListener,
}

impl SingleSubmitForm {
    pub fn bind(root: &Element) -> Result<Self, AttachError> {
        if root.has_attribute(SINGLE_SUBMIT_BOUND_ATTRIBUTE) {
            return Err(AttachError::AlreadyBound(SINGLE_SUBMIT_BOUND_ATTRIBUTE));
        }

        let config = read_config(root, false)?;

        let control = match query_one(root, SUBMIT_CONTROLS)? {
            Some(element) => Some(element),
            None => query_one(root, "button")?,
        }
        .and_then(DomSubmitControl::from_element)
        .ok_or(AttachError::MissingField("submit control"))?;

        let guard = Rc::new(RefCell::new(SubmitGuard::new(control, &config.busy_class)));

        let listener = {
            let guard = guard.clone();
            EventListener::new(root, "submit", move |event| {
                if guard.borrow_mut().on_submit() == SubmitDecision::Suppress {
                    event.prevent_default();
                }
            })?
        };

        root.set_attribute(SINGLE_SUBMIT_BOUND_ATTRIBUTE, "")?;

        Ok(Self {
            root: root.clone(),
            guard,
            _listener: listener,
        })
    }
}

impl Drop for SingleSubmitForm {
    fn drop(&mut self) {
        let _ = self.root.remove_attribute(SINGLE_SUBMIT_BOUND_ATTRIBUTE);
    }
}

#[wasm_bindgen]
impl SingleSubmitForm {
    /// Guards a form element against repeated submission.
    #[wasm_bindgen]
    pub fn attach(root: &Element) -> Result<SingleSubmitForm, JsValue> {
        Ok(jserr!(Self::bind(root)))
    }

    #[wasm_bindgen(js_name = isSubmitted)]
    pub fn is_submitted(&self) -> bool {
        self.guard.borrow().is_submitted()
    }
}
