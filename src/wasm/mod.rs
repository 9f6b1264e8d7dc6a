// SPDX-License-Identifier: AGPL-3.0-or-later

//! Methods exported for WebAssembly targets.
//!
//! Host pages either call `initPage()` once after the DOM was loaded, which binds every form
//! carrying a `data-permission-request` table or a `data-single-submit` flag, or bind single
//! forms with `PermissionRequestForm.attach(element)` and `SingleSubmitForm.attach(element)`.
mod dom;
pub mod error;
mod form;
mod page;
mod serde;
#[cfg(test)]
mod tests;

use std::panic;

use console_error_panic_hook::hook as panic_hook;
use wasm_bindgen::prelude::wasm_bindgen;

pub use dom::{DomField, DomSection, DomSelect, DomSubmitControl};
pub use form::{PermissionRequestForm, SingleSubmitForm};
pub use page::{init_logging, init_page, init_widget, Page};

/// Sets a [`panic hook`] for better error messages in the browser console.
///
/// [`panic hook`]: https://crates.io/crates/console_error_panic_hook
#[wasm_bindgen(js_name = setWasmPanicHook)]
pub fn set_wasm_panic_hook() {
    panic::set_hook(Box::new(panic_hook));
}
