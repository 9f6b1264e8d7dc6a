// SPDX-License-Identifier: AGPL-3.0-or-later

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

use crate::config::ConfigError;
use crate::table::TableError;

/// Converts any error into a thrown JavaScript `Error`.
macro_rules! jserr {
    ($l:expr) => {
        $l.map_err::<wasm_bindgen::JsValue, _>(|err| js_sys::Error::new(&format!("{}", err)).into())?
    };
}

pub(crate) use jserr;

/// Error types for binding a form element.
#[derive(Error, Debug)]
pub enum AttachError {
    /// Form element lacks a required data attribute.
    #[error("form element has no '{0}' attribute")]
    MissingAttribute(&'static str),

    /// Form element is bound already, the attribute names the marker found on it.
    #[error("form element is bound already ('{0}' is set)")]
    AlreadyBound(&'static str),

    /// Form element contains no matching field.
    #[error("form element has no {0}")]
    MissingField(&'static str),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A DOM operation threw.
    #[error("DOM operation failed: {0}")]
    Dom(String),
}

impl From<JsValue> for AttachError {
    fn from(value: JsValue) -> Self {
        Self::Dom(describe(&value))
    }
}

/// Human readable description of a thrown JavaScript value.
pub fn describe(value: &JsValue) -> String {
    match value.dyn_ref::<js_sys::Error>() {
        Some(err) => String::from(err.message()),
        None => value.as_string().unwrap_or_else(|| format!("{value:?}")),
    }
}
