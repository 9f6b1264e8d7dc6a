// SPDX-License-Identifier: AGPL-3.0-or-later

use serde::ser::Serialize;
use serde_wasm_bindgen::{Error, Serializer};
use wasm_bindgen::JsValue;

/// Serialize any struct into JavaScript values.
///
/// Note that this will NOT serialize into a JSON string but an actual JavaScript object. `None`
/// becomes `null` so state snapshots keep a stable shape.
pub fn serialize_to_js<T>(value: &T) -> Result<JsValue, Error>
where
    T: Serialize + ?Sized,
{
    let serializer = Serializer::new().serialize_missing_as_null(true);
    value.serialize(&serializer)
}
