/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Coercion of arbitrary values to their stored string form.

use serde_json::Value as JsonValue;

/// A value handed to [`set_item`](crate::SubdomainStorage::set_item).
#[derive(Clone, Debug, PartialEq)]
pub enum StorageValue {
    /// No value at all. Distinct from the *string* `"undefined"`.
    Undefined,
    /// A value that carries its own string form; stored verbatim.
    Text(String),
    /// A structured value without a string form of its own; stored as its
    /// `serde_json` serialization.
    Structured(JsonValue),
}

impl From<&str> for StorageValue {
    fn from(value: &str) -> StorageValue {
        StorageValue::Text(value.to_owned())
    }
}

impl From<String> for StorageValue {
    fn from(value: String) -> StorageValue {
        StorageValue::Text(value)
    }
}

impl From<bool> for StorageValue {
    fn from(value: bool) -> StorageValue {
        StorageValue::Text(value.to_string())
    }
}

impl From<i64> for StorageValue {
    fn from(value: i64) -> StorageValue {
        StorageValue::Text(value.to_string())
    }
}

impl From<f64> for StorageValue {
    fn from(value: f64) -> StorageValue {
        StorageValue::Text(value.to_string())
    }
}

impl From<JsonValue> for StorageValue {
    fn from(value: JsonValue) -> StorageValue {
        StorageValue::Structured(value)
    }
}

/// Convert a value to the string that will be persisted.
///
/// A value with its own string form is used verbatim; a structured value
/// falls back to its lossy structural serialization, so JSON `null` yields
/// the literal string `"null"`. `Undefined` has no string form and stays
/// undefined rather than becoming the string `"undefined"`.
pub fn convert_value_to_string(value: &StorageValue) -> Option<String> {
    match value {
        StorageValue::Undefined => None,
        StorageValue::Text(text) => Some(text.clone()),
        StorageValue::Structured(json) => serde_json::to_string(json).ok(),
    }
}
