/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Cookie directive maps and their wire encoding.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The value of a single cookie directive.
///
/// Scalars encode as `Name=Value;`; flags encode as a bare `Name;` when
/// set and are omitted entirely when unset.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Flag(bool),
    Text(String),
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> AttributeValue {
        AttributeValue::Flag(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> AttributeValue {
        AttributeValue::Text(value.to_owned())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> AttributeValue {
        AttributeValue::Text(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> AttributeValue {
        AttributeValue::Text(value.to_string())
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> AttributeValue {
        AttributeValue::Text(value.to_string())
    }
}

/// An ordered mapping of cookie directive names to values.
///
/// Insertion order is contractual: directives are encoded in the order
/// they were added, and a shallow merge keeps the position of defaults
/// that overrides replace.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CookieAttributes(IndexMap<String, AttributeValue>);

impl CookieAttributes {
    pub fn new() -> CookieAttributes {
        CookieAttributes(IndexMap::new())
    }

    pub fn set(&mut self, name: &str, value: impl Into<AttributeValue>) {
        self.0.insert(name.to_owned(), value.into());
    }

    /// Builder form of [`set`](CookieAttributes::set).
    pub fn with(mut self, name: &str, value: impl Into<AttributeValue>) -> CookieAttributes {
        self.set(name, value);
        self
    }

    pub fn remove(&mut self, name: &str) -> Option<AttributeValue> {
        self.0.shift_remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.0.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Shallow merge of `overrides` into `self`; an override wins over an
    /// existing entry without changing its position.
    pub fn merge(&mut self, overrides: &CookieAttributes) {
        for (name, value) in &overrides.0 {
            self.0.insert(name.clone(), value.clone());
        }
    }

    pub fn merged_with(&self, overrides: &CookieAttributes) -> CookieAttributes {
        let mut merged = self.clone();
        merged.merge(overrides);
        merged
    }

    /// Encode the map as the directive suffix of a Set-Cookie string,
    /// e.g. `SameSite=None; Secure; Path=/;`.
    ///
    /// Directive values are emitted verbatim; callers are responsible for
    /// supplying values that are safe inside a cookie-attribute string.
    pub fn to_directive_string(&self) -> String {
        let mut parts = Vec::new();
        for (name, value) in &self.0 {
            match value {
                AttributeValue::Flag(true) => parts.push(format!("{};", name)),
                AttributeValue::Flag(false) => {},
                AttributeValue::Text(text) => parts.push(format!("{}={};", name, text)),
            }
        }
        parts.join(" ")
    }
}
