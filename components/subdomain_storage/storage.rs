/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The Storage-shaped façade over the cookie manager.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::StorageError;
use crate::attributes::CookieAttributes;
use crate::cookie_manager::{CookieManager, SharedJar};
use crate::value::{StorageValue, convert_value_to_string};

/// Runtime reconfiguration for [`SubdomainStorage::set_config`]. Absent
/// fields leave the corresponding setting untouched.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct StorageConfig {
    pub domain: Option<String>,
    pub cookie_prefix: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub expire_time: Option<OffsetDateTime>,
}

/// Cookie-backed storage with the Storage API shape.
///
/// The jar is the authoritative state; an ordered in-memory mirror of the
/// managed keys serves synchronous reads, and `length` is derived from
/// the mirror's size. Every mutation is delegated to the owned
/// [`CookieManager`].
pub struct SubdomainStorage {
    cookie_storage: CookieManager,
    mirror: IndexMap<String, String>,
}

impl SubdomainStorage {
    /// Build a façade over `jar`, mirroring every cookie already present
    /// under the manager's prefix.
    pub fn new(jar: SharedJar) -> SubdomainStorage {
        let cookie_storage = CookieManager::new(jar);
        let mirror = cookie_storage.get_cookie();
        SubdomainStorage {
            cookie_storage,
            mirror,
        }
    }

    /// The number of managed keys.
    pub fn length(&self) -> usize {
        self.mirror.len()
    }

    pub fn get_item(&self, key: &str) -> Option<&str> {
        self.mirror.get(key).map(String::as_str)
    }

    pub fn set_item(
        &mut self,
        key: &str,
        value: impl Into<StorageValue>,
    ) -> Result<(), StorageError> {
        self.set_item_with_attributes(key, value, &CookieAttributes::new())
    }

    /// As [`set_item`](SubdomainStorage::set_item), with per-call
    /// directive overrides merged over the manager's defaults.
    pub fn set_item_with_attributes(
        &mut self,
        key: &str,
        value: impl Into<StorageValue>,
        attrs: &CookieAttributes,
    ) -> Result<(), StorageError> {
        if key.is_empty() {
            return Err(StorageError::EmptyKey);
        }

        // A value with no string form at all is stored the way a host
        // stringifies it on assignment.
        let value_as_string = convert_value_to_string(&value.into())
            .unwrap_or_else(|| "undefined".to_owned());
        self.mirror.insert(key.to_owned(), value_as_string.clone());
        self.cookie_storage.add_cookie(key, &value_as_string, attrs);
        Ok(())
    }

    pub fn remove_item(&mut self, key: &str) {
        self.remove_item_with_attributes(key, &CookieAttributes::new());
    }

    /// Removal is best-effort: the jar write happens whether or not `key`
    /// was mirrored, and a missing key is not an error.
    pub fn remove_item_with_attributes(&mut self, key: &str, attrs: &CookieAttributes) {
        self.mirror.shift_remove(key);
        self.cookie_storage.remove_cookie(key, attrs);
    }

    /// Drop every managed key, locally and from the jar.
    pub fn clear(&mut self) {
        self.mirror.clear();
        self.cookie_storage.clear_cookies();
    }

    /// Not implemented: always returns `None`. A documented departure
    /// from the Storage contract, kept rather than silently filled in.
    pub fn key(&self, _index: usize) -> Option<&str> {
        None
    }

    /// Apply a configuration change. A new prefix first clears the façade
    /// outright, then re-mirrors whatever cookies match the new prefix;
    /// domain and expiration changes update the manager only.
    pub fn set_config(&mut self, config: StorageConfig) {
        if let Some(cookie_prefix) = config.cookie_prefix {
            self.clear();
            self.cookie_storage.set_cookie_prefix(cookie_prefix);
            self.mirror = self.cookie_storage.get_cookie();
        }
        if let Some(domain) = config.domain {
            self.cookie_storage.set_domain(domain);
        }
        if let Some(expire_time) = config.expire_time {
            self.cookie_storage.set_expires(expire_time);
        }
    }

    /// One-directional reconciliation with the jar: cookies written
    /// behind the façade's back are mirrored in, while locally-tracked
    /// keys absent from the fresh read are never dropped.
    pub fn sync(&mut self) {
        for (key, value) in self.cookie_storage.get_cookie() {
            if !self.mirror.contains_key(&key) {
                self.mirror.insert(key, value);
            }
        }
    }
}
