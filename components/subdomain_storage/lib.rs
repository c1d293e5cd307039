/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Cookie-backed key/value storage for cross-subdomain state.
//!
//! [`SubdomainStorage`] presents the familiar Storage-shaped API
//! (`length` / `get_item` / `set_item` / `remove_item` / `clear`) on top
//! of a [`cookie_jar::CookieJar`], so values persist in cookies that a
//! server and sibling subdomains can see. Reads are served synchronously
//! from an in-memory mirror of the jar; every mutation goes through a
//! [`CookieManager`] that owns the cookie prefix, target domain,
//! expiration and default directives.

pub mod attributes;
pub mod cookie_manager;
pub mod storage;
pub mod value;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use crate::attributes::{AttributeValue, CookieAttributes};
pub use crate::cookie_manager::{CookieManager, SharedJar};
pub use crate::storage::{StorageConfig, SubdomainStorage};
pub use crate::value::{StorageValue, convert_value_to_string};

/// Errors surfaced by the storage façade.
///
/// Everything else degrades silently: missing keys read as `None`,
/// malformed jar entries are skipped, and writes the jar refuses are
/// lost without notice, matching the tolerant Storage contract.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum StorageError {
    /// `set_item` was called with an empty key.
    EmptyKey,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StorageError::EmptyKey => {
                write!(f, "can't call set_item without key as first argument")
            },
        }
    }
}

impl std::error::Error for StorageError {}
