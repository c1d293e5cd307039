/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Per-cookie CRUD against the jar, under a configurable key prefix.

use std::cell::RefCell;
use std::rc::Rc;

use cookie_jar::CookieJar;
use indexmap::IndexMap;
use log::{debug, warn};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Duration, OffsetDateTime};

use crate::attributes::CookieAttributes;

/// The jar is shared external state the manager reads and writes but does
/// not own. All access is single-threaded and synchronous.
pub type SharedJar = Rc<RefCell<dyn CookieJar>>;

/// Characters `encodeURIComponent` leaves verbatim; everything else in a
/// cookie value is percent-encoded.
const COOKIE_VALUE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Wire form of the `Expires` directive, e.g.
/// `Thu, 01 Jan 1970 00:00:00 GMT`.
const EXPIRES_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

const DEFAULT_COOKIE_PREFIX: &str = "sds_";

fn expires_directive(instant: OffsetDateTime) -> String {
    instant.format(EXPIRES_FORMAT).unwrap_or_else(|_| String::new())
}

/// Owns the prefix, target domain, expiration instant and default
/// directives applied to every cookie it writes.
pub struct CookieManager {
    jar: SharedJar,
    cookie_prefix: String,
    domain: String,
    expires: OffsetDateTime,
    attributes: CookieAttributes,
}

impl CookieManager {
    /// The default domain is the jar's host, read once here; the default
    /// expiration is fifty years out, effectively non-expiring.
    pub fn new(jar: SharedJar) -> CookieManager {
        let domain = jar.borrow().host().to_owned();
        let now = OffsetDateTime::now_utc();
        let expires = now
            .replace_year(now.year() + 50)
            .unwrap_or_else(|_| now + Duration::days(50 * 365));
        let attributes = CookieAttributes::new()
            .with("SameSite", "None")
            .with("Secure", true)
            .with("Path", "/");

        CookieManager {
            jar,
            cookie_prefix: DEFAULT_COOKIE_PREFIX.to_owned(),
            domain,
            expires,
            attributes,
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn set_domain(&mut self, domain: String) {
        self.domain = domain;
    }

    pub fn cookie_prefix(&self) -> &str {
        &self.cookie_prefix
    }

    pub fn set_cookie_prefix(&mut self, cookie_prefix: String) {
        self.cookie_prefix = cookie_prefix;
    }

    pub fn expires(&self) -> OffsetDateTime {
        self.expires
    }

    pub fn set_expires(&mut self, expires: OffsetDateTime) {
        self.expires = expires;
    }

    pub fn attributes(&self) -> &CookieAttributes {
        &self.attributes
    }

    /// Shallow-merge `partial` into the default directives in place.
    pub fn set_attributes(&mut self, partial: &CookieAttributes) {
        self.attributes.merge(partial);
    }

    /// Every cookie under the prefix, as an ordered map of unprefixed key
    /// to percent-decoded value. Malformed entries are skipped.
    pub fn get_cookie(&self) -> IndexMap<String, String> {
        let cookie_string = self.jar.borrow().cookie_string();
        let mut cookies = IndexMap::new();
        if cookie_string.is_empty() {
            return cookies;
        }

        for entry in cookie_string.split("; ") {
            let Some((key, value)) = entry.split_once('=') else {
                warn!("Skipping malformed cookie entry {:?}", entry);
                continue;
            };
            if key.is_empty() || value.is_empty() {
                warn!("Skipping malformed cookie entry {:?}", entry);
                continue;
            }
            if let Some(unprefixed) = key.strip_prefix(&self.cookie_prefix) {
                let decoded = percent_decode_str(value).decode_utf8_lossy().into_owned();
                cookies.insert(unprefixed.to_owned(), decoded);
            }
        }

        cookies
    }

    /// Write one cookie named `prefix + key`, percent-encoding the value
    /// and merging the default directives with `attrs` (override wins).
    pub fn add_cookie(&self, key: &str, value: &str, attrs: &CookieAttributes) {
        let merged = self.attributes.merged_with(attrs);
        let encoded = utf8_percent_encode(value, COOKIE_VALUE_ENCODE_SET);
        let header = format!(
            "{}{}={}; Expires={}; Domain={}; {}",
            self.cookie_prefix,
            key,
            encoded,
            expires_directive(self.expires),
            self.domain,
            merged.to_directive_string(),
        );
        debug!("Adding cookie {:?}", key);
        self.jar.borrow_mut().set_cookie_string(&header);
    }

    /// Delete the cookie named `prefix + key` by writing it back with an
    /// empty value and an `Expires` forced to the epoch. Any `Expires` in
    /// `attrs` is stripped so the epoch cannot be overridden.
    pub fn remove_cookie(&self, key: &str, attrs: &CookieAttributes) {
        let mut overrides = attrs.clone();
        overrides.remove("Expires");
        overrides.remove("expires");
        let merged = self.attributes.merged_with(&overrides);
        let header = format!(
            "{}{}=; Expires={}; Domain={}; {}",
            self.cookie_prefix,
            key,
            expires_directive(OffsetDateTime::UNIX_EPOCH),
            self.domain,
            merged.to_directive_string(),
        );
        debug!("Removing cookie {:?}", key);
        self.jar.borrow_mut().set_cookie_string(&header);
    }

    /// Remove every cookie under the prefix.
    pub fn clear_cookies(&self) {
        for key in self.get_cookie().keys() {
            self.remove_cookie(key, &CookieAttributes::new());
        }
    }
}
