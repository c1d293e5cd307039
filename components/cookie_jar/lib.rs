/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The boundary with the host's cookie store.
//!
//! A [`CookieJar`] presents the store the way a browser does: a single
//! `"; "`-joined string of `name=value` pairs for reads, and one formatted
//! Set-Cookie-style header per write. [`MemoryJar`] is an in-process jar
//! that applies the subset of the platform rules this library depends on,
//! for tests and for hosts without a native jar.

use std::net::{Ipv4Addr, Ipv6Addr};

use cookie::Cookie;
use indexmap::IndexMap;
use log::{debug, warn};
use time::OffsetDateTime;

/// The host's store of all cookies for the current origin.
pub trait CookieJar {
    /// The canonicalized host this jar belongs to.
    fn host(&self) -> &str;

    /// Every live cookie as a `"; "`-joined string of `name=value` pairs,
    /// attributes stripped.
    fn cookie_string(&self) -> String;

    /// Apply a single Set-Cookie-style header to the jar.
    fn set_cookie_string(&mut self, header: &str);
}

/// An in-process [`CookieJar`].
///
/// Cookies are keyed by name alone; the jar holds state for a single
/// origin, so the name/domain/path identity of a full cookie store
/// collapses to the name.
pub struct MemoryJar {
    host: String,
    cookies: IndexMap<String, String>,
}

impl MemoryJar {
    pub fn new(host: &str) -> MemoryJar {
        MemoryJar {
            host: host.to_owned(),
            cookies: IndexMap::new(),
        }
    }
}

impl CookieJar for MemoryJar {
    fn host(&self) -> &str {
        &self.host
    }

    fn cookie_string(&self) -> String {
        self.cookies
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn set_cookie_string(&mut self, header: &str) {
        let Ok(cookie) = Cookie::parse(header) else {
            warn!("Discarding unparseable cookie header");
            return;
        };

        // A Domain attribute that does not cover this jar's host means the
        // write fails silently, as the platform jar would have it fail.
        if let Some(domain) = cookie.domain() {
            if !domain_match(&self.host, domain) {
                warn!(
                    "Discarding cookie {:?}: domain {:?} does not match host {:?}",
                    cookie.name(),
                    domain,
                    self.host
                );
                return;
            }
        }

        // An Expires at or before the current instant deletes the cookie.
        if let Some(expires) = cookie.expires_datetime() {
            if expires <= OffsetDateTime::now_utc() {
                debug!("Expiring cookie {:?}", cookie.name());
                self.cookies.shift_remove(cookie.name());
                return;
            }
        }

        self.cookies
            .insert(cookie.name().to_owned(), cookie.value().to_owned());
    }
}

/// <http://tools.ietf.org/html/rfc6265#section-5.1.3>
pub fn domain_match(string: &str, domain_string: &str) -> bool {
    let string = &string.to_lowercase();
    let domain_string = &domain_string.to_lowercase();

    string == domain_string ||
        (string.ends_with(domain_string) &&
            string.as_bytes()[string.len() - domain_string.len() - 1] == b'.' &&
            string.parse::<Ipv4Addr>().is_err() &&
            string.parse::<Ipv6Addr>().is_err())
}
