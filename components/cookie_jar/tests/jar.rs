/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use cookie_jar::{CookieJar, MemoryJar, domain_match};

#[test]
fn test_domain_match() {
    assert!(domain_match("foo.com", "foo.com"));
    assert!(domain_match("bar.foo.com", "foo.com"));
    assert!(domain_match("baz.bar.foo.com", "foo.com"));

    assert!(!domain_match("bar.foo.com", "bar.com"));
    assert!(!domain_match("bar.com", "baz.bar.com"));
    assert!(!domain_match("foo.com", "bar.com"));

    assert!(!domain_match("bar.com", "bbar.com"));
    assert!(domain_match("235.132.2.3", "235.132.2.3"));
    assert!(!domain_match("235.132.2.3", "1.1.1.1"));
    assert!(!domain_match("235.132.2.3", ".2.3"));
}

#[test]
fn test_empty_jar() {
    let jar = MemoryJar::new("example.com");
    assert_eq!(jar.cookie_string(), "");
}

#[test]
fn test_write_and_overwrite() {
    let mut jar = MemoryJar::new("example.com");
    jar.set_cookie_string("foo=bar");
    jar.set_cookie_string("baz=qux");
    assert_eq!(jar.cookie_string(), "foo=bar; baz=qux");

    // Last write for a given name wins, without disturbing insertion order.
    jar.set_cookie_string("foo=other");
    assert_eq!(jar.cookie_string(), "foo=other; baz=qux");
}

#[test]
fn test_attributes_are_stripped_from_reads() {
    let mut jar = MemoryJar::new("example.com");
    jar.set_cookie_string("foo=bar; Domain=example.com; Path=/; SameSite=None; Secure;");
    assert_eq!(jar.cookie_string(), "foo=bar");
}

#[test]
fn test_epoch_expires_deletes() {
    let mut jar = MemoryJar::new("example.com");
    jar.set_cookie_string("foo=bar");
    jar.set_cookie_string("foo=; Expires=Thu, 01 Jan 1970 00:00:00 GMT");
    assert_eq!(jar.cookie_string(), "");

    // Deleting a cookie that was never set is a no-op.
    jar.set_cookie_string("ghost=; Expires=Thu, 01 Jan 1970 00:00:00 GMT");
    assert_eq!(jar.cookie_string(), "");
}

#[test]
fn test_future_expires_is_kept() {
    let mut jar = MemoryJar::new("example.com");
    jar.set_cookie_string("foo=bar; Expires=Sun, 18 Apr 2077 21:06:29 GMT");
    assert_eq!(jar.cookie_string(), "foo=bar");
}

#[test]
fn test_foreign_domain_is_rejected() {
    let mut jar = MemoryJar::new("app.example.com");
    jar.set_cookie_string("foo=bar; Domain=other.org");
    assert_eq!(jar.cookie_string(), "");

    // A parent domain of the host is accepted.
    jar.set_cookie_string("foo=bar; Domain=example.com");
    assert_eq!(jar.cookie_string(), "foo=bar");
}

#[test]
fn test_unparseable_header_is_dropped() {
    let mut jar = MemoryJar::new("example.com");
    jar.set_cookie_string("");
    jar.set_cookie_string("no-equals-sign");
    assert_eq!(jar.cookie_string(), "");
}
