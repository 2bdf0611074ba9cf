//! Mock session helpers for integration tests.
//!
//! A logged-in browser sends the `agrilink_session` cookie on every request.
//! `MockSession` produces that cookie header for a known token so tests can
//! act as any session without replaying the cookie jar.

use agrilink_auth_types::cookie::AGRILINK_SESSION;
use http::header::COOKIE;
use http::{HeaderMap, HeaderName, HeaderValue};

/// Session token presented by a test client.
pub struct MockSession {
    pub token: String,
}

impl MockSession {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Return the `Cookie` header pair as a browser would send it.
    pub fn header(&self) -> (HeaderName, HeaderValue) {
        let value = format!("{AGRILINK_SESSION}={}", self.token);
        (COOKIE, HeaderValue::from_str(&value).unwrap())
    }

    /// Return the cookie as a header map.
    pub fn headers(&self) -> HeaderMap {
        let (name, value) = self.header();
        let mut map = HeaderMap::new();
        map.insert(name, value);
        map
    }
}
