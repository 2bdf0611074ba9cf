//! Cookie builders for the session token.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use http::HeaderMap;
use time::Duration;

/// Cookie name for the session token.
pub const AGRILINK_SESSION: &str = "agrilink_session";

/// Default session lifetime and cookie Max-Age in seconds (7 days).
pub const SESSION_TTL_SECS: u64 = 604800;

/// Upper bound on a session lifetime (10 years). Longer settings are clamped.
pub const MAX_SESSION_TTL_SECS: u64 = 10 * 365 * 24 * 3600;

/// Clamp a configured lifetime to [`MAX_SESSION_TTL_SECS`].
pub fn clamp_session_ttl(secs: u64) -> u64 {
    secs.min(MAX_SESSION_TTL_SECS)
}

/// Attributes applied to every session cookie the service emits.
#[derive(Debug, Clone)]
pub struct SessionCookie {
    pub domain: Option<String>,
    pub secure: bool,
    pub max_age_secs: u64,
}

impl Default for SessionCookie {
    fn default() -> Self {
        Self {
            domain: None,
            secure: false,
            max_age_secs: SESSION_TTL_SECS,
        }
    }
}

impl SessionCookie {
    /// Set the session cookie on the jar.
    ///
    /// ```
    /// use axum_extra::extract::cookie::CookieJar;
    /// use agrilink_auth_types::cookie::{SessionCookie, AGRILINK_SESSION};
    ///
    /// let settings = SessionCookie {
    ///     domain: Some("example.com".to_string()),
    ///     secure: true,
    ///     max_age_secs: 3600,
    /// };
    /// let jar = settings.set(CookieJar::new(), "token_value".to_string());
    /// let cookie = jar.get(AGRILINK_SESSION).unwrap();
    /// assert_eq!(cookie.value(), "token_value");
    /// assert_eq!(cookie.path(), Some("/"));
    /// assert_eq!(cookie.domain(), Some("example.com"));
    /// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(3600)));
    /// assert!(cookie.http_only().unwrap_or(false));
    /// assert!(cookie.secure().unwrap_or(false));
    /// ```
    pub fn set(&self, jar: CookieJar, value: String) -> CookieJar {
        let secs = clamp_session_ttl(self.max_age_secs) as i64;
        jar.add(self.build(value, Duration::seconds(secs)))
    }

    /// Clear the session cookie by setting Max-Age to 0.
    ///
    /// ```
    /// use axum_extra::extract::cookie::CookieJar;
    /// use agrilink_auth_types::cookie::{SessionCookie, AGRILINK_SESSION};
    ///
    /// let settings = SessionCookie::default();
    /// let jar = settings.set(CookieJar::new(), "t".to_string());
    /// let jar = settings.clear(jar);
    /// let cookie = jar.get(AGRILINK_SESSION).unwrap();
    /// assert_eq!(cookie.value(), "");
    /// assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
    /// ```
    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        jar.add(self.build(String::new(), Duration::ZERO))
    }

    fn build(&self, value: String, max_age: Duration) -> Cookie<'static> {
        let mut builder = Cookie::build((AGRILINK_SESSION, value))
            .path("/")
            .max_age(max_age)
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax);
        if let Some(domain) = &self.domain {
            builder = builder.domain(domain.clone());
        }
        builder.build()
    }
}

/// Read the session token from a request's `Cookie` header.
///
/// Returns `None` when the cookie is absent or empty.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(AGRILINK_SESSION)
        .map(|c| c.value().to_owned())
        .filter(|v| !v.is_empty())
}
