use serde::Deserialize;

use agrilink_auth_types::cookie::{SESSION_TTL_SECS, SessionCookie, clamp_session_ttl};

/// Marketplace service configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketConfig {
    /// TCP port to listen on. Env var: `MARKETPLACE_PORT`.
    #[serde(default = "default_port")]
    pub marketplace_port: u16,
    /// Session lifetime and cookie Max-Age in seconds. Env var: `SESSION_TTL_SECS`.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,
    /// Cookie Domain attribute; host-only when unset.
    #[serde(default)]
    pub cookie_domain: Option<String>,
    #[serde(default)]
    pub cookie_secure: bool,
}

fn default_port() -> u16 {
    5000
}

fn default_session_ttl() -> u64 {
    SESSION_TTL_SECS
}

impl agrilink_core::config::Config for MarketConfig {}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            marketplace_port: default_port(),
            session_ttl_secs: default_session_ttl(),
            cookie_domain: None,
            cookie_secure: false,
        }
    }
}

impl MarketConfig {
    /// Session lifetime shared by the store and the cookie, capped at ten years.
    pub fn session_ttl(&self) -> u64 {
        clamp_session_ttl(self.session_ttl_secs)
    }

    pub fn session_cookie(&self) -> SessionCookie {
        SessionCookie {
            domain: self.cookie_domain.clone(),
            secure: self.cookie_secure,
            max_age_secs: self.session_ttl(),
        }
    }
}
