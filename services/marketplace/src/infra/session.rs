use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rand::RngExt;
use tokio::sync::RwLock;
use tracing::debug;

use agrilink_auth_types::cookie::clamp_session_ttl;
use agrilink_domain::id::UserId;

use crate::domain::repository::SessionStore;
use crate::error::MarketError;

/// Session token length in characters.
pub const SESSION_TOKEN_LEN: usize = 32;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

fn generate_token() -> String {
    let mut rng = rand::rng();
    (0..SESSION_TOKEN_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

#[derive(Debug, Clone)]
struct SessionEntry {
    user_id: UserId,
    expires_at: DateTime<Utc>,
}

/// In-memory session store. Sessions expire `ttl` after creation and are
/// evicted lazily when resolved.
#[derive(Clone)]
pub struct MemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, SessionEntry>>>,
    ttl: Duration,
}

impl MemorySessionStore {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl: Duration::seconds(clamp_session_ttl(ttl_secs) as i64),
        }
    }

    /// Number of stored bindings, including ones that expired but were never resolved.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl SessionStore for MemorySessionStore {
    async fn create(&self, user_id: UserId) -> Result<String, MarketError> {
        let token = generate_token();
        let entry = SessionEntry {
            user_id,
            expires_at: Utc::now() + self.ttl,
        };
        self.sessions.write().await.insert(token.clone(), entry);
        Ok(token)
    }

    async fn resolve(&self, token: &str) -> Result<Option<UserId>, MarketError> {
        let now = Utc::now();
        {
            let sessions = self.sessions.read().await;
            match sessions.get(token) {
                None => return Ok(None),
                Some(entry) if entry.expires_at > now => return Ok(Some(entry.user_id)),
                Some(_) => {}
            }
        }
        debug!("evicting expired session");
        self.sessions.write().await.remove(token);
        Ok(None)
    }

    async fn destroy(&self, token: &str) -> Result<(), MarketError> {
        self.sessions.write().await.remove(token);
        Ok(())
    }
}
