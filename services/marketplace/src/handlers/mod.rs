pub mod application;
pub mod auth;
pub mod equipment;
pub mod job;
pub mod session;

use std::str::FromStr;

use serde::Serialize;
use uuid::Uuid;

/// Parse a path id. An unparseable id becomes the nil id, which no stored entity
/// carries, so session and role checks still run before the lookup misses.
pub(crate) fn path_id<T: FromStr + From<Uuid>>(raw: &str) -> T {
    raw.parse().unwrap_or_else(|_| T::from(Uuid::nil()))
}

/// `{ "success": true }` body for operations with nothing else to return.
#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
