pub mod access;
pub mod application;
pub mod auth;
pub mod equipment;
pub mod job;
pub mod otp;

use agrilink_domain::id::UserId;

use crate::domain::types::is_blank;
use crate::error::MarketError;

/// Which rows a listing use case returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    All,
    Owner(UserId),
}

/// Reject blank values for required text fields.
pub(crate) fn require_text(fields: &[(&'static str, Option<&str>)]) -> Result<(), MarketError> {
    for &(name, value) in fields {
        if value.is_some_and(is_blank) {
            return Err(MarketError::Validation(name));
        }
    }
    Ok(())
}
