//! Session, role and ownership checks shared by the marketplace use cases.

use agrilink_domain::id::UserId;
use agrilink_domain::user::UserRole;

use crate::domain::repository::UserRepository;
use crate::domain::types::{SessionContext, User};
use crate::error::MarketError;

/// The caller's user id, or `NotAuthenticated`.
pub fn require_session(session: &SessionContext) -> Result<UserId, MarketError> {
    session.user_id().ok_or(MarketError::NotAuthenticated)
}

/// Re-fetch the caller and require `role`.
///
/// A session whose user no longer exists is treated as `Forbidden`, matching a wrong role.
pub async fn require_role<U: UserRepository>(
    users: &U,
    session: &SessionContext,
    role: UserRole,
) -> Result<User, MarketError> {
    let user_id = require_session(session)?;
    let user = users
        .find_by_id(user_id)
        .await?
        .ok_or(MarketError::Forbidden)?;
    if user.role != role {
        return Err(MarketError::Forbidden);
    }
    Ok(user)
}

/// Require that `caller` created the entity owned by `owner`.
pub fn ensure_owner(caller: UserId, owner: UserId) -> Result<(), MarketError> {
    if caller != owner {
        return Err(MarketError::Forbidden);
    }
    Ok(())
}
