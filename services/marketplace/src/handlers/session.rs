//! Session cookie extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use agrilink_auth_types::cookie::session_token;

use crate::domain::repository::SessionStore;
use crate::domain::types::SessionContext;
use crate::error::MarketError;
use crate::state::AppState;

/// Resolves the `agrilink_session` cookie into a [`SessionContext`].
///
/// A missing, unknown or expired token yields an anonymous context; handlers
/// decide whether a session is required. Only a store failure rejects.
impl FromRequestParts<AppState> for SessionContext {
    type Rejection = MarketError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = session_token(&parts.headers);
        let sessions = state.session_store();

        async move {
            let Some(token) = token else {
                return Ok(SessionContext::anonymous());
            };
            let resolved = sessions.resolve(&token).await.map_err(|e| match e {
                MarketError::Internal(e) => MarketError::Session(e),
                other => other,
            })?;
            Ok(match resolved {
                Some(user_id) => SessionContext::bound(token, user_id),
                None => SessionContext::anonymous(),
            })
        }
    }
}
