use chrono::Utc;
use tracing::info;

use agrilink_domain::id::UserId;
use agrilink_domain::user::UserRole;

use crate::domain::repository::{OtpRepository, SessionStore, UserRepository};
use crate::domain::types::{SessionContext, User, normalize_phone};
use crate::error::MarketError;
use crate::usecase::access::require_session;
use crate::usecase::otp::{consume, find_matching};
use crate::usecase::require_text;

/// A user with a freshly bound session token.
#[derive(Debug)]
pub struct AuthOutput {
    pub user: User,
    pub session_token: String,
}

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub phone: String,
    pub code: String,
    pub name: String,
    pub role: UserRole,
    pub location: String,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub farm_size: Option<i32>,
    pub vehicle_type: Option<String>,
}

pub struct RegisterUseCase<U, O, S>
where
    U: UserRepository,
    O: OtpRepository,
    S: SessionStore,
{
    pub users: U,
    pub otps: O,
    pub sessions: S,
}

impl<U, O, S> RegisterUseCase<U, O, S>
where
    U: UserRepository,
    O: OtpRepository,
    S: SessionStore,
{
    pub async fn execute(&self, input: RegisterInput) -> Result<AuthOutput, MarketError> {
        let phone = normalize_phone(&input.phone).ok_or(MarketError::Validation("phone"))?;
        require_text(&[
            ("name", Some(input.name.as_str())),
            ("location", Some(input.location.as_str())),
        ])?;
        if input.farm_size.is_some_and(|size| size < 0) {
            return Err(MarketError::Validation("farmSize"));
        }

        // Existing phones are rejected before the code is checked or consumed.
        if self.users.find_by_phone(&phone).await?.is_some() {
            return Err(MarketError::UserAlreadyExists);
        }

        let otp = find_matching(&self.otps, &phone, &input.code).await?;

        let role = input.role;
        let user = User {
            id: UserId::new(),
            name: input.name.trim().to_owned(),
            phone,
            role,
            location: input.location.trim().to_owned(),
            latitude: input.latitude,
            longitude: input.longitude,
            farm_size: input.farm_size.filter(|_| role == UserRole::Farmer),
            vehicle_type: input.vehicle_type.filter(|_| role == UserRole::Rental),
            created_at: Utc::now(),
        };
        self.users.create(&user).await?;
        // The code stays usable if the account was not stored.
        consume(&self.otps, &otp).await?;

        let session_token = self.sessions.create(user.id).await?;
        info!(user_id = %user.id, role = %user.role, "user registered");
        Ok(AuthOutput {
            user,
            session_token,
        })
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub phone: String,
    pub code: String,
}

pub struct LoginUseCase<U, O, S>
where
    U: UserRepository,
    O: OtpRepository,
    S: SessionStore,
{
    pub users: U,
    pub otps: O,
    pub sessions: S,
}

impl<U, O, S> LoginUseCase<U, O, S>
where
    U: UserRepository,
    O: OtpRepository,
    S: SessionStore,
{
    pub async fn execute(&self, input: LoginInput) -> Result<AuthOutput, MarketError> {
        let phone = normalize_phone(&input.phone).ok_or(MarketError::Validation("phone"))?;

        let otp = find_matching(&self.otps, &phone, &input.code).await?;
        let user = self
            .users
            .find_by_phone(&phone)
            .await?
            .ok_or(MarketError::UserNotFound)?;
        consume(&self.otps, &otp).await?;

        let session_token = self.sessions.create(user.id).await?;
        info!(user_id = %user.id, "session started");
        Ok(AuthOutput {
            user,
            session_token,
        })
    }
}

// ── CurrentUser ──────────────────────────────────────────────────────────────

pub struct CurrentUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> CurrentUserUseCase<U> {
    pub async fn execute(&self, session: &SessionContext) -> Result<User, MarketError> {
        let user_id = require_session(session)?;
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(MarketError::UserNotFound)
    }
}

// ── Logout ───────────────────────────────────────────────────────────────────

pub struct LogoutUseCase<S: SessionStore> {
    pub sessions: S,
}

impl<S: SessionStore> LogoutUseCase<S> {
    /// Destroy the caller's session if there is one. Logging out twice succeeds.
    pub async fn execute(&self, session: &SessionContext) -> Result<(), MarketError> {
        let Some(token) = session.token() else {
            return Ok(());
        };
        self.sessions.destroy(token).await.map_err(|e| match e {
            MarketError::Internal(e) => MarketError::Session(e),
            other => other,
        })?;
        if let Some(user_id) = session.user_id() {
            info!(user_id = %user_id, "session ended");
        }
        Ok(())
    }
}
