use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::extract::{CookieJar, WithRejection};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agrilink_domain::user::UserRole;

use crate::domain::types::{SessionContext, User};
use crate::error::MarketError;
use crate::handlers::SuccessResponse;
use crate::state::AppState;
use crate::usecase::auth::{
    CurrentUserUseCase, LoginInput, LoginUseCase, LogoutUseCase, RegisterInput, RegisterUseCase,
};
use crate::usecase::otp::{RandomOtpGenerator, SendOtpInput, SendOtpUseCase};

/// Public projection of a user returned after register and login.
#[derive(Serialize)]
pub struct PublicUser {
    pub id: String,
    pub name: String,
    pub role: UserRole,
    pub phone: String,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            role: user.role,
            phone: user.phone,
        }
    }
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub user: PublicUser,
}

// ── POST /api/auth/send-otp ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SendOtpRequest {
    pub phone: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpResponse {
    pub success: bool,
    pub message: &'static str,
    #[serde(serialize_with = "agrilink_core::serde::to_rfc3339_ms")]
    pub expires_at: DateTime<Utc>,
}

pub async fn send_otp(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<SendOtpRequest>, MarketError>,
) -> Result<Json<SendOtpResponse>, MarketError> {
    let usecase = SendOtpUseCase {
        otps: state.otp_repo(),
        delivery: state.otp_delivery(),
        generator: RandomOtpGenerator,
    };
    let out = usecase.execute(SendOtpInput { phone: body.phone }).await?;
    Ok(Json(SendOtpResponse {
        success: true,
        message: "OTP sent successfully",
        expires_at: out.expires_at,
    }))
}

// ── POST /api/auth/register ──────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub phone: String,
    pub otp: String,
    pub name: String,
    pub role: UserRole,
    pub location: String,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub farm_size: Option<i32>,
    pub vehicle_type: Option<String>,
}

pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(body), _): WithRejection<Json<RegisterRequest>, MarketError>,
) -> Result<impl IntoResponse, MarketError> {
    let usecase = RegisterUseCase {
        users: state.user_repo(),
        otps: state.otp_repo(),
        sessions: state.session_store(),
    };
    let out = usecase
        .execute(RegisterInput {
            phone: body.phone,
            code: body.otp,
            name: body.name,
            role: body.role,
            location: body.location,
            latitude: body.latitude,
            longitude: body.longitude,
            farm_size: body.farm_size,
            vehicle_type: body.vehicle_type,
        })
        .await?;

    let jar = state.cookie.set(jar, out.session_token);
    let body = AuthResponse {
        success: true,
        user: out.user.into(),
    };
    Ok((jar, Json(body)))
}

// ── POST /api/auth/login ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub phone: String,
    pub otp: String,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(body), _): WithRejection<Json<LoginRequest>, MarketError>,
) -> Result<impl IntoResponse, MarketError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        otps: state.otp_repo(),
        sessions: state.session_store(),
    };
    let out = usecase
        .execute(LoginInput {
            phone: body.phone,
            code: body.otp,
        })
        .await?;

    let jar = state.cookie.set(jar, out.session_token);
    let body = AuthResponse {
        success: true,
        user: out.user.into(),
    };
    Ok((jar, Json(body)))
}

// ── GET /api/auth/me ─────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub name: String,
    pub role: UserRole,
    pub phone: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub farm_size: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,
    #[serde(serialize_with = "agrilink_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct MeResponse {
    pub success: bool,
    pub user: ProfileResponse,
}

pub async fn me(
    State(state): State<AppState>,
    session: SessionContext,
) -> Result<Json<MeResponse>, MarketError> {
    let usecase = CurrentUserUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(&session).await?;
    Ok(Json(MeResponse {
        success: true,
        user: ProfileResponse {
            id: user.id.to_string(),
            name: user.name,
            role: user.role,
            phone: user.phone,
            location: user.location,
            latitude: user.latitude,
            longitude: user.longitude,
            farm_size: user.farm_size,
            vehicle_type: user.vehicle_type,
            created_at: user.created_at,
        },
    }))
}

// ── POST /api/auth/logout ────────────────────────────────────────────────────

pub async fn logout(
    State(state): State<AppState>,
    session: SessionContext,
    jar: CookieJar,
) -> Result<impl IntoResponse, MarketError> {
    let usecase = LogoutUseCase {
        sessions: state.session_store(),
    };
    usecase.execute(&session).await?;
    let jar = state.cookie.clear(jar);
    Ok((jar, Json(SuccessResponse::ok())))
}
