use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Marketplace service error variants.
#[derive(Debug, thiserror::Error)]
pub enum MarketError {
    #[error("invalid request")]
    InvalidRequest,
    #[error("invalid {0}")]
    Validation(&'static str),
    #[error("invalid or expired otp")]
    InvalidOrExpiredCode,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("already applied to job")]
    AlreadyApplied,
    #[error("not authenticated")]
    NotAuthenticated,
    #[error("forbidden")]
    Forbidden,
    #[error("user not found")]
    UserNotFound,
    #[error("job not found")]
    JobNotFound,
    #[error("equipment not found")]
    EquipmentNotFound,
    #[error("session error")]
    Session(#[source] anyhow::Error),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl MarketError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::Validation(_) => "VALIDATION",
            Self::InvalidOrExpiredCode => "INVALID_OR_EXPIRED_CODE",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::AlreadyApplied => "ALREADY_APPLIED",
            Self::NotAuthenticated => "NOT_AUTHENTICATED",
            Self::Forbidden => "FORBIDDEN",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::JobNotFound => "JOB_NOT_FOUND",
            Self::EquipmentNotFound => "EQUIPMENT_NOT_FOUND",
            Self::Session(_) => "SESSION",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest
            | Self::Validation(_)
            | Self::InvalidOrExpiredCode
            | Self::UserAlreadyExists
            | Self::AlreadyApplied => StatusCode::BAD_REQUEST,
            Self::NotAuthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UserNotFound | Self::JobNotFound | Self::EquipmentNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::Session(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for MarketError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "rejected request body");
        Self::InvalidRequest
    }
}

impl IntoResponse for MarketError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Only 5xx are logged.
        match &self {
            Self::Session(e) => tracing::error!(error = %e, kind = "SESSION", "session error"),
            Self::Internal(e) => tracing::error!(error = %e, kind = "INTERNAL", "internal error"),
            _ => {}
        }
        let body = serde_json::json!({
            "error": self.to_string(),
            "kind": self.kind(),
        });
        (status, axum::Json(body)).into_response()
    }
}
