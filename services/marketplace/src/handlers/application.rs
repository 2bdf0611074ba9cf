use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use agrilink_domain::id::JobId;

use crate::domain::types::{JobApplication, SessionContext};
use crate::error::MarketError;
use crate::handlers::path_id;
use crate::state::AppState;
use crate::usecase::application::{
    ApplyToJobUseCase, ListJobApplicationsUseCase, ListMyApplicationsUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    pub id: String,
    pub job_id: String,
    pub worker_id: String,
    #[serde(serialize_with = "agrilink_core::serde::to_rfc3339_ms")]
    pub applied_at: DateTime<Utc>,
}

impl From<JobApplication> for ApplicationResponse {
    fn from(application: JobApplication) -> Self {
        Self {
            id: application.id.to_string(),
            job_id: application.job_id.to_string(),
            worker_id: application.worker_id.to_string(),
            applied_at: application.applied_at,
        }
    }
}

#[derive(Serialize)]
pub struct ApplicationEnvelope {
    pub success: bool,
    pub application: ApplicationResponse,
}

#[derive(Serialize)]
pub struct ApplicationListResponse {
    pub success: bool,
    pub applications: Vec<ApplicationResponse>,
}

impl From<Vec<JobApplication>> for ApplicationListResponse {
    fn from(applications: Vec<JobApplication>) -> Self {
        Self {
            success: true,
            applications: applications
                .into_iter()
                .map(ApplicationResponse::from)
                .collect(),
        }
    }
}

// ── POST /api/jobs/{id}/apply ────────────────────────────────────────────────

pub async fn apply_to_job(
    State(state): State<AppState>,
    session: SessionContext,
    Path(id): Path<String>,
) -> Result<Json<ApplicationEnvelope>, MarketError> {
    let job_id: JobId = path_id(&id);
    let usecase = ApplyToJobUseCase {
        users: state.user_repo(),
        jobs: state.job_repo(),
        applications: state.application_repo(),
    };
    let application = usecase.execute(&session, job_id).await?;
    Ok(Json(ApplicationEnvelope {
        success: true,
        application: application.into(),
    }))
}

// ── GET /api/jobs/{id}/applications ──────────────────────────────────────────

pub async fn list_job_applications(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApplicationListResponse>, MarketError> {
    let Ok(job_id) = id.parse::<JobId>() else {
        return Ok(Json(Vec::new().into()));
    };
    let usecase = ListJobApplicationsUseCase {
        applications: state.application_repo(),
    };
    Ok(Json(usecase.execute(job_id).await?.into()))
}

// ── GET /api/applications/my ─────────────────────────────────────────────────

pub async fn list_my_applications(
    State(state): State<AppState>,
    session: SessionContext,
) -> Result<Json<ApplicationListResponse>, MarketError> {
    let usecase = ListMyApplicationsUseCase {
        applications: state.application_repo(),
    };
    Ok(Json(usecase.execute(&session).await?.into()))
}
