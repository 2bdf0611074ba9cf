use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agrilink_domain::id::{JobId, UserId};
use agrilink_domain::job::JobUrgency;

use crate::domain::types::{Job, JobPatch, SessionContext};
use crate::error::MarketError;
use crate::handlers::{SuccessResponse, path_id};
use crate::state::AppState;
use crate::usecase::ListScope;
use crate::usecase::job::{
    CreateJobInput, CreateJobUseCase, DeleteJobUseCase, GetJobUseCase, ListJobsUseCase,
    ListMyJobsUseCase, UpdateJobUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResponse {
    pub id: String,
    pub farmer_id: String,
    pub farm_name: String,
    pub job_type: String,
    pub crop_type: String,
    pub location: String,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub wage: String,
    pub duration: String,
    pub start_date: String,
    pub description: String,
    pub urgency: JobUrgency,
    #[serde(serialize_with = "agrilink_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<Job> for JobResponse {
    fn from(job: Job) -> Self {
        Self {
            id: job.id.to_string(),
            farmer_id: job.farmer_id.to_string(),
            farm_name: job.farm_name,
            job_type: job.job_type,
            crop_type: job.crop_type,
            location: job.location,
            latitude: job.latitude,
            longitude: job.longitude,
            wage: job.wage,
            duration: job.duration,
            start_date: job.start_date,
            description: job.description,
            urgency: job.urgency,
            created_at: job.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct JobEnvelope {
    pub success: bool,
    pub job: JobResponse,
}

impl From<Job> for JobEnvelope {
    fn from(job: Job) -> Self {
        Self {
            success: true,
            job: job.into(),
        }
    }
}

#[derive(Serialize)]
pub struct JobListResponse {
    pub success: bool,
    pub jobs: Vec<JobResponse>,
}

impl From<Vec<Job>> for JobListResponse {
    fn from(jobs: Vec<Job>) -> Self {
        Self {
            success: true,
            jobs: jobs.into_iter().map(JobResponse::from).collect(),
        }
    }
}

// ── POST /api/jobs ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    pub job_type: String,
    pub crop_type: String,
    pub location: String,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub wage: String,
    pub duration: String,
    pub start_date: String,
    pub description: String,
    pub urgency: Option<JobUrgency>,
}

pub async fn create_job(
    State(state): State<AppState>,
    session: SessionContext,
    WithRejection(Json(body), _): WithRejection<Json<CreateJobRequest>, MarketError>,
) -> Result<Json<JobEnvelope>, MarketError> {
    let usecase = CreateJobUseCase {
        users: state.user_repo(),
        jobs: state.job_repo(),
    };
    let job = usecase
        .execute(
            &session,
            CreateJobInput {
                job_type: body.job_type,
                crop_type: body.crop_type,
                location: body.location,
                latitude: body.latitude,
                longitude: body.longitude,
                wage: body.wage,
                duration: body.duration,
                start_date: body.start_date,
                description: body.description,
                urgency: body.urgency,
            },
        )
        .await?;
    Ok(Json(job.into()))
}

// ── GET /api/jobs, /api/jobs/farmer/{farmer_id}, /api/jobs/my ────────────────

pub async fn list_jobs(State(state): State<AppState>) -> Result<Json<JobListResponse>, MarketError> {
    let usecase = ListJobsUseCase {
        jobs: state.job_repo(),
    };
    Ok(Json(usecase.execute(ListScope::All).await?.into()))
}

pub async fn list_farmer_jobs(
    State(state): State<AppState>,
    Path(farmer_id): Path<String>,
) -> Result<Json<JobListResponse>, MarketError> {
    let Ok(farmer_id) = farmer_id.parse::<UserId>() else {
        return Ok(Json(Vec::new().into()));
    };
    let usecase = ListJobsUseCase {
        jobs: state.job_repo(),
    };
    Ok(Json(usecase.execute(ListScope::Owner(farmer_id)).await?.into()))
}

pub async fn list_my_jobs(
    State(state): State<AppState>,
    session: SessionContext,
) -> Result<Json<JobListResponse>, MarketError> {
    let usecase = ListMyJobsUseCase {
        jobs: state.job_repo(),
    };
    Ok(Json(usecase.execute(&session).await?.into()))
}

// ── GET /api/jobs/{id} ───────────────────────────────────────────────────────

pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<JobEnvelope>, MarketError> {
    let job_id: JobId = path_id(&id);
    let usecase = GetJobUseCase {
        jobs: state.job_repo(),
    };
    Ok(Json(usecase.execute(job_id).await?.into()))
}

// ── PATCH /api/jobs/{id} ─────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobRequest {
    pub job_type: Option<String>,
    pub crop_type: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub wage: Option<String>,
    pub duration: Option<String>,
    pub start_date: Option<String>,
    pub description: Option<String>,
    pub urgency: Option<JobUrgency>,
}

impl From<UpdateJobRequest> for JobPatch {
    fn from(body: UpdateJobRequest) -> Self {
        Self {
            job_type: body.job_type,
            crop_type: body.crop_type,
            location: body.location,
            latitude: body.latitude,
            longitude: body.longitude,
            wage: body.wage,
            duration: body.duration,
            start_date: body.start_date,
            description: body.description,
            urgency: body.urgency,
        }
    }
}

pub async fn update_job(
    State(state): State<AppState>,
    session: SessionContext,
    Path(id): Path<String>,
    WithRejection(Json(body), _): WithRejection<Json<UpdateJobRequest>, MarketError>,
) -> Result<Json<JobEnvelope>, MarketError> {
    let job_id: JobId = path_id(&id);
    let usecase = UpdateJobUseCase {
        jobs: state.job_repo(),
    };
    let job = usecase.execute(&session, job_id, body.into()).await?;
    Ok(Json(job.into()))
}

// ── DELETE /api/jobs/{id} ────────────────────────────────────────────────────

pub async fn delete_job(
    State(state): State<AppState>,
    session: SessionContext,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, MarketError> {
    let job_id: JobId = path_id(&id);
    let usecase = DeleteJobUseCase {
        jobs: state.job_repo(),
        applications: state.application_repo(),
    };
    usecase.execute(&session, job_id).await?;
    Ok(Json(SuccessResponse::ok()))
}
