use chrono::Utc;
use tracing::info;

use agrilink_domain::id::JobId;
use agrilink_domain::job::JobUrgency;
use agrilink_domain::user::UserRole;

use crate::domain::repository::{ApplicationRepository, JobRepository, UserRepository};
use crate::domain::types::{Job, JobPatch, SessionContext};
use crate::error::MarketError;
use crate::usecase::access::{ensure_owner, require_role, require_session};
use crate::usecase::{ListScope, require_text};

// ── CreateJob ────────────────────────────────────────────────────────────────

pub struct CreateJobInput {
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

pub struct CreateJobUseCase<U: UserRepository, J: JobRepository> {
    pub users: U,
    pub jobs: J,
}

impl<U: UserRepository, J: JobRepository> CreateJobUseCase<U, J> {
    pub async fn execute(
        &self,
        session: &SessionContext,
        input: CreateJobInput,
    ) -> Result<Job, MarketError> {
        let farmer = require_role(&self.users, session, UserRole::Farmer).await?;
        require_text(&[
            ("jobType", Some(input.job_type.as_str())),
            ("cropType", Some(input.crop_type.as_str())),
            ("location", Some(input.location.as_str())),
            ("wage", Some(input.wage.as_str())),
            ("duration", Some(input.duration.as_str())),
            ("startDate", Some(input.start_date.as_str())),
            ("description", Some(input.description.as_str())),
        ])?;

        let job = Job {
            id: JobId::new(),
            farmer_id: farmer.id,
            farm_name: farmer.name,
            job_type: input.job_type,
            crop_type: input.crop_type,
            location: input.location,
            latitude: input.latitude,
            longitude: input.longitude,
            wage: input.wage,
            duration: input.duration,
            start_date: input.start_date,
            description: input.description,
            urgency: input.urgency.unwrap_or_default(),
            created_at: Utc::now(),
        };
        self.jobs.create(&job).await?;
        info!(job_id = %job.id, farmer_id = %job.farmer_id, "job created");
        Ok(job)
    }
}

// ── GetJob / ListJobs ────────────────────────────────────────────────────────

pub struct GetJobUseCase<J: JobRepository> {
    pub jobs: J,
}

impl<J: JobRepository> GetJobUseCase<J> {
    pub async fn execute(&self, job_id: JobId) -> Result<Job, MarketError> {
        self.jobs
            .find_by_id(job_id)
            .await?
            .ok_or(MarketError::JobNotFound)
    }
}

pub struct ListJobsUseCase<J: JobRepository> {
    pub jobs: J,
}

impl<J: JobRepository> ListJobsUseCase<J> {
    pub async fn execute(&self, scope: ListScope) -> Result<Vec<Job>, MarketError> {
        match scope {
            ListScope::All => self.jobs.list_all().await,
            ListScope::Owner(farmer_id) => self.jobs.list_by_farmer(farmer_id).await,
        }
    }
}

pub struct ListMyJobsUseCase<J: JobRepository> {
    pub jobs: J,
}

impl<J: JobRepository> ListMyJobsUseCase<J> {
    pub async fn execute(&self, session: &SessionContext) -> Result<Vec<Job>, MarketError> {
        let user_id = require_session(session)?;
        self.jobs.list_by_farmer(user_id).await
    }
}

// ── UpdateJob ────────────────────────────────────────────────────────────────

pub struct UpdateJobUseCase<J: JobRepository> {
    pub jobs: J,
}

impl<J: JobRepository> UpdateJobUseCase<J> {
    pub async fn execute(
        &self,
        session: &SessionContext,
        job_id: JobId,
        patch: JobPatch,
    ) -> Result<Job, MarketError> {
        let user_id = require_session(session)?;
        let job = self
            .jobs
            .find_by_id(job_id)
            .await?
            .ok_or(MarketError::JobNotFound)?;
        ensure_owner(user_id, job.farmer_id)?;
        require_text(&patch.required_text())?;

        self.jobs
            .update(job_id, patch)
            .await?
            .ok_or(MarketError::JobNotFound)
    }
}

// ── DeleteJob ────────────────────────────────────────────────────────────────

pub struct DeleteJobUseCase<J: JobRepository, A: ApplicationRepository> {
    pub jobs: J,
    pub applications: A,
}

impl<J: JobRepository, A: ApplicationRepository> DeleteJobUseCase<J, A> {
    /// Delete an owned job along with its applications.
    pub async fn execute(&self, session: &SessionContext, job_id: JobId) -> Result<(), MarketError> {
        let user_id = require_session(session)?;
        let job = self
            .jobs
            .find_by_id(job_id)
            .await?
            .ok_or(MarketError::JobNotFound)?;
        ensure_owner(user_id, job.farmer_id)?;

        self.jobs.delete(job_id).await?;
        let removed = self.applications.delete_by_job(job_id).await?;
        info!(job_id = %job_id, applications = removed, "job deleted");
        Ok(())
    }
}
