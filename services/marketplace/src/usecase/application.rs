use chrono::Utc;
use tracing::info;

use agrilink_domain::id::{ApplicationId, JobId};
use agrilink_domain::user::UserRole;

use crate::domain::repository::{ApplicationRepository, JobRepository, UserRepository};
use crate::domain::types::{JobApplication, SessionContext};
use crate::error::MarketError;
use crate::usecase::access::{require_role, require_session};

// ── ApplyToJob ───────────────────────────────────────────────────────────────

pub struct ApplyToJobUseCase<U, J, A>
where
    U: UserRepository,
    J: JobRepository,
    A: ApplicationRepository,
{
    pub users: U,
    pub jobs: J,
    pub applications: A,
}

impl<U, J, A> ApplyToJobUseCase<U, J, A>
where
    U: UserRepository,
    J: JobRepository,
    A: ApplicationRepository,
{
    pub async fn execute(
        &self,
        session: &SessionContext,
        job_id: JobId,
    ) -> Result<JobApplication, MarketError> {
        let worker = require_role(&self.users, session, UserRole::Coolie).await?;
        if self.jobs.find_by_id(job_id).await?.is_none() {
            return Err(MarketError::JobNotFound);
        }
        if self.applications.exists(job_id, worker.id).await? {
            return Err(MarketError::AlreadyApplied);
        }

        let application = JobApplication {
            id: ApplicationId::new(),
            job_id,
            worker_id: worker.id,
            applied_at: Utc::now(),
        };
        self.applications.create(&application).await?;
        info!(application_id = %application.id, job_id = %job_id, "application created");
        Ok(application)
    }
}

// ── ListApplications ─────────────────────────────────────────────────────────

pub struct ListJobApplicationsUseCase<A: ApplicationRepository> {
    pub applications: A,
}

impl<A: ApplicationRepository> ListJobApplicationsUseCase<A> {
    pub async fn execute(&self, job_id: JobId) -> Result<Vec<JobApplication>, MarketError> {
        self.applications.list_by_job(job_id).await
    }
}

pub struct ListMyApplicationsUseCase<A: ApplicationRepository> {
    pub applications: A,
}

impl<A: ApplicationRepository> ListMyApplicationsUseCase<A> {
    pub async fn execute(
        &self,
        session: &SessionContext,
    ) -> Result<Vec<JobApplication>, MarketError> {
        let user_id = require_session(session)?;
        self.applications.list_by_worker(user_id).await
    }
}
