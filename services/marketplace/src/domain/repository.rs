#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};

use agrilink_domain::id::{EquipmentId, JobId, OtpId, UserId};

use crate::domain::types::{
    Equipment, EquipmentPatch, Job, JobApplication, JobPatch, OtpRecord, User,
};
use crate::error::MarketError;

// Repositories store what they are given and never check roles or ownership;
// callers authorize first. Missing ids come back as `None` / `false`, not errors.
// `create` never overwrites: an id that is already stored is an error.

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, MarketError>;

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, MarketError>;

    /// Insert a user. Fails with `UserAlreadyExists` if the phone is taken.
    async fn create(&self, user: &User) -> Result<(), MarketError>;
}

/// Repository for one-time passcodes.
pub trait OtpRepository: Send + Sync {
    async fn create(&self, otp: &OtpRecord) -> Result<(), MarketError>;

    /// Newest record for `phone` that is still active at `now`.
    /// Records created at the same instant resolve to the last inserted.
    async fn find_latest_active(
        &self,
        phone: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<OtpRecord>, MarketError>;

    /// Delete a record. Returns `true` if it existed.
    async fn delete(&self, id: OtpId) -> Result<bool, MarketError>;
}

/// Repository for job postings. Listings are in insertion order.
pub trait JobRepository: Send + Sync {
    async fn create(&self, job: &Job) -> Result<(), MarketError>;

    async fn find_by_id(&self, id: JobId) -> Result<Option<Job>, MarketError>;

    async fn list_all(&self) -> Result<Vec<Job>, MarketError>;

    async fn list_by_farmer(&self, farmer_id: UserId) -> Result<Vec<Job>, MarketError>;

    /// Merge `patch` over the stored job. Returns the updated job, or `None` if absent.
    async fn update(&self, id: JobId, patch: JobPatch) -> Result<Option<Job>, MarketError>;

    /// Delete a job. Returns `true` if it existed.
    async fn delete(&self, id: JobId) -> Result<bool, MarketError>;
}

/// Repository for rental equipment. Listings are in insertion order.
pub trait EquipmentRepository: Send + Sync {
    async fn create(&self, equipment: &Equipment) -> Result<(), MarketError>;

    async fn find_by_id(&self, id: EquipmentId) -> Result<Option<Equipment>, MarketError>;

    async fn list_all(&self) -> Result<Vec<Equipment>, MarketError>;

    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<Equipment>, MarketError>;

    /// Merge `patch` over the stored item. Returns the updated item, or `None` if absent.
    async fn update(
        &self,
        id: EquipmentId,
        patch: EquipmentPatch,
    ) -> Result<Option<Equipment>, MarketError>;

    /// Delete an item. Returns `true` if it existed.
    async fn delete(&self, id: EquipmentId) -> Result<bool, MarketError>;
}

/// Repository for job applications. Listings are in insertion order.
pub trait ApplicationRepository: Send + Sync {
    async fn create(&self, application: &JobApplication) -> Result<(), MarketError>;

    async fn exists(&self, job_id: JobId, worker_id: UserId) -> Result<bool, MarketError>;

    async fn list_by_job(&self, job_id: JobId) -> Result<Vec<JobApplication>, MarketError>;

    async fn list_by_worker(&self, worker_id: UserId)
    -> Result<Vec<JobApplication>, MarketError>;

    /// Remove every application to `job_id`. Returns how many were removed.
    async fn delete_by_job(&self, job_id: JobId) -> Result<usize, MarketError>;
}

/// Server-side binding from opaque session tokens to user ids.
pub trait SessionStore: Send + Sync {
    /// Bind a fresh token to `user_id` and return the token.
    async fn create(&self, user_id: UserId) -> Result<String, MarketError>;

    /// Resolve a token. Unknown or expired tokens resolve to `None`.
    async fn resolve(&self, token: &str) -> Result<Option<UserId>, MarketError>;

    /// Destroy a binding. Destroying an unknown token is not an error.
    async fn destroy(&self, token: &str) -> Result<(), MarketError>;
}

/// Out-of-band delivery channel for OTP codes (SMS gateway in production).
pub trait OtpDelivery: Send + Sync {
    async fn deliver(&self, phone: &str, code: &str) -> Result<(), MarketError>;
}
