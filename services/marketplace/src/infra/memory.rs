//! In-memory storage adapter.
//!
//! Every collection lives behind one `tokio::sync::RwLock`, so each repository
//! call is a single atomic read or write. Data is lost on restart.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use agrilink_domain::id::{ApplicationId, EquipmentId, JobId, OtpId, UserId};

use crate::domain::repository::{
    ApplicationRepository, EquipmentRepository, JobRepository, OtpRepository, UserRepository,
};
use crate::domain::types::{
    Equipment, EquipmentPatch, Job, JobApplication, JobPatch, OtpRecord, User,
};
use crate::error::MarketError;

/// Rows keyed by id, iterated in insertion order.
#[derive(Debug)]
struct Table<K, V> {
    rows: HashMap<K, V>,
    order: Vec<K>,
}

impl<K, V> Default for Table<K, V> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<K: Copy + Eq + Hash, V> Table<K, V> {
    /// Add a new row. An id that is already stored is refused and the existing row is kept.
    fn insert(&mut self, id: K, row: V) -> Result<(), MarketError> {
        if self.rows.contains_key(&id) {
            return Err(anyhow::anyhow!("duplicate row id").into());
        }
        self.rows.insert(id, row);
        self.order.push(id);
        Ok(())
    }

    fn get(&self, id: &K) -> Option<&V> {
        self.rows.get(id)
    }

    fn get_mut(&mut self, id: &K) -> Option<&mut V> {
        self.rows.get_mut(id)
    }

    fn remove(&mut self, id: &K) -> Option<V> {
        let row = self.rows.remove(id)?;
        self.order.retain(|k| k != id);
        Some(row)
    }

    fn iter(&self) -> impl Iterator<Item = &V> {
        self.order.iter().filter_map(|k| self.rows.get(k))
    }
}

#[derive(Debug, Default)]
struct Tables {
    users: Table<UserId, User>,
    users_by_phone: HashMap<String, UserId>,
    otps: Table<OtpId, OtpRecord>,
    otps_by_phone: HashMap<String, Vec<OtpId>>,
    jobs: Table<JobId, Job>,
    equipment: Table<EquipmentId, Equipment>,
    applications: Table<ApplicationId, JobApplication>,
}

/// Shared handle to the in-memory tables. Cheap to clone.
#[derive(Clone, Default)]
pub struct MemoryDb {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }
}

// ── User repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MemUserRepository {
    pub db: MemoryDb,
}

impl UserRepository for MemUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, MarketError> {
        Ok(self.db.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, MarketError> {
        let tables = self.db.tables.read().await;
        Ok(tables
            .users_by_phone
            .get(phone)
            .and_then(|id| tables.users.get(id))
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<(), MarketError> {
        let mut tables = self.db.tables.write().await;
        if tables.users_by_phone.contains_key(&user.phone) {
            return Err(MarketError::UserAlreadyExists);
        }
        tables.users.insert(user.id, user.clone())?;
        tables.users_by_phone.insert(user.phone.clone(), user.id);
        Ok(())
    }
}

// ── OTP repository ────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MemOtpRepository {
    pub db: MemoryDb,
}

impl OtpRepository for MemOtpRepository {
    async fn create(&self, otp: &OtpRecord) -> Result<(), MarketError> {
        let mut tables = self.db.tables.write().await;
        tables.otps.insert(otp.id, otp.clone())?;
        tables
            .otps_by_phone
            .entry(otp.phone.clone())
            .or_default()
            .push(otp.id);
        Ok(())
    }

    async fn find_latest_active(
        &self,
        phone: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<OtpRecord>, MarketError> {
        let tables = self.db.tables.read().await;
        let Some(ids) = tables.otps_by_phone.get(phone) else {
            return Ok(None);
        };
        // Walk newest-inserted first so equal timestamps keep the later record.
        let mut latest: Option<&OtpRecord> = None;
        for otp in ids.iter().rev().filter_map(|id| tables.otps.get(id)) {
            if !otp.is_active(now) {
                continue;
            }
            match latest {
                Some(current) if otp.created_at <= current.created_at => {}
                _ => latest = Some(otp),
            }
        }
        Ok(latest.cloned())
    }

    async fn delete(&self, id: OtpId) -> Result<bool, MarketError> {
        let mut tables = self.db.tables.write().await;
        let Some(otp) = tables.otps.remove(&id) else {
            return Ok(false);
        };
        if let Some(ids) = tables.otps_by_phone.get_mut(&otp.phone) {
            ids.retain(|k| *k != id);
            if ids.is_empty() {
                tables.otps_by_phone.remove(&otp.phone);
            }
        }
        Ok(true)
    }
}

// ── Job repository ────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MemJobRepository {
    pub db: MemoryDb,
}

impl JobRepository for MemJobRepository {
    async fn create(&self, job: &Job) -> Result<(), MarketError> {
        self.db.tables.write().await.jobs.insert(job.id, job.clone())
    }

    async fn find_by_id(&self, id: JobId) -> Result<Option<Job>, MarketError> {
        Ok(self.db.tables.read().await.jobs.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Job>, MarketError> {
        Ok(self.db.tables.read().await.jobs.iter().cloned().collect())
    }

    async fn list_by_farmer(&self, farmer_id: UserId) -> Result<Vec<Job>, MarketError> {
        let tables = self.db.tables.read().await;
        Ok(tables
            .jobs
            .iter()
            .filter(|j| j.farmer_id == farmer_id)
            .cloned()
            .collect())
    }

    async fn update(&self, id: JobId, patch: JobPatch) -> Result<Option<Job>, MarketError> {
        let mut tables = self.db.tables.write().await;
        Ok(tables.jobs.get_mut(&id).map(|job| {
            patch.apply(job);
            job.clone()
        }))
    }

    async fn delete(&self, id: JobId) -> Result<bool, MarketError> {
        Ok(self.db.tables.write().await.jobs.remove(&id).is_some())
    }
}

// ── Equipment repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MemEquipmentRepository {
    pub db: MemoryDb,
}

impl EquipmentRepository for MemEquipmentRepository {
    async fn create(&self, equipment: &Equipment) -> Result<(), MarketError> {
        self.db
            .tables
            .write()
            .await
            .equipment
            .insert(equipment.id, equipment.clone())
    }

    async fn find_by_id(&self, id: EquipmentId) -> Result<Option<Equipment>, MarketError> {
        Ok(self.db.tables.read().await.equipment.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Equipment>, MarketError> {
        Ok(self.db.tables.read().await.equipment.iter().cloned().collect())
    }

    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<Equipment>, MarketError> {
        let tables = self.db.tables.read().await;
        Ok(tables
            .equipment
            .iter()
            .filter(|e| e.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: EquipmentId,
        patch: EquipmentPatch,
    ) -> Result<Option<Equipment>, MarketError> {
        let mut tables = self.db.tables.write().await;
        Ok(tables.equipment.get_mut(&id).map(|equipment| {
            patch.apply(equipment);
            equipment.clone()
        }))
    }

    async fn delete(&self, id: EquipmentId) -> Result<bool, MarketError> {
        Ok(self.db.tables.write().await.equipment.remove(&id).is_some())
    }
}

// ── Application repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MemApplicationRepository {
    pub db: MemoryDb,
}

impl ApplicationRepository for MemApplicationRepository {
    async fn create(&self, application: &JobApplication) -> Result<(), MarketError> {
        self.db
            .tables
            .write()
            .await
            .applications
            .insert(application.id, application.clone())
    }

    async fn exists(&self, job_id: JobId, worker_id: UserId) -> Result<bool, MarketError> {
        let tables = self.db.tables.read().await;
        Ok(tables
            .applications
            .iter()
            .any(|a| a.job_id == job_id && a.worker_id == worker_id))
    }

    async fn list_by_job(&self, job_id: JobId) -> Result<Vec<JobApplication>, MarketError> {
        let tables = self.db.tables.read().await;
        Ok(tables
            .applications
            .iter()
            .filter(|a| a.job_id == job_id)
            .cloned()
            .collect())
    }

    async fn list_by_worker(
        &self,
        worker_id: UserId,
    ) -> Result<Vec<JobApplication>, MarketError> {
        let tables = self.db.tables.read().await;
        Ok(tables
            .applications
            .iter()
            .filter(|a| a.worker_id == worker_id)
            .cloned()
            .collect())
    }

    async fn delete_by_job(&self, job_id: JobId) -> Result<usize, MarketError> {
        let mut tables = self.db.tables.write().await;
        let doomed: Vec<ApplicationId> = tables
            .applications
            .iter()
            .filter(|a| a.job_id == job_id)
            .map(|a| a.id)
            .collect();
        for id in &doomed {
            tables.applications.remove(id);
        }
        Ok(doomed.len())
    }
}
