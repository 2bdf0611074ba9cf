use agrilink_auth_types::cookie::SessionCookie;

use crate::config::MarketConfig;
use crate::infra::memory::{
    MemApplicationRepository, MemEquipmentRepository, MemJobRepository, MemOtpRepository,
    MemUserRepository, MemoryDb,
};
use crate::infra::session::MemorySessionStore;
use crate::infra::sms::LogOtpDelivery;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: MemoryDb,
    pub sessions: MemorySessionStore,
    pub cookie: SessionCookie,
}

impl AppState {
    pub fn new(config: &MarketConfig) -> Self {
        Self {
            db: MemoryDb::new(),
            sessions: MemorySessionStore::new(config.session_ttl()),
            cookie: config.session_cookie(),
        }
    }

    pub fn user_repo(&self) -> MemUserRepository {
        MemUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn otp_repo(&self) -> MemOtpRepository {
        MemOtpRepository {
            db: self.db.clone(),
        }
    }

    pub fn job_repo(&self) -> MemJobRepository {
        MemJobRepository {
            db: self.db.clone(),
        }
    }

    pub fn equipment_repo(&self) -> MemEquipmentRepository {
        MemEquipmentRepository {
            db: self.db.clone(),
        }
    }

    pub fn application_repo(&self) -> MemApplicationRepository {
        MemApplicationRepository {
            db: self.db.clone(),
        }
    }

    pub fn session_store(&self) -> MemorySessionStore {
        self.sessions.clone()
    }

    pub fn otp_delivery(&self) -> LogOtpDelivery {
        LogOtpDelivery
    }
}
