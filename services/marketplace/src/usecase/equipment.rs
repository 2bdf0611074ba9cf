use chrono::Utc;
use tracing::info;

use agrilink_domain::equipment::EquipmentAvailability;
use agrilink_domain::id::EquipmentId;
use agrilink_domain::user::UserRole;

use crate::domain::repository::{EquipmentRepository, UserRepository};
use crate::domain::types::{Equipment, EquipmentPatch, SessionContext};
use crate::error::MarketError;
use crate::usecase::access::{ensure_owner, require_role, require_session};
use crate::usecase::{ListScope, require_text};

// ── CreateEquipment ──────────────────────────────────────────────────────────

pub struct CreateEquipmentInput {
    pub name: String,
    pub equipment_type: String,
    pub location: String,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub price_per_day: String,
    pub price_per_week: String,
    pub availability: Option<EquipmentAvailability>,
    pub description: String,
}

pub struct CreateEquipmentUseCase<U: UserRepository, E: EquipmentRepository> {
    pub users: U,
    pub equipment: E,
}

impl<U: UserRepository, E: EquipmentRepository> CreateEquipmentUseCase<U, E> {
    pub async fn execute(
        &self,
        session: &SessionContext,
        input: CreateEquipmentInput,
    ) -> Result<Equipment, MarketError> {
        let provider = require_role(&self.users, session, UserRole::Rental).await?;
        require_text(&[
            ("name", Some(input.name.as_str())),
            ("type", Some(input.equipment_type.as_str())),
            ("location", Some(input.location.as_str())),
            ("pricePerDay", Some(input.price_per_day.as_str())),
            ("pricePerWeek", Some(input.price_per_week.as_str())),
            ("description", Some(input.description.as_str())),
        ])?;

        let item = Equipment {
            id: EquipmentId::new(),
            owner_id: provider.id,
            name: input.name,
            equipment_type: input.equipment_type,
            location: input.location,
            latitude: input.latitude,
            longitude: input.longitude,
            price_per_day: input.price_per_day,
            price_per_week: input.price_per_week,
            availability: input.availability.unwrap_or_default(),
            description: input.description,
            created_at: Utc::now(),
        };
        self.equipment.create(&item).await?;
        info!(equipment_id = %item.id, owner_id = %item.owner_id, "equipment listed");
        Ok(item)
    }
}

// ── GetEquipment / ListEquipment ─────────────────────────────────────────────

pub struct GetEquipmentUseCase<E: EquipmentRepository> {
    pub equipment: E,
}

impl<E: EquipmentRepository> GetEquipmentUseCase<E> {
    pub async fn execute(&self, id: EquipmentId) -> Result<Equipment, MarketError> {
        self.equipment
            .find_by_id(id)
            .await?
            .ok_or(MarketError::EquipmentNotFound)
    }
}

pub struct ListEquipmentUseCase<E: EquipmentRepository> {
    pub equipment: E,
}

impl<E: EquipmentRepository> ListEquipmentUseCase<E> {
    pub async fn execute(&self, scope: ListScope) -> Result<Vec<Equipment>, MarketError> {
        match scope {
            ListScope::All => self.equipment.list_all().await,
            ListScope::Owner(owner_id) => self.equipment.list_by_owner(owner_id).await,
        }
    }
}

pub struct ListMyEquipmentUseCase<E: EquipmentRepository> {
    pub equipment: E,
}

impl<E: EquipmentRepository> ListMyEquipmentUseCase<E> {
    pub async fn execute(&self, session: &SessionContext) -> Result<Vec<Equipment>, MarketError> {
        let user_id = require_session(session)?;
        self.equipment.list_by_owner(user_id).await
    }
}

// ── UpdateEquipment ──────────────────────────────────────────────────────────

pub struct UpdateEquipmentUseCase<E: EquipmentRepository> {
    pub equipment: E,
}

impl<E: EquipmentRepository> UpdateEquipmentUseCase<E> {
    pub async fn execute(
        &self,
        session: &SessionContext,
        id: EquipmentId,
        patch: EquipmentPatch,
    ) -> Result<Equipment, MarketError> {
        let user_id = require_session(session)?;
        let item = self
            .equipment
            .find_by_id(id)
            .await?
            .ok_or(MarketError::EquipmentNotFound)?;
        ensure_owner(user_id, item.owner_id)?;
        require_text(&patch.required_text())?;

        self.equipment
            .update(id, patch)
            .await?
            .ok_or(MarketError::EquipmentNotFound)
    }
}

// ── DeleteEquipment ──────────────────────────────────────────────────────────

pub struct DeleteEquipmentUseCase<E: EquipmentRepository> {
    pub equipment: E,
}

impl<E: EquipmentRepository> DeleteEquipmentUseCase<E> {
    pub async fn execute(&self, session: &SessionContext, id: EquipmentId) -> Result<(), MarketError> {
        let user_id = require_session(session)?;
        let item = self
            .equipment
            .find_by_id(id)
            .await?
            .ok_or(MarketError::EquipmentNotFound)?;
        ensure_owner(user_id, item.owner_id)?;

        self.equipment.delete(id).await?;
        info!(equipment_id = %id, "equipment deleted");
        Ok(())
    }
}
