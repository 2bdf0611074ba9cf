use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agrilink_domain::equipment::EquipmentAvailability;
use agrilink_domain::id::{EquipmentId, UserId};

use crate::domain::types::{Equipment, EquipmentPatch, SessionContext};
use crate::error::MarketError;
use crate::handlers::{SuccessResponse, path_id};
use crate::state::AppState;
use crate::usecase::ListScope;
use crate::usecase::equipment::{
    CreateEquipmentInput, CreateEquipmentUseCase, DeleteEquipmentUseCase, GetEquipmentUseCase,
    ListEquipmentUseCase, ListMyEquipmentUseCase, UpdateEquipmentUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentResponse {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub equipment_type: String,
    pub location: String,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub price_per_day: String,
    pub price_per_week: String,
    pub availability: EquipmentAvailability,
    pub description: String,
    #[serde(serialize_with = "agrilink_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<Equipment> for EquipmentResponse {
    fn from(item: Equipment) -> Self {
        Self {
            id: item.id.to_string(),
            owner_id: item.owner_id.to_string(),
            name: item.name,
            equipment_type: item.equipment_type,
            location: item.location,
            latitude: item.latitude,
            longitude: item.longitude,
            price_per_day: item.price_per_day,
            price_per_week: item.price_per_week,
            availability: item.availability,
            description: item.description,
            created_at: item.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct EquipmentEnvelope {
    pub success: bool,
    pub equipment: EquipmentResponse,
}

impl From<Equipment> for EquipmentEnvelope {
    fn from(item: Equipment) -> Self {
        Self {
            success: true,
            equipment: item.into(),
        }
    }
}

#[derive(Serialize)]
pub struct EquipmentListResponse {
    pub success: bool,
    pub equipment: Vec<EquipmentResponse>,
}

impl From<Vec<Equipment>> for EquipmentListResponse {
    fn from(items: Vec<Equipment>) -> Self {
        Self {
            success: true,
            equipment: items.into_iter().map(EquipmentResponse::from).collect(),
        }
    }
}

// ── POST /api/equipment ──────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEquipmentRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub equipment_type: String,
    pub location: String,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub price_per_day: String,
    pub price_per_week: String,
    pub availability: Option<EquipmentAvailability>,
    pub description: String,
}

pub async fn create_equipment(
    State(state): State<AppState>,
    session: SessionContext,
    WithRejection(Json(body), _): WithRejection<Json<CreateEquipmentRequest>, MarketError>,
) -> Result<Json<EquipmentEnvelope>, MarketError> {
    let usecase = CreateEquipmentUseCase {
        users: state.user_repo(),
        equipment: state.equipment_repo(),
    };
    let item = usecase
        .execute(
            &session,
            CreateEquipmentInput {
                name: body.name,
                equipment_type: body.equipment_type,
                location: body.location,
                latitude: body.latitude,
                longitude: body.longitude,
                price_per_day: body.price_per_day,
                price_per_week: body.price_per_week,
                availability: body.availability,
                description: body.description,
            },
        )
        .await?;
    Ok(Json(item.into()))
}

// ── GET /api/equipment, /api/equipment/owner/{owner_id}, /api/equipment/my ───

pub async fn list_equipment(
    State(state): State<AppState>,
) -> Result<Json<EquipmentListResponse>, MarketError> {
    let usecase = ListEquipmentUseCase {
        equipment: state.equipment_repo(),
    };
    Ok(Json(usecase.execute(ListScope::All).await?.into()))
}

pub async fn list_owner_equipment(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
) -> Result<Json<EquipmentListResponse>, MarketError> {
    let Ok(owner_id) = owner_id.parse::<UserId>() else {
        return Ok(Json(Vec::new().into()));
    };
    let usecase = ListEquipmentUseCase {
        equipment: state.equipment_repo(),
    };
    Ok(Json(usecase.execute(ListScope::Owner(owner_id)).await?.into()))
}

pub async fn list_my_equipment(
    State(state): State<AppState>,
    session: SessionContext,
) -> Result<Json<EquipmentListResponse>, MarketError> {
    let usecase = ListMyEquipmentUseCase {
        equipment: state.equipment_repo(),
    };
    Ok(Json(usecase.execute(&session).await?.into()))
}

// ── GET /api/equipment/{id} ──────────────────────────────────────────────────

pub async fn get_equipment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EquipmentEnvelope>, MarketError> {
    let id: EquipmentId = path_id(&id);
    let usecase = GetEquipmentUseCase {
        equipment: state.equipment_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── PATCH /api/equipment/{id} ────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEquipmentRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub equipment_type: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub price_per_day: Option<String>,
    pub price_per_week: Option<String>,
    pub availability: Option<EquipmentAvailability>,
    pub description: Option<String>,
}

impl From<UpdateEquipmentRequest> for EquipmentPatch {
    fn from(body: UpdateEquipmentRequest) -> Self {
        Self {
            name: body.name,
            equipment_type: body.equipment_type,
            location: body.location,
            latitude: body.latitude,
            longitude: body.longitude,
            price_per_day: body.price_per_day,
            price_per_week: body.price_per_week,
            availability: body.availability,
            description: body.description,
        }
    }
}

pub async fn update_equipment(
    State(state): State<AppState>,
    session: SessionContext,
    Path(id): Path<String>,
    WithRejection(Json(body), _): WithRejection<Json<UpdateEquipmentRequest>, MarketError>,
) -> Result<Json<EquipmentEnvelope>, MarketError> {
    let id: EquipmentId = path_id(&id);
    let usecase = UpdateEquipmentUseCase {
        equipment: state.equipment_repo(),
    };
    let item = usecase.execute(&session, id, body.into()).await?;
    Ok(Json(item.into()))
}

// ── DELETE /api/equipment/{id} ───────────────────────────────────────────────

pub async fn delete_equipment(
    State(state): State<AppState>,
    session: SessionContext,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, MarketError> {
    let id: EquipmentId = path_id(&id);
    let usecase = DeleteEquipmentUseCase {
        equipment: state.equipment_repo(),
    };
    usecase.execute(&session, id).await?;
    Ok(Json(SuccessResponse::ok()))
}
