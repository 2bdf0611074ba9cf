use agrilink_domain::equipment::EquipmentAvailability;
use agrilink_domain::id::EquipmentId;
use agrilink_domain::user::UserRole;

use agrilink_marketplace::domain::repository::EquipmentRepository;
use agrilink_marketplace::domain::types::{EquipmentPatch, SessionContext};
use agrilink_marketplace::error::MarketError;
use agrilink_marketplace::infra::memory::{MemEquipmentRepository, MemUserRepository};
use agrilink_marketplace::usecase::ListScope;
use agrilink_marketplace::usecase::equipment::{
    CreateEquipmentUseCase, DeleteEquipmentUseCase, GetEquipmentUseCase, ListEquipmentUseCase,
    ListMyEquipmentUseCase, UpdateEquipmentUseCase,
};

use crate::helpers::{Harness, equipment_input};

fn create_usecase(
    h: &Harness,
) -> CreateEquipmentUseCase<MemUserRepository, MemEquipmentRepository> {
    CreateEquipmentUseCase {
        users: h.users(),
        equipment: h.equipment(),
    }
}

// ── CreateEquipmentUseCase ───────────────────────────────────────────────────

#[tokio::test]
async fn should_list_equipment_as_rental_provider() {
    let h = Harness::new();
    let provider = h.signed_up("+15550004444", "Kisan Rentals", UserRole::Rental).await;

    let item = create_usecase(&h)
        .execute(&provider, equipment_input())
        .await
        .unwrap();

    assert_eq!(Some(item.owner_id), provider.user_id());
    assert_eq!(item.availability, EquipmentAvailability::Available);
    assert_eq!(item.latitude.as_deref(), Some("18.52"));
}

#[tokio::test]
async fn should_forbid_farmer_from_listing_equipment() {
    let h = Harness::new();
    let farmer = h.signed_up("+15550001111", "Ada", UserRole::Farmer).await;

    let result = create_usecase(&h).execute(&farmer, equipment_input()).await;
    assert!(
        matches!(result, Err(MarketError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_blank_equipment_type() {
    let h = Harness::new();
    let provider = h.signed_up("+15550004444", "Kisan Rentals", UserRole::Rental).await;

    let mut input = equipment_input();
    input.equipment_type = String::new();
    let result = create_usecase(&h).execute(&provider, input).await;
    assert!(
        matches!(result, Err(MarketError::Validation("type"))),
        "expected Validation(type), got {result:?}"
    );
}

// ── List / Get ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_equipment_by_scope() {
    let h = Harness::new();
    let a = h.signed_up("+15550004444", "A Rentals", UserRole::Rental).await;
    let b = h.signed_up("+15550005555", "B Rentals", UserRole::Rental).await;

    let first = create_usecase(&h).execute(&a, equipment_input()).await.unwrap();
    let second = create_usecase(&h).execute(&b, equipment_input()).await.unwrap();

    let list = ListEquipmentUseCase {
        equipment: h.equipment(),
    };
    let all: Vec<EquipmentId> = list
        .execute(ListScope::All)
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(all, vec![first.id, second.id]);

    let owned = list
        .execute(ListScope::Owner(b.user_id().unwrap()))
        .await
        .unwrap();
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].id, second.id);

    let mine = ListMyEquipmentUseCase {
        equipment: h.equipment(),
    }
    .execute(&a)
    .await
    .unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, first.id);
}

#[tokio::test]
async fn should_require_session_for_my_equipment() {
    let h = Harness::new();
    let result = ListMyEquipmentUseCase {
        equipment: h.equipment(),
    }
    .execute(&SessionContext::anonymous())
    .await;
    assert!(
        matches!(result, Err(MarketError::NotAuthenticated)),
        "expected NotAuthenticated, got {result:?}"
    );
}

// ── UpdateEquipmentUseCase ───────────────────────────────────────────────────

#[tokio::test]
async fn should_update_owned_equipment() {
    let h = Harness::new();
    let provider = h.signed_up("+15550004444", "Kisan Rentals", UserRole::Rental).await;
    let item = create_usecase(&h)
        .execute(&provider, equipment_input())
        .await
        .unwrap();

    let patch = EquipmentPatch {
        availability: Some(EquipmentAvailability::Rented),
        price_per_day: Some("1800".to_owned()),
        ..EquipmentPatch::default()
    };
    let updated = UpdateEquipmentUseCase {
        equipment: h.equipment(),
    }
    .execute(&provider, item.id, patch)
    .await
    .unwrap();

    assert_eq!(updated.availability, EquipmentAvailability::Rented);
    assert_eq!(updated.price_per_day, "1800");
    assert_eq!(updated.owner_id, item.owner_id);
    assert_eq!(updated.name, item.name);

    let stored = h.equipment().find_by_id(item.id).await.unwrap().unwrap();
    assert_eq!(stored.availability, EquipmentAvailability::Rented);
}

#[tokio::test]
async fn should_forbid_updating_another_providers_equipment() {
    let h = Harness::new();
    let owner = h.signed_up("+15550004444", "A Rentals", UserRole::Rental).await;
    let other = h.signed_up("+15550005555", "B Rentals", UserRole::Rental).await;
    let item = create_usecase(&h)
        .execute(&owner, equipment_input())
        .await
        .unwrap();

    let result = UpdateEquipmentUseCase {
        equipment: h.equipment(),
    }
    .execute(&other, item.id, EquipmentPatch::default())
    .await;
    assert!(
        matches!(result, Err(MarketError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
}

#[tokio::test]
async fn should_report_unknown_equipment_on_update() {
    let h = Harness::new();
    let provider = h.signed_up("+15550004444", "Kisan Rentals", UserRole::Rental).await;

    let result = UpdateEquipmentUseCase {
        equipment: h.equipment(),
    }
    .execute(&provider, EquipmentId::new(), EquipmentPatch::default())
    .await;
    assert!(
        matches!(result, Err(MarketError::EquipmentNotFound)),
        "expected EquipmentNotFound, got {result:?}"
    );
}

// ── DeleteEquipmentUseCase ───────────────────────────────────────────────────

#[tokio::test]
async fn should_forbid_non_owner_then_allow_owner_delete() {
    let h = Harness::new();
    let owner = h.signed_up("+15550004444", "A Rentals", UserRole::Rental).await;
    let other = h.signed_up("+15550005555", "B Rentals", UserRole::Rental).await;
    let item = create_usecase(&h)
        .execute(&owner, equipment_input())
        .await
        .unwrap();

    let delete = DeleteEquipmentUseCase {
        equipment: h.equipment(),
    };
    let result = delete.execute(&other, item.id).await;
    assert!(
        matches!(result, Err(MarketError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );

    delete.execute(&owner, item.id).await.unwrap();
    let result = GetEquipmentUseCase {
        equipment: h.equipment(),
    }
    .execute(item.id)
    .await;
    assert!(
        matches!(result, Err(MarketError::EquipmentNotFound)),
        "expected EquipmentNotFound, got {result:?}"
    );
}
