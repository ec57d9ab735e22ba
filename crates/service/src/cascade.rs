//! Deletes that must keep the Owner -> Pet -> MedicalRecord hierarchy free of
//! orphans.
//!
//! Each operation runs in one transaction. Foreign keys are `RESTRICT`, so
//! children are always removed before their parent.

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait};
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use models::{medical_record, owner, pet, veterinarian};
use crate::errors::ServiceError;

/// Rows removed alongside the requested entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeReport {
    pub pets_removed: u64,
    pub records_removed: u64,
}

#[instrument(skip(db))]
pub async fn delete_owner(db: &DatabaseConnection, owner_id: Uuid) -> Result<CascadeReport, ServiceError> {
    let txn = db.begin().await.map_err(ServiceError::db)?;
    if owner::Entity::find_by_id(owner_id).one(&txn).await.map_err(ServiceError::db)?.is_none() {
        return Err(ServiceError::not_found("owner"));
    }

    let pet_ids = pet::ids_by_owner(&txn, owner_id).await?;
    let records_removed = medical_record::delete_by_pets(&txn, &pet_ids).await?;
    let pets_removed = pet::Entity::delete_many()
        .filter(pet::Column::OwnerId.eq(owner_id))
        .exec(&txn)
        .await
        .map_err(ServiceError::db)?
        .rows_affected;
    owner::Entity::delete_by_id(owner_id).exec(&txn).await.map_err(ServiceError::db)?;
    txn.commit().await.map_err(ServiceError::db)?;

    let report = CascadeReport { pets_removed, records_removed };
    info!(owner_id = %owner_id, pets_removed, records_removed, "owner_deleted_cascade");
    Ok(report)
}

#[instrument(skip(db))]
pub async fn delete_pet(db: &DatabaseConnection, pet_id: Uuid) -> Result<CascadeReport, ServiceError> {
    let txn = db.begin().await.map_err(ServiceError::db)?;
    if pet::Entity::find_by_id(pet_id).one(&txn).await.map_err(ServiceError::db)?.is_none() {
        return Err(ServiceError::not_found("pet"));
    }

    let records_removed = medical_record::delete_by_pets(&txn, &[pet_id]).await?;
    pet::Entity::delete_by_id(pet_id).exec(&txn).await.map_err(ServiceError::db)?;
    txn.commit().await.map_err(ServiceError::db)?;

    info!(pet_id = %pet_id, records_removed, "pet_deleted_cascade");
    Ok(CascadeReport { pets_removed: 1, records_removed })
}

/// Veterinarians are only referenced, never owned: the delete is refused
/// while any medical record still points at them.
#[instrument(skip(db))]
pub async fn delete_veterinarian(db: &DatabaseConnection, veterinarian_id: Uuid) -> Result<(), ServiceError> {
    let txn = db.begin().await.map_err(ServiceError::db)?;
    if veterinarian::Entity::find_by_id(veterinarian_id).one(&txn).await.map_err(ServiceError::db)?.is_none() {
        return Err(ServiceError::not_found("veterinarian"));
    }
    let referencing = medical_record::count_by_veterinarian(&txn, veterinarian_id).await?;
    if referencing > 0 {
        return Err(ServiceError::Conflict(format!(
            "veterinarian is referenced by {} medical record(s)",
            referencing
        )));
    }
    veterinarian::Entity::delete_by_id(veterinarian_id).exec(&txn).await.map_err(ServiceError::db)?;
    txn.commit().await.map_err(ServiceError::db)?;

    info!(veterinarian_id = %veterinarian_id, "veterinarian_deleted");
    Ok(())
}
