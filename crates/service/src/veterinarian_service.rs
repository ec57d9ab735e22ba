use uuid::Uuid;
use chrono::Utc;
use sea_orm::{DatabaseConnection, ActiveModelTrait, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use validator::Validate;

use models::veterinarian;
use crate::errors::ServiceError;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVeterinarianInput {
    #[validate(custom(function = "crate::validation::full_name"))]
    pub full_name: String,
    #[validate(custom(function = "crate::validation::not_blank"))]
    pub license_number: String,
    #[validate(custom(function = "crate::validation::not_blank"))]
    pub specialty: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVeterinarianInput {
    #[validate(custom(function = "crate::validation::full_name"))]
    pub full_name: Option<String>,
    #[validate(custom(function = "crate::validation::not_blank"))]
    pub license_number: Option<String>,
    #[validate(custom(function = "crate::validation::not_blank"))]
    pub specialty: Option<String>,
}

/// Create a veterinarian; a taken license number is a conflict.
#[instrument(skip(db, input))]
pub async fn create_veterinarian(db: &DatabaseConnection, input: CreateVeterinarianInput) -> Result<veterinarian::Model, ServiceError> {
    input.validate()?;
    if veterinarian::find_by_license(db, &input.license_number).await?.is_some() {
        return Err(ServiceError::Conflict("license number already registered".into()));
    }
    let created = veterinarian::create(db, &input.full_name, &input.license_number, &input.specialty).await?;
    info!(veterinarian_id = %created.id, "veterinarian_created");
    Ok(created)
}

pub async fn list_veterinarians(db: &DatabaseConnection) -> Result<Vec<veterinarian::Model>, ServiceError> {
    veterinarian::Entity::find()
        .order_by_asc(veterinarian::Column::FullName)
        .all(db)
        .await
        .map_err(ServiceError::db)
}

pub async fn get_veterinarian(db: &DatabaseConnection, id: Uuid) -> Result<veterinarian::Model, ServiceError> {
    veterinarian::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::not_found("veterinarian"))
}

#[instrument(skip(db, input))]
pub async fn update_veterinarian(db: &DatabaseConnection, id: Uuid, input: UpdateVeterinarianInput) -> Result<veterinarian::Model, ServiceError> {
    input.validate()?;
    let mut am: veterinarian::ActiveModel = get_veterinarian(db, id).await?.into();
    if let Some(license) = input.license_number {
        if let Some(other) = veterinarian::find_by_license(db, &license).await? {
            if other.id != id {
                return Err(ServiceError::Conflict("license number already registered".into()));
            }
        }
        am.license_number = Set(license.trim().to_string());
    }
    if let Some(name) = input.full_name { am.full_name = Set(name.trim().to_string()); }
    if let Some(specialty) = input.specialty { am.specialty = Set(specialty.trim().to_string()); }
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(ServiceError::db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn input(name: &str, license: &str) -> CreateVeterinarianInput {
        CreateVeterinarianInput { full_name: name.into(), license_number: license.into(), specialty: "general".into() }
    }

    #[tokio::test]
    async fn license_conflicts_on_create_and_update() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let first = create_veterinarian(&db, input("Dr. Soto", "VET-10")).await?;
        let second = create_veterinarian(&db, input("Dr. Rojas", "VET-11")).await?;
        assert!(matches!(create_veterinarian(&db, input("Dr. Copy", "VET-10")).await, Err(ServiceError::Conflict(_))));

        let clash = UpdateVeterinarianInput { license_number: Some("VET-10".into()), ..Default::default() };
        assert!(matches!(update_veterinarian(&db, second.id, clash).await, Err(ServiceError::Conflict(_))));

        let same = UpdateVeterinarianInput { license_number: Some("VET-10".into()), specialty: Some("surgery".into()), ..Default::default() };
        let kept = update_veterinarian(&db, first.id, same).await?;
        assert_eq!(kept.specialty, "surgery");
        assert_eq!(list_veterinarians(&db).await?.len(), 2);
        Ok(())
    }
}
