use uuid::Uuid;
use chrono::Utc;
use sea_orm::{DatabaseConnection, ActiveModelTrait, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use validator::Validate;

use models::owner;
use crate::errors::ServiceError;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOwnerInput {
    #[validate(custom(function = "crate::validation::full_name"))]
    pub full_name: String,
    #[validate(custom(function = "crate::validation::phone"))]
    pub phone: String,
    #[validate(custom(function = "crate::validation::address"))]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOwnerInput {
    #[validate(custom(function = "crate::validation::full_name"))]
    pub full_name: Option<String>,
    #[validate(custom(function = "crate::validation::phone"))]
    pub phone: Option<String>,
    #[validate(custom(function = "crate::validation::address"))]
    pub address: Option<String>,
}

/// Create an owner.
#[instrument(skip(db, input))]
pub async fn create_owner(db: &DatabaseConnection, input: CreateOwnerInput) -> Result<owner::Model, ServiceError> {
    input.validate()?;
    let created = owner::create(db, &input.full_name, &input.phone, input.address.as_deref()).await?;
    info!(owner_id = %created.id, "owner_created");
    Ok(created)
}

pub async fn list_owners(db: &DatabaseConnection) -> Result<Vec<owner::Model>, ServiceError> {
    owner::Entity::find()
        .order_by_asc(owner::Column::CreatedAt)
        .all(db)
        .await
        .map_err(ServiceError::db)
}

pub async fn get_owner(db: &DatabaseConnection, id: Uuid) -> Result<owner::Model, ServiceError> {
    owner::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::not_found("owner"))
}

/// Apply the fields present in `input`; absent fields keep their value.
#[instrument(skip(db, input))]
pub async fn update_owner(db: &DatabaseConnection, id: Uuid, input: UpdateOwnerInput) -> Result<owner::Model, ServiceError> {
    input.validate()?;
    let mut am: owner::ActiveModel = get_owner(db, id).await?.into();
    if let Some(name) = input.full_name { am.full_name = Set(name.trim().to_string()); }
    if let Some(phone) = input.phone { am.phone = Set(phone.trim().to_string()); }
    if let Some(address) = input.address { am.address = Set(Some(address.trim().to_string())); }
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(ServiceError::db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn input(name: &str, phone: &str) -> CreateOwnerInput {
        CreateOwnerInput { full_name: name.into(), phone: phone.into(), address: None }
    }

    #[tokio::test]
    async fn owner_crud_service() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let o = create_owner(&db, input("Marta Gil", "+34 600 111 222")).await?;
        assert_eq!(get_owner(&db, o.id).await?.full_name, "Marta Gil");

        let patch = UpdateOwnerInput { address: Some("Calle Mayor 1".into()), ..Default::default() };
        let updated = update_owner(&db, o.id, patch).await?;
        assert_eq!(updated.address.as_deref(), Some("Calle Mayor 1"));
        assert_eq!(updated.phone, "+34 600 111 222");

        create_owner(&db, input("Luis Paz", "5550101")).await?;
        assert_eq!(list_owners(&db).await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn rejects_bad_fields() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let err = create_owner(&db, input("Al", "12")).await.unwrap_err();
        let ServiceError::Invalid(errors) = err else { panic!("expected field errors") };
        let fields = errors.field_errors();
        assert!(fields.contains_key("full_name"));
        assert!(fields.contains_key("phone"));

        let padded = CreateOwnerInput { address: Some("    a".into()), ..input("Rosa Vidal", "5550102") };
        let err = create_owner(&db, padded).await.unwrap_err();
        let ServiceError::Invalid(errors) = err else { panic!("expected field errors") };
        assert!(errors.field_errors().contains_key("address"));
        Ok(())
    }

    #[tokio::test]
    async fn missing_owner_is_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        assert!(matches!(get_owner(&db, Uuid::new_v4()).await, Err(ServiceError::NotFound(_))));
        let res = update_owner(&db, Uuid::new_v4(), UpdateOwnerInput::default()).await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
