use uuid::Uuid;
use chrono::{NaiveDate, Utc};
use sea_orm::{DatabaseConnection, ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use validator::Validate;

use models::{owner, pet};
use crate::errors::ServiceError;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePetInput {
    #[validate(custom(function = "crate::validation::pet_name"))]
    pub name: String,
    #[validate(custom(function = "crate::validation::not_blank"))]
    pub species: String,
    pub birth_date: Option<NaiveDate>,
    pub owner_id: Uuid,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePetInput {
    #[validate(custom(function = "crate::validation::pet_name"))]
    pub name: Option<String>,
    #[validate(custom(function = "crate::validation::not_blank"))]
    pub species: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub owner_id: Option<Uuid>,
}

/// Query-string filters for listing pets.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetFilter {
    pub owner_id: Option<Uuid>,
    pub species: Option<String>,
}

/// A pet with its owner expanded.
#[derive(Debug, Clone, Serialize)]
pub struct PetDetail {
    #[serde(flatten)]
    pub pet: pet::Model,
    pub owner: Option<owner::Model>,
}

async fn ensure_owner(db: &DatabaseConnection, owner_id: Uuid) -> Result<(), ServiceError> {
    owner::Entity::find_by_id(owner_id)
        .one(db)
        .await
        .map_err(ServiceError::db)?
        .map(|_| ())
        .ok_or_else(|| ServiceError::not_found("owner"))
}

#[instrument(skip(db, input))]
pub async fn create_pet(db: &DatabaseConnection, input: CreatePetInput) -> Result<PetDetail, ServiceError> {
    input.validate()?;
    ensure_owner(db, input.owner_id).await?;
    let created = pet::create(db, &input.name, &input.species, input.birth_date, input.owner_id).await?;
    info!(pet_id = %created.id, owner_id = %created.owner_id, "pet_created");
    get_pet(db, created.id).await
}

pub async fn list_pets(db: &DatabaseConnection, filter: PetFilter) -> Result<Vec<PetDetail>, ServiceError> {
    let mut query = pet::Entity::find();
    if let Some(owner_id) = filter.owner_id {
        query = query.filter(pet::Column::OwnerId.eq(owner_id));
    }
    if let Some(species) = filter.species.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        query = query.filter(pet::Column::Species.eq(species));
    }
    let rows = query
        .order_by_asc(pet::Column::CreatedAt)
        .find_also_related(owner::Entity)
        .all(db)
        .await
        .map_err(ServiceError::db)?;
    Ok(rows.into_iter().map(|(pet, owner)| PetDetail { pet, owner }).collect())
}

pub async fn get_pet(db: &DatabaseConnection, id: Uuid) -> Result<PetDetail, ServiceError> {
    let (pet, owner) = pet::Entity::find_by_id(id)
        .find_also_related(owner::Entity)
        .one(db)
        .await
        .map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::not_found("pet"))?;
    Ok(PetDetail { pet, owner })
}

/// Apply the fields present in `input`; a new owner must exist.
#[instrument(skip(db, input))]
pub async fn update_pet(db: &DatabaseConnection, id: Uuid, input: UpdatePetInput) -> Result<PetDetail, ServiceError> {
    input.validate()?;
    let current = pet::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::not_found("pet"))?;
    if let Some(owner_id) = input.owner_id {
        ensure_owner(db, owner_id).await?;
    }
    let mut am: pet::ActiveModel = current.into();
    if let Some(name) = input.name { am.name = Set(name.trim().to_string()); }
    if let Some(species) = input.species { am.species = Set(species.trim().to_string()); }
    if let Some(birth) = input.birth_date { am.birth_date = Set(Some(birth)); }
    if let Some(owner_id) = input.owner_id { am.owner_id = Set(owner_id); }
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await.map_err(ServiceError::db)?;
    get_pet(db, updated.id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn new_pet(name: &str, species: &str, owner_id: Uuid) -> CreatePetInput {
        CreatePetInput { name: name.into(), species: species.into(), birth_date: None, owner_id }
    }

    #[tokio::test]
    async fn pet_expands_owner_and_filters() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let a = owner::create(&db, "Owner A", "5550001", None).await?;
        let b = owner::create(&db, "Owner B", "5550002", None).await?;
        let p = create_pet(&db, new_pet("Misu", "cat", a.id)).await?;
        assert_eq!(p.owner.as_ref().map(|o| o.id), Some(a.id));
        create_pet(&db, new_pet("Toby", "dog", a.id)).await?;
        create_pet(&db, new_pet("Nala", "cat", b.id)).await?;

        let by_owner = list_pets(&db, PetFilter { owner_id: Some(a.id), species: None }).await?;
        assert_eq!(by_owner.len(), 2);
        let cats = list_pets(&db, PetFilter { owner_id: None, species: Some("cat".into()) }).await?;
        assert_eq!(cats.len(), 2);
        assert!(cats.iter().all(|d| d.owner.is_some()));

        let json = serde_json::to_value(&p)?;
        assert_eq!(json["name"], "Misu");
        assert_eq!(json["owner"]["fullName"], "Owner A");
        Ok(())
    }

    #[tokio::test]
    async fn owner_reference_checked() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let missing = create_pet(&db, new_pet("Ghost", "dog", Uuid::new_v4())).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));

        let o = owner::create(&db, "Owner C", "5550003", None).await?;
        let p = create_pet(&db, new_pet("Bolt", "dog", o.id)).await?;
        let moved = update_pet(&db, p.pet.id, UpdatePetInput { owner_id: Some(Uuid::new_v4()), ..Default::default() }).await;
        assert!(matches!(moved, Err(ServiceError::NotFound(_))));

        let renamed = update_pet(&db, p.pet.id, UpdatePetInput { name: Some("Bolty".into()), ..Default::default() }).await?;
        assert_eq!(renamed.pet.name, "Bolty");
        assert_eq!(renamed.pet.species, "dog");
        Ok(())
    }

    #[tokio::test]
    async fn padded_name_counts_trimmed_length() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let o = owner::create(&db, "Owner D", "5550004", None).await?;
        let err = create_pet(&db, new_pet("   K   ", "cat", o.id)).await.unwrap_err();
        let ServiceError::Invalid(errors) = err else { panic!("expected field errors") };
        assert!(errors.field_errors().contains_key("name"));
        Ok(())
    }
}
