use std::collections::HashMap;

use uuid::Uuid;
use chrono::{NaiveDate, Utc};
use sea_orm::{DatabaseConnection, ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use validator::Validate;

use models::{medical_record, pet, veterinarian};
use crate::errors::ServiceError;
use crate::schedule;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMedicalRecordInput {
    pub pet_id: Uuid,
    pub veterinarian_id: Uuid,
    pub date: NaiveDate,
    #[validate(custom(function = "crate::validation::hhmm"))]
    pub time: String,
    #[validate(custom(function = "crate::validation::description"))]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMedicalRecordInput {
    pub pet_id: Option<Uuid>,
    pub veterinarian_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    #[validate(custom(function = "crate::validation::hhmm"))]
    pub time: Option<String>,
    #[validate(custom(function = "crate::validation::description"))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecordFilter {
    pub pet_id: Option<Uuid>,
    pub veterinarian_id: Option<Uuid>,
}

/// A record with its pet and veterinarian expanded.
#[derive(Debug, Clone, Serialize)]
pub struct MedicalRecordDetail {
    #[serde(flatten)]
    pub record: medical_record::Model,
    pub pet: Option<pet::Model>,
    pub veterinarian: Option<veterinarian::Model>,
}

fn check_time(time: &str) -> Result<(), ServiceError> {
    schedule::validate_time(time).map_err(|e| ServiceError::Validation(e.to_string()))
}

async fn ensure_references(db: &DatabaseConnection, pet_id: Option<Uuid>, veterinarian_id: Option<Uuid>) -> Result<(), ServiceError> {
    if let Some(id) = pet_id {
        pet::Entity::find_by_id(id).one(db).await.map_err(ServiceError::db)?
            .ok_or_else(|| ServiceError::not_found("pet"))?;
    }
    if let Some(id) = veterinarian_id {
        veterinarian::Entity::find_by_id(id).one(db).await.map_err(ServiceError::db)?
            .ok_or_else(|| ServiceError::not_found("veterinarian"))?;
    }
    Ok(())
}

/// Load veterinarians for `records` in one query and zip them in.
async fn expand(
    db: &DatabaseConnection,
    rows: Vec<(medical_record::Model, Option<pet::Model>)>,
) -> Result<Vec<MedicalRecordDetail>, ServiceError> {
    let mut vet_ids: Vec<Uuid> = rows.iter().map(|(r, _)| r.veterinarian_id).collect();
    vet_ids.sort();
    vet_ids.dedup();
    let vets: HashMap<Uuid, veterinarian::Model> = if vet_ids.is_empty() {
        HashMap::new()
    } else {
        veterinarian::Entity::find()
            .filter(veterinarian::Column::Id.is_in(vet_ids))
            .all(db)
            .await
            .map_err(ServiceError::db)?
            .into_iter()
            .map(|v| (v.id, v))
            .collect()
    };
    Ok(rows
        .into_iter()
        .map(|(record, pet)| {
            let veterinarian = vets.get(&record.veterinarian_id).cloned();
            MedicalRecordDetail { record, pet, veterinarian }
        })
        .collect())
}

#[instrument(skip(db, input))]
pub async fn create_medical_record(db: &DatabaseConnection, input: CreateMedicalRecordInput) -> Result<MedicalRecordDetail, ServiceError> {
    input.validate()?;
    check_time(&input.time)?;
    ensure_references(db, Some(input.pet_id), Some(input.veterinarian_id)).await?;
    let created = medical_record::create(db, input.pet_id, input.veterinarian_id, input.date, &input.time, &input.description).await?;
    info!(record_id = %created.id, pet_id = %created.pet_id, veterinarian_id = %created.veterinarian_id, "medical_record_created");
    get_medical_record(db, created.id).await
}

pub async fn list_medical_records(db: &DatabaseConnection, filter: MedicalRecordFilter) -> Result<Vec<MedicalRecordDetail>, ServiceError> {
    let mut query = medical_record::Entity::find();
    if let Some(pet_id) = filter.pet_id {
        query = query.filter(medical_record::Column::PetId.eq(pet_id));
    }
    if let Some(vet_id) = filter.veterinarian_id {
        query = query.filter(medical_record::Column::VeterinarianId.eq(vet_id));
    }
    let rows = query
        .order_by_desc(medical_record::Column::Date)
        .order_by_desc(medical_record::Column::Time)
        .find_also_related(pet::Entity)
        .all(db)
        .await
        .map_err(ServiceError::db)?;
    expand(db, rows).await
}

pub async fn get_medical_record(db: &DatabaseConnection, id: Uuid) -> Result<MedicalRecordDetail, ServiceError> {
    let row = medical_record::Entity::find_by_id(id)
        .find_also_related(pet::Entity)
        .one(db)
        .await
        .map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::not_found("medical record"))?;
    let mut expanded = expand(db, vec![row]).await?;
    expanded.pop().ok_or_else(|| ServiceError::not_found("medical record"))
}

/// Partial update; the time is re-checked only when supplied.
#[instrument(skip(db, input))]
pub async fn update_medical_record(db: &DatabaseConnection, id: Uuid, input: UpdateMedicalRecordInput) -> Result<MedicalRecordDetail, ServiceError> {
    input.validate()?;
    if let Some(time) = input.time.as_deref() {
        check_time(time)?;
    }
    let current = medical_record::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::not_found("medical record"))?;
    ensure_references(db, input.pet_id, input.veterinarian_id).await?;

    let mut am: medical_record::ActiveModel = current.into();
    if let Some(pet_id) = input.pet_id { am.pet_id = Set(pet_id); }
    if let Some(vet_id) = input.veterinarian_id { am.veterinarian_id = Set(vet_id); }
    if let Some(date) = input.date { am.date = Set(date); }
    if let Some(time) = input.time { am.time = Set(time); }
    if let Some(description) = input.description { am.description = Set(description.trim().to_string()); }
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await.map_err(ServiceError::db)?;
    get_medical_record(db, updated.id).await
}

/// Medical records are leaves; nothing else references them.
#[instrument(skip(db))]
pub async fn delete_medical_record(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let res = medical_record::Entity::delete_by_id(id).exec(db).await.map_err(ServiceError::db)?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("medical record"));
    }
    info!(record_id = %id, "medical_record_deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::INVALID_TIME_MESSAGE;
    use crate::test_support::get_db;
    use models::owner;

    struct Fixture { pet: Uuid, vet: Uuid }

    async fn fixture(db: &DatabaseConnection) -> Result<Fixture, anyhow::Error> {
        let o = owner::create(db, "Rosa León", "5550200", None).await?;
        let p = pet::create(db, "Coco", "rabbit", None, o.id).await?;
        let v = veterinarian::create(db, "Dr. Núñez", "VET-200", "exotics").await?;
        Ok(Fixture { pet: p.id, vet: v.id })
    }

    fn input(f: &Fixture, time: &str) -> CreateMedicalRecordInput {
        CreateMedicalRecordInput {
            pet_id: f.pet,
            veterinarian_id: f.vet,
            date: NaiveDate::from_ymd_opt(2025, 5, 20).expect("date"),
            time: time.into(),
            description: "Annual vaccination".into(),
        }
    }

    #[tokio::test]
    async fn create_expands_pet_and_veterinarian() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let f = fixture(&db).await?;
        let rec = create_medical_record(&db, input(&f, "09:30")).await?;
        assert_eq!(rec.pet.as_ref().map(|p| p.id), Some(f.pet));
        assert_eq!(rec.veterinarian.as_ref().map(|v| v.id), Some(f.vet));

        let json = serde_json::to_value(&rec)?;
        assert_eq!(json["time"], "09:30");
        assert_eq!(json["veterinarian"]["licenseNumber"], "VET-200");

        let by_pet = list_medical_records(&db, MedicalRecordFilter { pet_id: Some(f.pet), veterinarian_id: None }).await?;
        assert_eq!(by_pet.len(), 1);
        let none = list_medical_records(&db, MedicalRecordFilter { pet_id: Some(Uuid::new_v4()), veterinarian_id: None }).await?;
        assert!(none.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn out_of_hours_time_rejected() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let f = fixture(&db).await?;
        for bad in ["08:30", "10:15", "17:30"] {
            let err = create_medical_record(&db, input(&f, bad)).await.unwrap_err();
            match err {
                ServiceError::Validation(msg) => assert_eq!(msg, INVALID_TIME_MESSAGE),
                other => panic!("unexpected {other:?}"),
            }
        }
        let rec = create_medical_record(&db, input(&f, "17:00")).await?;
        let patch = UpdateMedicalRecordInput { time: Some("12:45".into()), ..Default::default() };
        assert!(matches!(update_medical_record(&db, rec.record.id, patch).await, Err(ServiceError::Validation(_))));

        let patch = UpdateMedicalRecordInput { description: Some("Follow-up visit".into()), ..Default::default() };
        let updated = update_medical_record(&db, rec.record.id, patch).await?;
        assert_eq!(updated.record.time, "17:00");
        assert_eq!(updated.record.description, "Follow-up visit");
        Ok(())
    }

    #[tokio::test]
    async fn missing_references_and_delete() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let f = fixture(&db).await?;
        let mut bad = input(&f, "10:00");
        bad.veterinarian_id = Uuid::new_v4();
        assert!(matches!(create_medical_record(&db, bad).await, Err(ServiceError::NotFound(_))));

        let rec = create_medical_record(&db, input(&f, "10:00")).await?;
        delete_medical_record(&db, rec.record.id).await?;
        assert!(matches!(get_medical_record(&db, rec.record.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(delete_medical_record(&db, rec.record.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
