use crate::db::connect_with_config;
use crate::errors::ModelError;
use crate::{admin_user, medical_record, owner, pet, veterinarian};
use chrono::NaiveDate;
use configs::DatabaseConfig;
use migration::MigratorTrait;
use sea_orm::{DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait};
use anyhow::Result;

/// Fresh in-memory database with every migration applied.
async fn setup_test_db() -> Result<DatabaseConnection> {
    let cfg = DatabaseConfig {
        url: "sqlite::memory:".into(),
        max_connections: 1,
        min_connections: 1,
        connect_timeout_secs: 5,
        acquire_timeout_secs: 5,
        ..Default::default()
    };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::test]
async fn test_admin_user_email_is_unique() -> Result<()> {
    let db = setup_test_db().await?;
    let created = admin_user::create(&db, "admin@clinic.test", "hash".into(), "argon2", "admin").await?;
    assert_eq!(created.role, "admin");

    let dup = admin_user::create(&db, "admin@clinic.test", "hash".into(), "argon2", "admin").await;
    assert!(matches!(dup, Err(ModelError::Conflict(_))));

    let found = admin_user::find_by_email(&db, "admin@clinic.test").await?;
    assert_eq!(found.map(|u| u.id), Some(created.id));
    Ok(())
}

#[tokio::test]
async fn test_password_hash_never_serialized() -> Result<()> {
    let db = setup_test_db().await?;
    let user = admin_user::create(&db, "vet@clinic.test", "secret-hash".into(), "argon2", "veterinarian").await?;
    let json = serde_json::to_value(&user)?;
    assert!(json.get("passwordHash").is_none());
    assert_eq!(json["email"], "vet@clinic.test");
    Ok(())
}

#[tokio::test]
async fn test_owner_pet_relation() -> Result<()> {
    let db = setup_test_db().await?;
    let o = owner::create(&db, "Ana Díaz", "555-0100", None).await?;
    let birth = NaiveDate::from_ymd_opt(2021, 4, 2);
    let p = pet::create(&db, "Luna", "cat", birth, o.id).await?;

    let pets = o.find_related(pet::Entity).all(&db).await?;
    assert_eq!(pets.len(), 1);
    assert_eq!(pets[0].id, p.id);

    let ids = pet::ids_by_owner(&db, o.id).await?;
    assert_eq!(ids, vec![p.id]);
    Ok(())
}

#[tokio::test]
async fn test_pet_requires_existing_owner() -> Result<()> {
    let db = setup_test_db().await?;
    let orphan = pet::create(&db, "Ghost", "dog", None, uuid::Uuid::new_v4()).await;
    assert!(orphan.is_err());
    Ok(())
}

#[tokio::test]
async fn test_license_number_unique() -> Result<()> {
    let db = setup_test_db().await?;
    veterinarian::create(&db, "Dr. Ruiz", "LIC-001", "surgery").await?;
    let dup = veterinarian::create(&db, "Dr. Other", "LIC-001", "dermatology").await;
    assert!(matches!(dup, Err(ModelError::Conflict(_))));
    assert!(veterinarian::find_by_license(&db, " LIC-001 ").await?.is_some());
    Ok(())
}

#[tokio::test]
async fn test_medical_record_bulk_delete_and_count() -> Result<()> {
    let db = setup_test_db().await?;
    let o = owner::create(&db, "Ben Ortiz", "555-0101", Some("12 Elm St")).await?;
    let p1 = pet::create(&db, "Rex", "dog", None, o.id).await?;
    let p2 = pet::create(&db, "Kiwi", "bird", None, o.id).await?;
    let v = veterinarian::create(&db, "Dr. Vega", "LIC-002", "general").await?;
    let day = NaiveDate::from_ymd_opt(2025, 3, 10).expect("date");

    medical_record::create(&db, p1.id, v.id, day, "09:00", "checkup").await?;
    medical_record::create(&db, p1.id, v.id, day, "09:30", "vaccine").await?;
    medical_record::create(&db, p2.id, v.id, day, "10:00", "wing trim").await?;
    assert_eq!(medical_record::count_by_veterinarian(&db, v.id).await?, 3);

    let removed = medical_record::delete_by_pets(&db, &[p1.id]).await?;
    assert_eq!(removed, 2);
    assert_eq!(medical_record::Entity::find().count(&db).await?, 1);
    assert_eq!(medical_record::delete_by_pets(&db, &[]).await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_blank_fields_rejected_before_insert() -> Result<()> {
    let db = setup_test_db().await?;
    assert!(matches!(owner::create(&db, "  ", "555", None).await, Err(ModelError::Validation(_))));
    assert!(matches!(admin_user::create(&db, "nope", "h".into(), "argon2", "admin").await, Err(ModelError::Validation(_))));
    Ok(())
}
