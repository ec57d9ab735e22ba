//! Reset the clinic tables and load a small demo data set.

use anyhow::Context;
use chrono::{Duration, NaiveDate, Utc};
use dotenvy::dotenv;
use migration::MigratorTrait;
use rand::Rng;
use sea_orm::{EntityTrait, PaginatorTrait, TransactionTrait};
use tracing::info;

use models::{medical_record, owner, pet, veterinarian};
use service::schedule;

const VETERINARIANS: [(&str, &str, &str); 3] = [
    ("Dr. Elena Ortega", "VET-2001", "Internal medicine"),
    ("Dr. Tomás Herrera", "VET-2002", "Surgery"),
    ("Dra. Paula Rey", "VET-2003", "Orthopedics"),
];

const OWNERS: [(&str, &str, &str); 7] = [
    ("Julia Navarro", "1155510001", "Rivadavia 1200"),
    ("Andrés Molina", "1155510002", "Belgrano 455"),
    ("Sofía Castro", "1155510003", "San Martín 78"),
    ("Diego Romero", "1155510004", "Sarmiento 930"),
    ("Valeria Ruiz", "1155510005", "Las Heras 2210"),
    ("Martín Suárez", "1155510006", "Urquiza 14"),
    ("Camila Torres", "1155510007", "Alvear 660"),
];

const PET_NAMES: [&str; 10] = ["Canela", "Pelusa", "Bruno", "Kira", "Tango", "Mora", "Zeus", "Frida", "Oreo", "Chispa"];
const SPECIES: [&str; 4] = ["dog", "cat", "rabbit", "hamster"];

/// Slot inside business hours, `09:00` through `16:30`.
fn random_slot(rng: &mut impl Rng) -> String {
    let hour = rng.gen_range(9..=16);
    let minute = if rng.gen_bool(0.5) { 0 } else { 30 };
    format!("{hour:02}:{minute:02}")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    common::utils::logging::init_logging_from_env();

    let cfg = configs::AppConfig::load_and_validate().context("load configuration")?;
    common::env::ensure_sqlite_dir(&cfg.database.url).await?;
    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;

    let txn = db.begin().await?;
    info!("clearing clinic tables");
    medical_record::Entity::delete_many().exec(&txn).await?;
    pet::Entity::delete_many().exec(&txn).await?;
    owner::Entity::delete_many().exec(&txn).await?;
    veterinarian::Entity::delete_many().exec(&txn).await?;

    let mut rng = rand::thread_rng();

    let mut vets = Vec::with_capacity(VETERINARIANS.len());
    for (name, license, specialty) in VETERINARIANS {
        vets.push(veterinarian::create(&txn, name, license, specialty).await?);
    }

    let mut owners = Vec::with_capacity(OWNERS.len());
    for (name, phone, address) in OWNERS {
        owners.push(owner::create(&txn, name, phone, Some(address)).await?);
    }

    let mut pets = Vec::with_capacity(PET_NAMES.len());
    for (i, name) in PET_NAMES.iter().enumerate() {
        let species = SPECIES[rng.gen_range(0..SPECIES.len())];
        let birth = NaiveDate::from_ymd_opt(rng.gen_range(2015..=2022), 1, 1);
        pets.push(pet::create(&txn, name, species, birth, owners[i % owners.len()].id).await?);
    }

    let today = Utc::now().date_naive();
    for i in 0..10 {
        let date = today + Duration::days(rng.gen_range(-20..=20));
        let time = random_slot(&mut rng);
        schedule::validate_time(&time)?;
        medical_record::create(&txn, pets[i % pets.len()].id, vets[i % vets.len()].id, date, &time, "General condition: good.").await?;
    }
    txn.commit().await?;

    info!(
        veterinarians = veterinarian::Entity::find().count(&db).await?,
        owners = owner::Entity::find().count(&db).await?,
        pets = pet::Entity::find().count(&db).await?,
        medical_records = medical_record::Entity::find().count(&db).await?,
        "database populated"
    );
    Ok(())
}
