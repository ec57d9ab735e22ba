//! Migrator registering clinic tables in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_admin_user;
mod m20250101_000002_create_owner;
mod m20250101_000003_create_pet;
mod m20250101_000004_create_veterinarian;
mod m20250101_000005_create_medical_record;
mod m20250101_000006_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_admin_user::Migration),
            Box::new(m20250101_000002_create_owner::Migration),
            Box::new(m20250101_000003_create_pet::Migration),
            Box::new(m20250101_000004_create_veterinarian::Migration),
            Box::new(m20250101_000005_create_medical_record::Migration),
            // Indexes should always be applied last
            Box::new(m20250101_000006_add_indexes::Migration),
        ]
    }
}
