//! Create `veterinarian` table; license numbers are unique.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Veterinarian::Table)
                    .if_not_exists()
                    .col(uuid(Veterinarian::Id).primary_key())
                    .col(string_len(Veterinarian::FullName, 128).not_null())
                    .col(string_len(Veterinarian::LicenseNumber, 64).unique_key().not_null())
                    .col(string_len(Veterinarian::Specialty, 128).not_null())
                    .col(timestamp_with_time_zone(Veterinarian::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Veterinarian::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Veterinarian::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Veterinarian { Table, Id, FullName, LicenseNumber, Specialty, CreatedAt, UpdatedAt }
