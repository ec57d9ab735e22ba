//! Create `medical_record` table with FKs to `pet` and `veterinarian`.
//!
//! Neither FK cascades; the service layer deletes records explicitly.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MedicalRecord::Table)
                    .if_not_exists()
                    .col(uuid(MedicalRecord::Id).primary_key())
                    .col(uuid(MedicalRecord::PetId).not_null())
                    .col(uuid(MedicalRecord::VeterinarianId).not_null())
                    .col(date(MedicalRecord::Date).not_null())
                    .col(string_len(MedicalRecord::Time, 5).not_null())
                    .col(text(MedicalRecord::Description).not_null())
                    .col(timestamp_with_time_zone(MedicalRecord::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(MedicalRecord::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_medical_record_pet")
                            .from(MedicalRecord::Table, MedicalRecord::PetId)
                            .to(Pet::Table, Pet::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_medical_record_veterinarian")
                            .from(MedicalRecord::Table, MedicalRecord::VeterinarianId)
                            .to(Veterinarian::Table, Veterinarian::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(MedicalRecord::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum MedicalRecord { Table, Id, PetId, VeterinarianId, Date, Time, Description, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Pet { Table, Id }

#[derive(DeriveIden)]
enum Veterinarian { Table, Id }
