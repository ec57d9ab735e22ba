use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Pet: lookups by owner (cascade) and species (list filter)
        manager
            .create_index(
                Index::create()
                    .name("idx_pet_owner")
                    .table(Pet::Table)
                    .col(Pet::OwnerId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_pet_species")
                    .table(Pet::Table)
                    .col(Pet::Species)
                    .to_owned(),
            )
            .await?;

        // MedicalRecord: lookups by pet and by veterinarian
        manager
            .create_index(
                Index::create()
                    .name("idx_medical_record_pet")
                    .table(MedicalRecord::Table)
                    .col(MedicalRecord::PetId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_medical_record_veterinarian")
                    .table(MedicalRecord::Table)
                    .col(MedicalRecord::VeterinarianId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_pet_owner").table(Pet::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_pet_species").table(Pet::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_medical_record_pet").table(MedicalRecord::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_medical_record_veterinarian").table(MedicalRecord::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Pet { Table, OwnerId, Species }

#[derive(DeriveIden)]
enum MedicalRecord { Table, PetId, VeterinarianId }
