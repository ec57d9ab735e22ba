//! Create `owner` table.
//!
//! Root of the ownership hierarchy; pets reference it.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Owner::Table)
                    .if_not_exists()
                    .col(uuid(Owner::Id).primary_key())
                    .col(string_len(Owner::FullName, 128).not_null())
                    .col(string_len(Owner::Phone, 32).not_null())
                    .col(string_len_null(Owner::Address, 255))
                    .col(timestamp_with_time_zone(Owner::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Owner::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Owner::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Owner { Table, Id, FullName, Phone, Address, CreatedAt, UpdatedAt }
