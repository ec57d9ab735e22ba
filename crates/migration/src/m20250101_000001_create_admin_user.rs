//! Create `admin_user` table: login identity, password digest and role.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdminUser::Table)
                    .if_not_exists()
                    .col(uuid(AdminUser::Id).primary_key())
                    .col(string_len(AdminUser::Email, 255).unique_key().not_null())
                    .col(string_len(AdminUser::PasswordHash, 255).not_null())
                    .col(string_len(AdminUser::PasswordAlgorithm, 64).not_null())
                    .col(string_len(AdminUser::Role, 32).not_null())
                    .col(timestamp_with_time_zone(AdminUser::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(AdminUser::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(AdminUser::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum AdminUser { Table, Id, Email, PasswordHash, PasswordAlgorithm, Role, CreatedAt, UpdatedAt }
