//! Create `tariff` table.
//!
//! Root entity; services reference it and are removed with it.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tariff::Table)
                    .if_not_exists()
                    .col(uuid(Tariff::Id).primary_key())
                    .col(string_len(Tariff::Name, 200).not_null())
                    .col(timestamp_with_time_zone(Tariff::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Tariff::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Tariff::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Tariff { Table, Id, Name, CreatedAt, UpdatedAt }
