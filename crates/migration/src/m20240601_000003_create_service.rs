//! Create `service` table.
//!
//! Services cascade away with their tariff but hold their type in place:
//! a referenced `service_type` row cannot be deleted. NO ACTION rather than
//! RESTRICT so SQLite reports a plain foreign key failure (787).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Service::Table)
                    .if_not_exists()
                    .col(uuid(Service::Id).primary_key())
                    .col(double(Service::Value).not_null())
                    .col(string_len(Service::Unit, 50).not_null())
                    .col(uuid(Service::TariffId).not_null())
                    .col(uuid(Service::TypeId).not_null())
                    .col(timestamp_with_time_zone(Service::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Service::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_tariff")
                            .from(Service::Table, Service::TariffId)
                            .to(Tariff::Table, Tariff::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_type")
                            .from(Service::Table, Service::TypeId)
                            .to(ServiceType::Table, ServiceType::Id)
                            .on_delete(ForeignKeyAction::NoAction)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // A tariff holds at most one service per type
        manager
            .create_index(
                Index::create()
                    .name("uniq_service_tariff_type")
                    .table(Service::Table)
                    .col(Service::TariffId)
                    .col(Service::TypeId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Service::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Service {
    Table,
    Id,
    Value,
    Unit,
    TariffId,
    TypeId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Tariff { Table, Id }

#[derive(DeriveIden)]
enum ServiceType { Table, Id }
