use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Tariff: listing order
        manager
            .create_index(
                Index::create()
                    .name("idx_tariff_created_at")
                    .table(Tariff::Table)
                    .col(Tariff::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Service: restrict checks on type delete scan by type_id
        manager
            .create_index(
                Index::create()
                    .name("idx_service_type")
                    .table(Service::Table)
                    .col(Service::TypeId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_tariff_created_at").table(Tariff::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_service_type").table(Service::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Tariff { Table, CreatedAt }

#[derive(DeriveIden)]
enum Service { Table, TypeId }
