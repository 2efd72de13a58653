use chrono::Utc;
use sea_orm::{prelude::DateTimeWithTimeZone, sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::{info, instrument};
use uuid::Uuid;

use common::types::TariffView;
use models::tariff;

use super::inputs::TariffInput;
use super::views::{load_all_tariffs, load_tariff, tariff_view};
use crate::errors::ServiceError;

/// All tariffs, oldest first, each with its services.
pub async fn list_tariffs(db: &DatabaseConnection) -> Result<Vec<TariffView>, ServiceError> {
    load_all_tariffs(db).await
}

pub async fn get_tariff(db: &DatabaseConnection, id: Uuid) -> Result<TariffView, ServiceError> {
    load_tariff(db, id).await?.ok_or_else(|| ServiceError::not_found("Tariff"))
}

/// Create an empty tariff.
#[instrument(skip(db, input))]
pub async fn create_tariff(db: &DatabaseConnection, input: &TariffInput) -> Result<TariffView, ServiceError> {
    let name = input.validate()?;
    let created = tariff::draft(name).insert(db).await?;
    info!(tariff_id = %created.id, name = %created.name, "tariff_created");
    // freshly created: no services yet
    Ok(tariff_view(created, Vec::new()))
}

/// Rename a tariff.
#[instrument(skip(db, input), fields(tariff_id = %id))]
pub async fn update_tariff(db: &DatabaseConnection, id: Uuid, input: &TariffInput) -> Result<TariffView, ServiceError> {
    let name = input.validate()?;
    let now: DateTimeWithTimeZone = Utc::now().into();
    let res = tariff::Entity::update_many()
        .col_expr(tariff::Column::Name, Expr::value(name))
        .col_expr(tariff::Column::UpdatedAt, Expr::value(now))
        .filter(tariff::Column::Id.eq(id))
        .exec(db)
        .await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("Tariff"));
    }
    info!(tariff_id = %id, "tariff_updated");
    get_tariff(db, id).await
}

/// Delete a tariff; its services go with it.
#[instrument(skip(db), fields(tariff_id = %id))]
pub async fn delete_tariff(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let res = tariff::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("Tariff"));
    }
    info!(tariff_id = %id, "tariff_deleted");
    Ok(())
}
