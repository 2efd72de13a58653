use chrono::Utc;
use sea_orm::{
    prelude::DateTimeWithTimeZone, sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use common::types::ServiceView;
use models::{service, tariff};

use super::inputs::{MoveInput, ServiceInput, ServicePatchInput};
use super::views::load_service;
use crate::errors::{violation, ServiceError, Violation};

const DUPLICATE_IN_TARIFF: &str = "This service type already exists in the tariff";
const DUPLICATE_AT_TARGET: &str = "Cannot move: target tariff already has this service type";

fn unknown_type() -> ServiceError {
    ServiceError::field("typeId", "Unknown service type")
}

async fn reread(db: &DatabaseConnection, id: Uuid) -> Result<ServiceView, ServiceError> {
    load_service(db, id).await?.ok_or_else(|| ServiceError::not_found("Service"))
}

/// Add a service to a tariff.
///
/// A failed foreign key means either the tariff or the type is gone; the
/// tariff is looked up only to tell the caller which.
#[instrument(skip(db, input), fields(tariff_id = %tariff_id))]
pub async fn create_service(db: &DatabaseConnection, tariff_id: Uuid, input: &ServiceInput) -> Result<ServiceView, ServiceError> {
    let new = input.validate()?;
    let inserted = service::draft(tariff_id, new.type_id, new.value, new.unit).insert(db).await;
    let created = match inserted {
        Ok(m) => m,
        Err(e) => return Err(classify_create_error(db, tariff_id, e).await),
    };
    info!(service_id = %created.id, tariff_id = %tariff_id, type_id = %created.type_id, "service_created");
    reread(db, created.id).await
}

async fn classify_create_error(db: &DatabaseConnection, tariff_id: Uuid, e: DbErr) -> ServiceError {
    match violation(&e) {
        Some(Violation::Unique) => ServiceError::Conflict(DUPLICATE_IN_TARIFF.into()),
        Some(Violation::ForeignKey) => match tariff::Entity::find_by_id(tariff_id).one(db).await {
            Ok(None) => ServiceError::not_found("Tariff"),
            Ok(Some(_)) => unknown_type(),
            Err(lookup) => lookup.into(),
        },
        None => e.into(),
    }
}

/// Change any of type, value and unit.
#[instrument(skip(db, input), fields(service_id = %id))]
pub async fn update_service(db: &DatabaseConnection, id: Uuid, input: &ServicePatchInput) -> Result<ServiceView, ServiceError> {
    let patch = input.validate()?;
    let now: DateTimeWithTimeZone = Utc::now().into();
    let mut update = service::Entity::update_many().col_expr(service::Column::UpdatedAt, Expr::value(now));
    if let Some(type_id) = patch.type_id {
        update = update.col_expr(service::Column::TypeId, Expr::value(type_id));
    }
    if let Some(value) = patch.value {
        update = update.col_expr(service::Column::Value, Expr::value(value));
    }
    if let Some(unit) = patch.unit {
        update = update.col_expr(service::Column::Unit, Expr::value(unit));
    }
    let res = update
        .filter(service::Column::Id.eq(id))
        .exec(db)
        .await
        .map_err(|e| match violation(&e) {
            Some(Violation::Unique) => ServiceError::Conflict(DUPLICATE_IN_TARIFF.into()),
            Some(Violation::ForeignKey) => unknown_type(),
            None => e.into(),
        })?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("Service"));
    }
    info!(service_id = %id, "service_updated");
    reread(db, id).await
}

#[instrument(skip(db), fields(service_id = %id))]
pub async fn delete_service(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let res = service::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("Service"));
    }
    info!(service_id = %id, "service_deleted");
    Ok(())
}

/// Reassign a service to another tariff in one conditional UPDATE.
///
/// The unique `(tariff_id, type_id)` index rejects a target that already
/// holds this type and the tariff foreign key rejects an unknown target; in
/// both cases the row keeps its original tariff.
#[instrument(skip(db, input), fields(service_id = %id))]
pub async fn move_service(db: &DatabaseConnection, id: Uuid, input: &MoveInput) -> Result<ServiceView, ServiceError> {
    let target = input.validate()?;
    let now: DateTimeWithTimeZone = Utc::now().into();
    let res = service::Entity::update_many()
        .col_expr(service::Column::TariffId, Expr::value(target))
        .col_expr(service::Column::UpdatedAt, Expr::value(now))
        .filter(service::Column::Id.eq(id))
        .exec(db)
        .await
        .map_err(|e| match violation(&e) {
            Some(Violation::Unique) => {
                warn!(service_id = %id, target_tariff_id = %target, "service_move_conflict");
                ServiceError::Conflict(DUPLICATE_AT_TARGET.into())
            }
            Some(Violation::ForeignKey) => ServiceError::not_found("Target tariff"),
            None => e.into(),
        })?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("Service"));
    }
    info!(service_id = %id, target_tariff_id = %target, "service_moved");
    reread(db, id).await
}
