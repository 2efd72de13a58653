use sea_orm::{sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use common::types::ServiceTypeView;
use models::service_type;

use super::inputs::ServiceTypeInput;
use super::views::service_type_view;
use crate::errors::{violation, ServiceError, Violation};

/// All service types ordered by name.
pub async fn list_service_types(db: &DatabaseConnection) -> Result<Vec<ServiceTypeView>, ServiceError> {
    let rows = service_type::Entity::find()
        .order_by_asc(service_type::Column::Name)
        .all(db)
        .await?;
    Ok(rows.into_iter().map(service_type_view).collect())
}

pub async fn get_service_type(db: &DatabaseConnection, id: Uuid) -> Result<ServiceTypeView, ServiceError> {
    service_type::Entity::find_by_id(id)
        .one(db)
        .await?
        .map(service_type_view)
        .ok_or_else(|| ServiceError::not_found("Service type"))
}

/// Create a type. Names are unique (case-sensitive); the unique index decides.
#[instrument(skip(db, input))]
pub async fn create_service_type(db: &DatabaseConnection, input: &ServiceTypeInput) -> Result<ServiceTypeView, ServiceError> {
    let name = input.validate()?;
    let created = service_type::draft(name).insert(db).await.map_err(|e| match violation(&e) {
        Some(Violation::Unique) => ServiceError::Conflict("Service type already exists".into()),
        _ => e.into(),
    })?;
    info!(type_id = %created.id, name = %created.name, "service_type_created");
    get_service_type(db, created.id).await
}

#[instrument(skip(db, input), fields(type_id = %id))]
pub async fn update_service_type(db: &DatabaseConnection, id: Uuid, input: &ServiceTypeInput) -> Result<ServiceTypeView, ServiceError> {
    let name = input.validate()?;
    let res = service_type::Entity::update_many()
        .col_expr(service_type::Column::Name, Expr::value(name))
        .filter(service_type::Column::Id.eq(id))
        .exec(db)
        .await
        .map_err(|e| match violation(&e) {
            Some(Violation::Unique) => ServiceError::Conflict("Service type name must be unique".into()),
            _ => e.into(),
        })?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("Service type"));
    }
    info!(type_id = %id, "service_type_updated");
    get_service_type(db, id).await
}

/// Delete a type. Refused while any service still uses it.
#[instrument(skip(db), fields(type_id = %id))]
pub async fn delete_service_type(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let res = service_type::Entity::delete_by_id(id).exec(db).await.map_err(|e| match violation(&e) {
        Some(Violation::ForeignKey) => {
            warn!(type_id = %id, "service_type_in_use");
            ServiceError::Conflict("Cannot delete type: it is used by services".into())
        }
        _ => e.into(),
    })?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("Service type"));
    }
    info!(type_id = %id, "service_type_deleted");
    Ok(())
}
