//! Joined reads shaped into API views.
//!
//! Every response goes through these queries, so mutations return what the
//! store holds after the write rather than what the request asked for.

use sea_orm::{
    prelude::DateTimeWithTimeZone, ColumnTrait, Condition, ConnectionTrait, EntityTrait,
    FromQueryResult, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
};
use uuid::Uuid;

use common::types::{ServiceTypeView, ServiceView, TariffView, TypeRef};
use common::utils::grouping::fold_parents;
use models::{service, service_type, tariff};

use crate::errors::ServiceError;

#[derive(Debug, FromQueryResult)]
struct ServiceRow {
    id: Uuid,
    value: f64,
    unit: String,
    tariff_id: Uuid,
    type_id: Uuid,
    type_name: String,
}

impl From<ServiceRow> for ServiceView {
    fn from(r: ServiceRow) -> Self {
        ServiceView {
            id: r.id,
            value: r.value,
            unit: r.unit,
            tariff_id: r.tariff_id,
            type_id: r.type_id,
            service_type: TypeRef { id: r.type_id, name: r.type_name },
        }
    }
}

/// One row per (tariff, service) pair; service columns are null for a
/// tariff without services.
#[derive(Debug, FromQueryResult)]
struct TariffServiceRow {
    tariff_id: Uuid,
    tariff_name: String,
    tariff_created_at: DateTimeWithTimeZone,
    tariff_updated_at: DateTimeWithTimeZone,
    service_id: Option<Uuid>,
    service_value: Option<f64>,
    service_unit: Option<String>,
    service_type_id: Option<Uuid>,
    type_name: Option<String>,
}

impl TariffServiceRow {
    fn split(self) -> (tariff::Model, Option<ServiceView>) {
        let service = match (self.service_id, self.service_value, self.service_unit, self.service_type_id, self.type_name) {
            (Some(id), Some(value), Some(unit), Some(type_id), Some(type_name)) => Some(ServiceView {
                id,
                value,
                unit,
                tariff_id: self.tariff_id,
                type_id,
                service_type: TypeRef { id: type_id, name: type_name },
            }),
            _ => None,
        };
        let head = tariff::Model {
            id: self.tariff_id,
            name: self.tariff_name,
            created_at: self.tariff_created_at,
            updated_at: self.tariff_updated_at,
        };
        (head, service)
    }
}

pub fn tariff_view(t: tariff::Model, services: Vec<ServiceView>) -> TariffView {
    TariffView { id: t.id, name: t.name, created_at: t.created_at, updated_at: t.updated_at, services }
}

pub fn service_type_view(m: service_type::Model) -> ServiceTypeView {
    ServiceTypeView { id: m.id, name: m.name }
}

fn service_select() -> Select<service::Entity> {
    service::Entity::find()
        .select_only()
        .column(service::Column::Id)
        .column(service::Column::Value)
        .column(service::Column::Unit)
        .column(service::Column::TariffId)
        .column(service::Column::TypeId)
        .column_as(service_type::Column::Name, "type_name")
        .join(JoinType::InnerJoin, service::Relation::ServiceType.def())
}

/// Services matching `filter`, oldest first, each with its resolved type.
pub async fn load_services<C: ConnectionTrait>(db: &C, filter: Condition) -> Result<Vec<ServiceView>, ServiceError> {
    let rows = service_select()
        .filter(filter)
        .order_by_asc(service::Column::CreatedAt)
        .order_by_asc(service::Column::Id)
        .into_model::<ServiceRow>()
        .all(db)
        .await?;
    Ok(rows.into_iter().map(ServiceView::from).collect())
}

pub async fn load_service<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<ServiceView>, ServiceError> {
    let row = service_select()
        .filter(service::Column::Id.eq(id))
        .into_model::<ServiceRow>()
        .one(db)
        .await?;
    Ok(row.map(ServiceView::from))
}

/// Tariff with its services, or `None` when the id is unknown.
pub async fn load_tariff<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<TariffView>, ServiceError> {
    let Some(t) = tariff::Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };
    let services = load_services(db, Condition::all().add(service::Column::TariffId.eq(id))).await?;
    Ok(Some(tariff_view(t, services)))
}

/// Every tariff with its services in a single left-joined read, folded by tariff.
pub async fn load_all_tariffs<C: ConnectionTrait>(db: &C) -> Result<Vec<TariffView>, ServiceError> {
    let rows = tariff::Entity::find()
        .select_only()
        .column_as(tariff::Column::Id, "tariff_id")
        .column_as(tariff::Column::Name, "tariff_name")
        .column_as(tariff::Column::CreatedAt, "tariff_created_at")
        .column_as(tariff::Column::UpdatedAt, "tariff_updated_at")
        .column_as(service::Column::Id, "service_id")
        .column_as(service::Column::Value, "service_value")
        .column_as(service::Column::Unit, "service_unit")
        .column_as(service::Column::TypeId, "service_type_id")
        .column_as(service_type::Column::Name, "type_name")
        .join(JoinType::LeftJoin, tariff::Relation::Service.def())
        .join(JoinType::LeftJoin, service::Relation::ServiceType.def())
        .order_by_asc(tariff::Column::CreatedAt)
        .order_by_asc(tariff::Column::Id)
        .order_by_asc(service::Column::CreatedAt)
        .order_by_asc(service::Column::Id)
        .into_model::<TariffServiceRow>()
        .all(db)
        .await?;

    Ok(fold_parents(rows, |r| r.tariff_id, TariffServiceRow::split)
        .into_iter()
        .map(|(t, services)| tariff_view(t, services))
        .collect())
}
