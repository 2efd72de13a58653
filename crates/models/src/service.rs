use sea_orm::{entity::prelude::*, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, service_type, tariff, validate};

pub const UNIT_MAX: usize = 50;

/// A parameterised instance of a service type inside one tariff.
/// `(tariff_id, type_id)` is unique.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Double")]
    pub value: f64,
    pub unit: String,
    pub tariff_id: Uuid,
    pub type_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Tariff, ServiceType }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Tariff => Entity::belongs_to(tariff::Entity)
                .from(Column::TariffId)
                .to(tariff::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
            Relation::ServiceType => Entity::belongs_to(service_type::Entity)
                .from(Column::TypeId)
                .to(service_type::Column::Id)
                .on_delete(ForeignKeyAction::NoAction)
                .into(),
        }
    }
}

impl Related<tariff::Entity> for Entity {
    fn to() -> RelationDef { Relation::Tariff.def() }
}

impl Related<service_type::Entity> for Entity {
    fn to() -> RelationDef { Relation::ServiceType.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_unit(unit: &str) -> Result<String, errors::ModelError> {
    validate::required_text(unit, UNIT_MAX)
}

pub fn validate_value(value: f64) -> Result<f64, errors::ModelError> {
    validate::finite_number(value)
}

/// New row under `tariff_id`; fields must already be validated.
pub fn draft(tariff_id: Uuid, type_id: Uuid, value: f64, unit: String) -> ActiveModel {
    let now = Utc::now().into();
    ActiveModel {
        id: Set(Uuid::new_v4()),
        value: Set(value),
        unit: Set(unit),
        tariff_id: Set(tariff_id),
        type_id: Set(type_id),
        created_at: Set(now),
        updated_at: Set(now),
    }
}
