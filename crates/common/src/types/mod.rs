//! JSON view shapes returned by the HTTP API.
//!
//! Field names are camelCase on the wire. The server builds these from
//! joined rows; the client deserializes them back.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// A service category, globally unique by name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServiceTypeView {
    pub id: Uuid,
    pub name: String,
}

/// Resolved type embedded in each service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TypeRef {
    pub id: Uuid,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceView {
    pub id: Uuid,
    pub value: f64,
    pub unit: String,
    pub tariff_id: Uuid,
    pub type_id: Uuid,
    #[serde(rename = "type")]
    pub service_type: TypeRef,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TariffView {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
    pub services: Vec<ServiceView>,
}
