//! Schema-only mirrors of the wire types, kept apart from the handlers.

use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationDoc {
    pub message: String,
    pub form_errors: Vec<String>,
    /// Field name to messages.
    #[schema(value_type = Object)]
    pub field_errors: std::collections::BTreeMap<String, Vec<String>>,
}

#[derive(ToSchema, Serialize)]
pub struct ServiceTypeDoc { pub id: Uuid, pub name: String }

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDoc {
    pub id: Uuid,
    pub value: f64,
    pub unit: String,
    pub tariff_id: Uuid,
    pub type_id: Uuid,
    #[serde(rename = "type")]
    pub service_type: ServiceTypeDoc,
}

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TariffDoc {
    pub id: Uuid,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
    pub updated_at: chrono::DateTime<chrono::FixedOffset>,
    pub services: Vec<ServiceDoc>,
}

#[derive(ToSchema)]
pub struct TariffInputDoc { pub name: String }

#[derive(ToSchema)]
pub struct ServiceTypeInputDoc { pub name: String }

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInputDoc {
    pub type_id: Uuid,
    pub value: f64,
    pub unit: String,
}

/// Every field optional; at least one required.
#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePatchDoc {
    pub type_id: Option<Uuid>,
    pub value: Option<f64>,
    pub unit: Option<String>,
}

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveInputDoc {
    pub target_tariff_id: Uuid,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::tariffs::list,
        crate::routes::tariffs::get,
        crate::routes::tariffs::create,
        crate::routes::tariffs::update,
        crate::routes::tariffs::delete,
        crate::routes::service_types::list,
        crate::routes::service_types::create,
        crate::routes::service_types::update,
        crate::routes::service_types::delete,
        crate::routes::services::create,
        crate::routes::services::update,
        crate::routes::services::delete,
        crate::routes::services::move_to,
    ),
    components(
        schemas(
            HealthResponse,
            MessageDoc,
            ValidationDoc,
            ServiceTypeDoc,
            ServiceDoc,
            TariffDoc,
            TariffInputDoc,
            ServiceTypeInputDoc,
            ServiceInputDoc,
            ServicePatchDoc,
            MoveInputDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "tariffs"),
        (name = "service-types"),
        (name = "services")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = doc["paths"].as_object().unwrap();
        for p in [
            "/health",
            "/api/tariffs",
            "/api/tariffs/{id}",
            "/api/tariffs/{id}/services",
            "/api/service-types",
            "/api/service-types/{id}",
            "/api/services/{id}",
            "/api/services/{id}/move",
        ] {
            assert!(paths.contains_key(p), "missing {p}");
        }
    }
}
