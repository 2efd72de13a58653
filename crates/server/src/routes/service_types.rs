use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;

use common::types::ServiceTypeView;
use service::catalog::{inputs::ServiceTypeInput, parse_id, service_types};

use crate::errors::{ApiError, ApiResult};
use crate::state::AppState;

#[utoipa::path(
    get, path = "/api/service-types", tag = "service-types",
    responses((status = 200, description = "Types ordered by name", body = [crate::openapi::ServiceTypeDoc]))
)]
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<ServiceTypeView>>> {
    Ok(Json(service_types::list_service_types(&state.db).await?))
}

#[utoipa::path(
    post, path = "/api/service-types", tag = "service-types",
    request_body = crate::openapi::ServiceTypeInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ServiceTypeDoc),
        (status = 400, description = "Validation error", body = crate::openapi::ValidationDoc),
        (status = 409, description = "Name already taken", body = crate::openapi::MessageDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    WithRejection(Json(input), _): WithRejection<Json<ServiceTypeInput>, ApiError>,
) -> ApiResult<(StatusCode, Json<ServiceTypeView>)> {
    let created = service_types::create_service_type(&state.db, &input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/api/service-types/{id}", tag = "service-types",
    params(("id" = String, Path, description = "Service type id")),
    request_body = crate::openapi::ServiceTypeInputDoc,
    responses(
        (status = 200, description = "Renamed", body = crate::openapi::ServiceTypeDoc),
        (status = 400, description = "Validation error", body = crate::openapi::ValidationDoc),
        (status = 404, description = "Service type not found", body = crate::openapi::MessageDoc),
        (status = 409, description = "Name already taken", body = crate::openapi::MessageDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(input), _): WithRejection<Json<ServiceTypeInput>, ApiError>,
) -> ApiResult<Json<ServiceTypeView>> {
    let id = parse_id(&id, "Service type")?;
    Ok(Json(service_types::update_service_type(&state.db, id, &input).await?))
}

#[utoipa::path(
    delete, path = "/api/service-types/{id}", tag = "service-types",
    params(("id" = String, Path, description = "Service type id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Service type not found", body = crate::openapi::MessageDoc),
        (status = 409, description = "Type still used by services", body = crate::openapi::MessageDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    let id = parse_id(&id, "Service type")?;
    service_types::delete_service_type(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
