use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;

use common::types::ServiceView;
use service::catalog::{
    inputs::{MoveInput, ServiceInput, ServicePatchInput},
    parse_id, services,
};

use crate::errors::{ApiError, ApiResult};
use crate::state::AppState;

#[utoipa::path(
    post, path = "/api/tariffs/{id}/services", tag = "services",
    params(("id" = String, Path, description = "Owning tariff id")),
    request_body = crate::openapi::ServiceInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ServiceDoc),
        (status = 400, description = "Validation error or unknown type", body = crate::openapi::ValidationDoc),
        (status = 404, description = "Tariff not found", body = crate::openapi::MessageDoc),
        (status = 409, description = "Tariff already has this type", body = crate::openapi::MessageDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Path(tariff_id): Path<String>,
    WithRejection(Json(input), _): WithRejection<Json<ServiceInput>, ApiError>,
) -> ApiResult<(StatusCode, Json<ServiceView>)> {
    let tariff_id = parse_id(&tariff_id, "Tariff")?;
    let created = services::create_service(&state.db, tariff_id, &input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/api/services/{id}", tag = "services",
    params(("id" = String, Path, description = "Service id")),
    request_body = crate::openapi::ServicePatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ServiceDoc),
        (status = 400, description = "Validation error or empty patch", body = crate::openapi::ValidationDoc),
        (status = 404, description = "Service not found", body = crate::openapi::MessageDoc),
        (status = 409, description = "Tariff already has this type", body = crate::openapi::MessageDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(input), _): WithRejection<Json<ServicePatchInput>, ApiError>,
) -> ApiResult<Json<ServiceView>> {
    let id = parse_id(&id, "Service")?;
    Ok(Json(services::update_service(&state.db, id, &input).await?))
}

#[utoipa::path(
    delete, path = "/api/services/{id}", tag = "services",
    params(("id" = String, Path, description = "Service id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Service not found", body = crate::openapi::MessageDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    let id = parse_id(&id, "Service")?;
    services::delete_service(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post, path = "/api/services/{id}/move", tag = "services",
    params(("id" = String, Path, description = "Service id")),
    request_body = crate::openapi::MoveInputDoc,
    responses(
        (status = 200, description = "Moved", body = crate::openapi::ServiceDoc),
        (status = 400, description = "Validation error", body = crate::openapi::ValidationDoc),
        (status = 404, description = "Service or target tariff not found", body = crate::openapi::MessageDoc),
        (status = 409, description = "Target already has this type", body = crate::openapi::MessageDoc)
    )
)]
pub async fn move_to(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(input), _): WithRejection<Json<MoveInput>, ApiError>,
) -> ApiResult<Json<ServiceView>> {
    let id = parse_id(&id, "Service")?;
    Ok(Json(services::move_service(&state.db, id, &input).await?))
}
