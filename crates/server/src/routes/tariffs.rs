use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use tracing::info;

use common::types::TariffView;
use service::catalog::{inputs::TariffInput, parse_id, tariffs};

use crate::errors::{ApiError, ApiResult};
use crate::state::AppState;

#[utoipa::path(
    get, path = "/api/tariffs", tag = "tariffs",
    responses(
        (status = 200, description = "All tariffs with their services", body = [crate::openapi::TariffDoc]),
        (status = 500, description = "Store failure", body = crate::openapi::MessageDoc)
    )
)]
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<TariffView>>> {
    let list = tariffs::list_tariffs(&state.db).await?;
    info!(count = list.len(), "list tariffs");
    Ok(Json(list))
}

#[utoipa::path(
    get, path = "/api/tariffs/{id}", tag = "tariffs",
    params(("id" = String, Path, description = "Tariff id")),
    responses(
        (status = 200, description = "Tariff", body = crate::openapi::TariffDoc),
        (status = 404, description = "Tariff not found", body = crate::openapi::MessageDoc)
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<TariffView>> {
    let id = parse_id(&id, "Tariff")?;
    Ok(Json(tariffs::get_tariff(&state.db, id).await?))
}

#[utoipa::path(
    post, path = "/api/tariffs", tag = "tariffs",
    request_body = crate::openapi::TariffInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::TariffDoc),
        (status = 400, description = "Validation error", body = crate::openapi::ValidationDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    WithRejection(Json(input), _): WithRejection<Json<TariffInput>, ApiError>,
) -> ApiResult<(StatusCode, Json<TariffView>)> {
    let created = tariffs::create_tariff(&state.db, &input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/api/tariffs/{id}", tag = "tariffs",
    params(("id" = String, Path, description = "Tariff id")),
    request_body = crate::openapi::TariffInputDoc,
    responses(
        (status = 200, description = "Renamed", body = crate::openapi::TariffDoc),
        (status = 400, description = "Validation error", body = crate::openapi::ValidationDoc),
        (status = 404, description = "Tariff not found", body = crate::openapi::MessageDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(input), _): WithRejection<Json<TariffInput>, ApiError>,
) -> ApiResult<Json<TariffView>> {
    let id = parse_id(&id, "Tariff")?;
    Ok(Json(tariffs::update_tariff(&state.db, id, &input).await?))
}

#[utoipa::path(
    delete, path = "/api/tariffs/{id}", tag = "tariffs",
    params(("id" = String, Path, description = "Tariff id")),
    responses(
        (status = 204, description = "Deleted together with its services"),
        (status = 404, description = "Tariff not found", body = crate::openapi::MessageDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    let id = parse_id(&id, "Tariff")?;
    tariffs::delete_tariff(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
