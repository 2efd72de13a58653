pub mod service_types;
pub mod services;
pub mod tariffs;

use std::path::Path;

use axum::{
    extract::Request,
    http::Method,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use tower::ServiceExt;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::errors::ApiError;
use crate::openapi::ApiDoc;
use crate::state::AppState;

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Liveness", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// JSON API under `/api`, plus `/health` and the docs UI.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/tariffs", get(tariffs::list).post(tariffs::create))
        .route(
            "/api/tariffs/:id",
            get(tariffs::get).put(tariffs::update).delete(tariffs::delete),
        )
        .route("/api/tariffs/:id/services", post(services::create))
        .route("/api/service-types", get(service_types::list).post(service_types::create))
        .route(
            "/api/service-types/:id",
            put(service_types::update).delete(service_types::delete),
        )
        .route("/api/services/:id", put(services::update).delete(services::delete))
        .route("/api/services/:id/move", post(services::move_to))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

/// Unmatched requests: JSON 404 under `/api` and for anything but GET/HEAD,
/// otherwise a static file or the single-page shell.
async fn fallback(static_dir: ServeDir<ServeFile>, req: Request) -> Response {
    let readable = req.method() == Method::GET || req.method() == Method::HEAD;
    if !readable || req.uri().path().starts_with("/api/") {
        return ApiError::NotFound("Not found".into()).into_response();
    }
    match static_dir.oneshot(req).await {
        Ok(res) => res.into_response(),
        Err(never) => match never {},
    }
}

/// Build the full application router: API routes first, then the
/// single-page frontend for every other path.
pub fn build_router(state: AppState, cors: CorsLayer, frontend_dir: &str) -> Router {
    let index = Path::new(frontend_dir).join("index.html");
    let static_dir = ServeDir::new(frontend_dir).fallback(ServeFile::new(index));

    api_router()
        .fallback(move |req: Request| fallback(static_dir.clone(), req))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
