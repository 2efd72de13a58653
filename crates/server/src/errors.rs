use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use service::errors::ServiceError;
use service::validation::FieldErrors;

/// HTTP face of every handler failure.
///
/// Domain errors render as `{ "message": ... }`; schema failures add the
/// per-field breakdown.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct MessageBody<'a> {
    message: &'a str,
}

#[derive(Serialize)]
struct ValidationBody<'a> {
    message: &'a str,
    #[serde(flatten)]
    errors: &'a FieldErrors,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(fe) => ApiError::Validation(fe),
            ServiceError::BadRequest(m) => ApiError::BadRequest(m),
            ServiceError::NotFound(m) => ApiError::NotFound(m),
            ServiceError::Conflict(m) => ApiError::Conflict(m),
            ServiceError::Db(m) => ApiError::Internal(m),
        }
    }
}

/// Unparseable bodies are schema failures too.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let mut fe = FieldErrors::default();
        fe.add_form(rejection.body_text());
        ApiError::Validation(fe)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Validation(fe) => {
                warn!(status = status.as_u16(), errors = %fe, "request rejected");
                let body = ValidationBody { message: "Validation failed", errors: fe };
                (status, Json(body)).into_response()
            }
            ApiError::Internal(detail) => {
                error!(error = %detail, "request failed");
                (status, Json(MessageBody { message: "Internal Server Error" })).into_response()
            }
            ApiError::BadRequest(m) | ApiError::NotFound(m) | ApiError::Conflict(m) => {
                warn!(status = status.as_u16(), message = %m, "request rejected");
                (status, Json(MessageBody { message: m })).into_response()
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
