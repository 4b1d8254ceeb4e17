use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use mongodb::error::{ErrorKind, WriteFailure};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Error taxonomy for every API operation. Validation / NotFound / Conflict
/// are client errors and carry a human-readable message; anything else is
/// logged and surfaced as an opaque 500.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<mongodb::error::Error> for ApiError {
    fn from(err: mongodb::error::Error) -> Self {
        ApiError::Internal(err.into())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Internal(err) => {
                error!(error = %err, "unexpected server error");
                HttpResponse::InternalServerError().json(json!({
                    "detail": "Internal server error. Please try again later."
                }))
            }
            other => HttpResponse::build(other.status_code()).json(json!({
                "detail": other.to_string()
            })),
        }
    }
}

/// The unique indexes are the authoritative conflict arbiter: a pre-check can
/// race with a concurrent insert, in which case the store rejects the second
/// writer with a duplicate-key write error (code 11000).
pub fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_err)) => write_err.code == 11000,
        _ => false,
    }
}

/// Malformed request bodies (bad JSON, wrong types, unknown enum values) get
/// the same `{"detail": ...}` shape as every other client error.
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    let detail = err.to_string();
    actix_web::error::InternalError::from_response(
        err,
        HttpResponse::BadRequest().json(json!({ "detail": detail })),
    )
    .into()
}
