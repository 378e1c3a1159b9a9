use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use songlib_core::error::CoreError;
use songlib_metadata::MetadataError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `songlib_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A query against the database failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The metadata provider could not be reached or rejected the lookup.
    #[error("Metadata provider error: {0}")]
    Metadata(#[from] MetadataError),

    /// The request body could not be decoded.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::OutOfRange { .. } => {
                    (StatusCode::NOT_FOUND, "OUT_OF_RANGE", core.to_string())
                }
                CoreError::InvalidParameter(msg) => {
                    (StatusCode::BAD_REQUEST, "INVALID_PARAMETER", msg.clone())
                }
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Metadata provider errors ---
            AppError::Metadata(err) => {
                tracing::error!(error = %err, "Metadata provider error");
                (
                    StatusCode::BAD_GATEWAY,
                    "METADATA_UNAVAILABLE",
                    "Failed to get data from the metadata provider".to_string(),
                )
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map a sqlx error to a 500 with a sanitized message.
///
/// Repositories report missing rows as `None` or `false`, so any sqlx
/// error reaching here is a storage failure. The full error is logged.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    tracing::error!(error = %err, "Database operation failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "QUERY_FAILED",
        "Database operation failed".to_string(),
    )
}
