use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum StockroomError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("no active session")]
    Unauthenticated,

    #[error("request body is not valid JSON: {0}")]
    MalformedRequestBody(#[source] serde_json::Error),

    #[error("stored document {path} is not valid JSON: {source}")]
    MalformedStoredDocument {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("storage I/O error on {path}: {source}")]
    StorageIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl StockroomError {
    pub fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StockroomError::StorageIo {
            path: path.into(),
            source,
        }
    }
}

impl IntoResponse for StockroomError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            StockroomError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ApiErrorBody::new("INVALID_CREDENTIALS", "Invalid username or password"),
            ),
            StockroomError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                ApiErrorBody::new("UNAUTHENTICATED", "Login required."),
            ),
            StockroomError::MalformedRequestBody(e) => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody::new("MALFORMED_BODY", format!("Request body is not valid JSON: {e}")),
            ),
            err @ StockroomError::MalformedStoredDocument { .. } => {
                error!(error = %err, "stored collection is corrupt");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorBody::new("CORRUPT_DOCUMENT", "Stored collection could not be parsed."),
                )
            }
            err @ StockroomError::StorageIo { .. } => {
                error!(error = %err, "storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorBody::new("STORAGE_ERROR", "Collection storage is unavailable."),
                )
            }
            err @ (StockroomError::Json(_)
            | StockroomError::Figment(_)
            | StockroomError::Config(_)
            | StockroomError::UnexpectedError(_)) => {
                error!(error = %err, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorBody::new("INTERNAL_ERROR", "An internal server error occurred."),
                )
            }
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

impl ApiErrorBody {
    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
