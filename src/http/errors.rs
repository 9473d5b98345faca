//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::appeal::{FieldError, FieldErrors};
use crate::store::StoreError;

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced over HTTP.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Client-caused: the submission violated field rules. Carries
    /// the full ordered error list.
    #[error("appeal validation failed: {0}")]
    Validation(FieldErrors),

    /// Server-side: the store could not commit the unit. Surfaced as
    /// an opaque failure; details stay in the logs.
    #[error("storage failure: {0}")]
    Storage(#[from] StoreError),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body.
///
/// `fields` is present only for validation failures and preserves the
/// validator's ordering.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        let code = err.status_code().as_u16();
        match err {
            ApiError::Validation(errors) => Self {
                error: "appeal validation failed".to_string(),
                code,
                fields: errors.into_vec(),
            },
            ApiError::Storage(_) => Self {
                error: "failed to persist appeal".to_string(),
                code,
                fields: Vec::new(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}
