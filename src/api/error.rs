use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::secrets::SecretsError;

/// Backend name reported in every error body.
pub const BACKEND: &str = "vault";

const INTERNAL_DETAIL: &str = "internal error while accessing the secret backend";

#[derive(Debug)]
pub enum ApiError {
    BadRequest { title: &'static str, detail: String },
    Conflict { title: &'static str, detail: String },
    NotFound { title: &'static str, detail: String },
    Internal { title: &'static str },
}

impl ApiError {
    pub fn bad_request<S: Into<String>>(title: &'static str, detail: S) -> Self {
        ApiError::BadRequest { title, detail: detail.into() }
    }

    /// Classify a store failure. Decode and backend failures are logged with
    /// their full detail here and reach the client only as a generic message.
    pub fn from_secrets(title: &'static str, err: SecretsError) -> Self {
        match err {
            SecretsError::NotFound { .. } => {
                tracing::debug!(error = %err, "Secret not found");
                ApiError::NotFound { title, detail: err.to_string() }
            }
            SecretsError::AlreadyExists { .. } => {
                tracing::debug!(error = %err, "Secret already exists");
                ApiError::Conflict { title, detail: err.to_string() }
            }
            SecretsError::Decode { .. } | SecretsError::Backend { .. } | SecretsError::Config { .. } => {
                tracing::error!(error = %err, title, "Secret backend request failed");
                ApiError::Internal { title }
            }
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error body returned by the secret routes.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub backend: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let (title, detail) = match self {
            ApiError::BadRequest { title, detail }
            | ApiError::Conflict { title, detail }
            | ApiError::NotFound { title, detail } => (title, detail),
            ApiError::Internal { title } => (title, INTERNAL_DETAIL.to_string()),
        };

        let body = ErrorResponse {
            backend: BACKEND.to_string(),
            title: title.to_string(),
            status: status.as_u16(),
            detail,
        };
        (status, Json(body)).into_response()
    }
}
