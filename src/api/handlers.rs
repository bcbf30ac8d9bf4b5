use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::observability::check_backend;
use crate::secrets::SecretsError;

use super::error::ApiError;
use super::routes::ApiState;

/// Request and response body of the secret routes.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct SecretBody {
    #[validate(length(min = 1, message = "secret cannot be empty"))]
    pub secret: String,
}

pub async fn health_handler(State(state): State<ApiState>) -> impl IntoResponse {
    let status = check_backend(state.store.as_ref()).await;
    let code = if status.status.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(status))
}

pub async fn list_keys_handler(State(state): State<ApiState>) -> Result<Json<Vec<String>>, ApiError> {
    let keys = state
        .store
        .list_keys()
        .await
        .map_err(|err| ApiError::from_secrets("Could not list keys", err))?;
    Ok(Json(keys))
}

pub async fn lookup_secret_handler(
    State(state): State<ApiState>,
    Path(key): Path<String>,
) -> Result<Json<SecretBody>, ApiError> {
    const TITLE: &str = "Could not retrieve secret";

    let value = state.store.get_secret(&key).await.map_err(|err| ApiError::from_secrets(TITLE, err))?;
    Ok(Json(SecretBody { secret: into_text(value).map_err(|err| ApiError::from_secrets(TITLE, err))? }))
}

pub async fn store_secret_handler(
    State(state): State<ApiState>,
    Path(key): Path<String>,
    payload: Result<Json<SecretBody>, JsonRejection>,
) -> Result<Json<SecretBody>, ApiError> {
    const TITLE: &str = "Could not store secret";

    let Json(body) = payload.map_err(|rejection| ApiError::bad_request(TITLE, rejection.body_text()))?;
    body.validate().map_err(|err| ApiError::bad_request(TITLE, err.to_string()))?;

    state
        .store
        .store_secret(&key, body.secret.as_bytes())
        .await
        .map_err(|err| ApiError::from_secrets(TITLE, err))?;

    // echo what the backend actually holds
    const READ_BACK_TITLE: &str = "Could not retrieve stored secret";
    let stored = state
        .store
        .get_secret(&key)
        .await
        .map_err(|err| ApiError::from_secrets(READ_BACK_TITLE, err))?;
    let secret = into_text(stored).map_err(|err| ApiError::from_secrets(READ_BACK_TITLE, err))?;

    Ok(Json(SecretBody { secret }))
}

pub async fn delete_secret_handler(
    State(state): State<ApiState>,
    Path(key): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .delete_secret(&key)
        .await
        .map_err(|err| ApiError::from_secrets("Could not delete secret", err))?;
    Ok(StatusCode::NO_CONTENT)
}

fn into_text(value: Vec<u8>) -> Result<String, SecretsError> {
    String::from_utf8(value)
        .map_err(|e| SecretsError::decode(format!("stored secret is not valid UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_text() {
        assert_eq!(into_text(b"value".to_vec()).unwrap(), "value");
        assert!(into_text(vec![0xff, 0xfe]).unwrap_err().is_decode());
    }

    #[test]
    fn test_empty_secret_fails_validation() {
        assert!(SecretBody { secret: String::new() }.validate().is_err());
        assert!(SecretBody { secret: "x".to_string() }.validate().is_ok());
    }
}
