use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::error;

use quill_core::ServiceError;
use quill_types::models::Account;

use crate::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(candidate): Json<Account>,
) -> Result<impl IntoResponse, StatusCode> {
    // Run blocking DB work off the async runtime
    let accounts = state.accounts.clone();
    let result = tokio::task::spawn_blocking(move || accounts.register(candidate))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    match result {
        Ok(account) => Ok(Json(account)),
        Err(err) => {
            if let ServiceError::Storage(e) = &err {
                error!("registration failed on storage: {:#}", e);
            }
            // Validation failures and username conflicts alike surface as 400.
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Account>,
) -> Result<impl IntoResponse, StatusCode> {
    let accounts = state.accounts.clone();
    let result = tokio::task::spawn_blocking(move || accounts.login(credentials))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    match result {
        Ok(account) => Ok(Json(account)),
        Err(err) => {
            if let ServiceError::Storage(e) = &err {
                error!("login failed on storage: {:#}", e);
            }
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}
