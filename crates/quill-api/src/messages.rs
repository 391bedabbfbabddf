use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use quill_core::ServiceError;
use quill_types::api::UpdateMessageText;
use quill_types::models::{Message, NewMessage};

use crate::AppState;

pub async fn create(
    State(state): State<AppState>,
    Json(candidate): Json<NewMessage>,
) -> Result<impl IntoResponse, StatusCode> {
    let messages = state.messages.clone();
    let result = tokio::task::spawn_blocking(move || messages.create(candidate))
        .await
        .map_err(join_error)?;

    match result {
        Ok(message) => Ok(Json(message)),
        Err(err) => {
            if let ServiceError::Storage(e) = &err {
                error!("message create failed on storage: {:#}", e);
            }
            // Bad text and a missing author alike surface as 400.
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

pub async fn list_all(State(state): State<AppState>) -> Result<impl IntoResponse, StatusCode> {
    let messages = state.messages.clone();
    let result = tokio::task::spawn_blocking(move || messages.retrieve_all())
        .await
        .map_err(join_error)?;

    result.map(Json).map_err(|err| {
        error!("message listing failed: {}", err);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, StatusCode> {
    let messages = state.messages.clone();
    let result = tokio::task::spawn_blocking(move || messages.retrieve_by_id(id))
        .await
        .map_err(join_error)?;

    match result {
        Ok(found) => Ok(message_or_empty(found)),
        Err(err) => {
            error!("message lookup failed: {}", err);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

pub async fn delete_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, StatusCode> {
    let messages = state.messages.clone();
    let result = tokio::task::spawn_blocking(move || messages.delete_by_id(id))
        .await
        .map_err(join_error)?;

    match result {
        Ok(deleted) => Ok(message_or_empty(deleted)),
        Err(err) => {
            error!("message delete failed: {}", err);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

pub async fn update_text(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateMessageText>,
) -> Result<impl IntoResponse, StatusCode> {
    let messages = state.messages.clone();
    let result = tokio::task::spawn_blocking(move || messages.update_text(id, &body.text))
        .await
        .map_err(join_error)?;

    match result {
        Ok(message) => Ok(Json(message)),
        Err(err) => {
            if let ServiceError::Storage(e) = &err {
                error!("message update failed on storage: {:#}", e);
            }
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

/// Permissive by contract: a malformed author id or a storage failure both
/// yield 200 with an empty body, never an error status.
pub async fn list_for_author(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Response {
    let Ok(author_id) = raw_id.parse::<i64>() else {
        return StatusCode::OK.into_response();
    };

    let messages = state.messages.clone();
    let result =
        tokio::task::spawn_blocking(move || messages.retrieve_all_for_author(author_id)).await;

    match result {
        Ok(Ok(listing)) => Json(listing).into_response(),
        Ok(Err(err)) => {
            warn!("author listing failed, returning empty body: {}", err);
            StatusCode::OK.into_response()
        }
        Err(e) => {
            error!("spawn_blocking join error: {}", e);
            StatusCode::OK.into_response()
        }
    }
}

/// Found messages render as JSON; a lookup miss is 200 with an empty body.
fn message_or_empty(found: Option<Message>) -> Response {
    match found {
        Some(message) => Json(message).into_response(),
        None => StatusCode::OK.into_response(),
    }
}

fn join_error(e: tokio::task::JoinError) -> StatusCode {
    error!("spawn_blocking join error: {}", e);
    StatusCode::INTERNAL_SERVER_ERROR
}
