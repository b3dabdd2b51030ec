//! Router for the chat history API

use std::sync::{Arc, RwLock};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use super::public;
use crate::api::state::AppState;
use crate::chat::{Message, SessionId};

type SharedState = Arc<RwLock<AppState>>;

/// Get the stored messages for a session, oldest first. An unknown
/// session is an empty list, the greeting is left to the client.
async fn history_list(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<public::HistoryResponse>, crate::api::public::ApiError> {
    let chat_log = state.read().expect("Unable to read share state").chat_log.clone();
    let session_id = SessionId::new(&id);
    let messages = chat_log.load_history(&session_id).await?;

    Ok(Json(public::HistoryResponse {
        session_id,
        messages,
    }))
}

/// Append one message to a session's log
async fn history_append(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(payload): Json<public::AppendRequest>,
) -> Result<Response, crate::api::public::ApiError> {
    if payload.text.trim().is_empty() {
        return Ok((StatusCode::BAD_REQUEST, "Text must not be empty").into_response());
    }

    let chat_log = state.read().expect("Unable to read share state").chat_log.clone();
    let message = Message::new(payload.sender, &payload.text);
    chat_log.append(&SessionId::new(&id), &message).await?;

    Ok(StatusCode::CREATED.into_response())
}

/// Create the history router
pub fn router() -> Router<SharedState> {
    Router::new().route("/{id}", get(history_list).post(history_append))
}
