//! Router for the chat API

use std::sync::{Arc, RwLock};

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};

use super::public;
use crate::api::state::AppState;

type SharedState = Arc<RwLock<AppState>>;

/// Forward a prompt to the LLM vendor. Vendor failures are answered
/// with the fallback text and a 200, never an error status.
async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<public::ChatRequest>,
) -> Response {
    if payload.message.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, "Message must not be empty").into_response();
    }

    let proxy = state.read().expect("Unable to read share state").proxy.clone();
    tracing::debug!(
        "Chat request for agent {}",
        payload.agent.as_deref().unwrap_or("assistant")
    );
    let response = proxy.forward(&payload).await;

    Json(public::ChatResponse { response }).into_response()
}

/// Create the chat router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", post(chat_handler))
}
