//! Router for the content generator API

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

/// Generate marketing copy from a content brief
async fn generate_handler(
    State(state): State<SharedState>,
    Json(brief): Json<public::GenerateRequest>,
) -> Response {
    if brief.product.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, "Product must not be empty").into_response();
    }

    let proxy = state.read().expect("Unable to read share state").proxy.clone();
    let response = proxy.generate_content(&brief).await;

    Json(public::GenerateResponse { response }).into_response()
}

/// Create the generate router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", post(generate_handler))
}
