//! Router for the dashboard's static data

use std::sync::{Arc, RwLock};

use axum::{Json, Router, routing::get};

use super::public;
use crate::api::state::AppState;

type SharedState = Arc<RwLock<AppState>>;

async fn status() -> Json<public::StatusResponse> {
    Json(public::StatusResponse {
        status: String::from("Backend running"),
    })
}

async fn quick_stats() -> Json<public::QuickStats> {
    Json(public::QuickStats::default())
}

/// Create the dashboard router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/status", get(status))
        .route("/stats", get(quick_stats))
}
