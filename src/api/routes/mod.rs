//! API routes module

pub mod chat;
pub mod dashboard;
pub mod generate;
pub mod history;

use std::sync::{Arc, RwLock};

use crate::api::state::AppState;
use axum::Router;

type SharedState = Arc<RwLock<AppState>>;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // LLM proxy
        .nest("/chat", chat::router())
        // Content generator
        .nest("/generate", generate::router())
        // Chat log for a session
        .nest("/history", history::router())
        // Status and quick stats
        .merge(dashboard::router())
}
