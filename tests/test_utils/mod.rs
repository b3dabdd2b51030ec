//! Test utilities for integration tests
#![allow(dead_code)]

use std::sync::{Arc, RwLock};

use axum::{Router, body::Body};

use agentdash::api::AppState;
use agentdash::api::app;
use agentdash::chat::{ChatLog, SqliteChatLog};
use agentdash::core::AppConfig;

pub fn test_config(vendor_url: &str) -> AppConfig {
    AppConfig {
        vendor_url: vendor_url.to_string(),
        vendor_key: String::from("test-api-key"),
        vendor_model: String::from("gpt-4o-mini"),
        repo_url: String::from("sqlite::memory:"),
        repo_key: String::from("test-repo-key"),
        repo_table: String::from("chats"),
        storage_path: std::env::temp_dir().display().to_string(),
        web_ui_path: String::from("./web-ui/dist"),
        system_message: String::from("You are a helpful assistant."),
        request_timeout_secs: 5,
    }
}

/// Creates a test application router backed by an in-memory chat log
/// and the given vendor URL. The chat log is returned so tests can
/// inspect what was persisted.
pub async fn test_app(vendor_url: &str) -> (Router, Arc<dyn ChatLog>) {
    let chat_log: Arc<dyn ChatLog> = Arc::new(
        SqliteChatLog::open_in_memory()
            .await
            .expect("Failed to open chat log"),
    );
    let app_state = AppState::new(chat_log.clone(), test_config(vendor_url));
    (app(Arc::new(RwLock::new(app_state))), chat_log)
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not utf-8")
}

/// A successful chat completion with the given text
pub fn completion_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1694268190,
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
    .to_string()
}
