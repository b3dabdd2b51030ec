//! Public types for the chat API
use serde::{Deserialize, Serialize};

pub use crate::ai::ProxyRequest as ChatRequest;

/// Reply from the proxy. `response` is the only field name clients
/// should read.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct ChatResponse {
    pub response: String,
}

impl ChatResponse {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.into(),
        }
    }
}
