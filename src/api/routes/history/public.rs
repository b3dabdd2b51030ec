//! Public types for the chat history API
use serde::{Deserialize, Serialize};

use crate::chat::{Message, Sender, SessionId};

#[derive(Serialize, Deserialize)]
pub struct HistoryResponse {
    pub session_id: SessionId,
    pub messages: Vec<Message>,
}

#[derive(Serialize, Deserialize)]
pub struct AppendRequest {
    pub sender: Sender,
    pub text: String,
}
