//! Chat log backed by a hosted table speaking the PostgREST dialect
//! (Supabase and friends).

use anyhow::{Error, Result, anyhow};
use async_trait::async_trait;
use serde_json::json;

use super::log::ChatLog;
use super::models::{ChatRow, Message, SessionId};

pub struct RestChatLog {
    client: reqwest::Client,
    table_url: String,
    api_key: String,
}

impl RestChatLog {
    pub fn new(base_url: &str, api_key: &str, table: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            table_url: format!("{}/rest/v1/{}", base_url.trim_end_matches('/'), table),
            api_key: api_key.to_string(),
        }
    }

    fn request(&self, method: reqwest::Method) -> reqwest::RequestBuilder {
        self.client
            .request(method, &self.table_url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, Error> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(anyhow!("Chat log request failed with {}: {}", status, body))
}

#[async_trait]
impl ChatLog for RestChatLog {
    async fn append(&self, session_id: &SessionId, message: &Message) -> Result<(), Error> {
        let response = self
            .request(reqwest::Method::POST)
            .header("Prefer", "return=minimal")
            .json(&json!({
                "sender": message.sender,
                "text": message.text,
                "chat_session_id": session_id,
            }))
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn load_history(&self, session_id: &SessionId) -> Result<Vec<Message>, Error> {
        let response = self
            .request(reqwest::Method::GET)
            .query(&[
                ("select", "*".to_string()),
                ("chat_session_id", format!("eq.{}", session_id)),
                ("order", "created_at.asc".to_string()),
            ])
            .send()
            .await?;
        let rows: Vec<ChatRow> = ensure_success(response).await?.json().await?;
        Ok(rows.into_iter().map(Message::from).collect())
    }
}
