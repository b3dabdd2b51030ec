//! Client for a running proxy's `POST /api/chat` endpoint.

use std::time::Duration;

use anyhow::{Error, Result, anyhow};
use async_trait::async_trait;

use crate::ai::proxy::{Assistant, FALLBACK_REPLY, ProxyRequest};
use crate::api::public::chat::ChatResponse;

pub struct ProxyClient {
    base_url: String,
    timeout: Duration,
}

impl ProxyClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub async fn send(&self, request: &ProxyRequest) -> Result<String, Error> {
        let url = format!("{}/api/chat", self.base_url);
        let response = reqwest::Client::new()
            .post(url)
            .timeout(self.timeout)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("Proxy responded with {}", status));
        }

        let body: ChatResponse = response.json().await?;
        Ok(body.response)
    }
}

#[async_trait]
impl Assistant for ProxyClient {
    async fn reply(&self, request: &ProxyRequest) -> String {
        self.send(request).await.unwrap_or_else(|e| {
            tracing::error!("Proxy request failed: {}", e);
            FALLBACK_REPLY.to_string()
        })
    }
}
