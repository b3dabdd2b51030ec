use std::time::Duration;

use anyhow::{Error, Result, anyhow};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub enum Role {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "user")]
    User,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Self {
        Message {
            role,
            content: content.to_string(),
        }
    }
}

/// Request a single, non-streaming chat completion from an OpenAI
/// compatible API. Non-success statuses are returned as errors so
/// callers don't have to inspect the body to find out.
pub async fn completion(
    messages: &[Message],
    api_hostname: &str,
    api_key: &str,
    model: &str,
    timeout: Duration,
) -> Result<Value, Error> {
    let payload = json!({
        "model": model,
        "messages": messages,
    });
    let url = format!("{}/v1/chat/completions", api_hostname.trim_end_matches("/"));
    let response = reqwest::Client::new()
        .post(url)
        .bearer_auth(api_key)
        .header("Content-Type", "application/json")
        .timeout(timeout)
        .json(&payload)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(anyhow!("Completion request failed with {}: {}", status, body));
    }

    Ok(response.json().await?)
}

/// Pull the text out of the first choice of a completion response.
///
/// OpenAI compatible vendors don't all agree on where the text goes,
/// so this checks `message.content`, then `text`, then `response`
/// (which some return as a list of strings).
pub fn first_choice_text(completion: &Value) -> Option<String> {
    let choice = completion["choices"].get(0)?;
    let text = choice["message"]["content"]
        .as_str()
        .or_else(|| choice["text"].as_str())
        .or_else(|| choice["response"].as_str())
        .or_else(|| choice["response"].get(0).and_then(Value::as_str))?;

    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
