//! Forwards prompts from the dashboard to the configured LLM vendor.
//!
//! Every failure is absorbed here: callers always get text back, either
//! the completion or one of the fixed fallback strings.

use std::time::Duration;

use anyhow::{Error, Result};
use async_trait::async_trait;
use handlebars::Handlebars;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::ai::prompt::{self, Agent, AgentContext, ContentBrief, Prompt};
use crate::core::AppConfig;
use crate::openai::{Message, Role, completion, first_choice_text};

/// Shown in place of a reply when the vendor can't be reached or
/// answers with a non-success status.
pub const FALLBACK_REPLY: &str = "⚠️ There was a problem reaching the AI server.";

/// Shown when the vendor answered but returned no text.
pub const EMPTY_REPLY: &str = "⚠️ The AI did not return any text.";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProxyRequest {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl ProxyRequest {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            agent: None,
            context: None,
        }
    }
}

/// Anything that can turn a prompt into an assistant reply. Replies
/// are infallible by contract, failures come back as fallback text.
#[async_trait]
pub trait Assistant: Send + Sync {
    async fn reply(&self, request: &ProxyRequest) -> String;
}

pub struct LlmProxy {
    vendor_url: String,
    vendor_key: String,
    model: String,
    system_message: String,
    timeout: Duration,
    templates: Handlebars<'static>,
}

impl LlmProxy {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            vendor_url: config.vendor_url.clone(),
            vendor_key: config.vendor_key.clone(),
            model: config.vendor_model.clone(),
            system_message: config.system_message.clone(),
            timeout: Duration::from_secs(config.request_timeout_secs),
            templates: prompt::templates(),
        }
    }

    /// Build the `[system, user]` pair sent to the vendor
    pub fn messages(&self, request: &ProxyRequest) -> Result<Vec<Message>, Error> {
        let agent = Agent::from_name(request.agent.as_deref());
        let persona = agent.persona().unwrap_or(self.system_message.as_str());
        let context = request
            .context
            .as_ref()
            .map(AgentContext::from_value)
            .unwrap_or_default();
        let system = self.templates.render(
            &Prompt::AgentContext.to_string(),
            &json!({"persona": persona, "context": context}),
        )?;

        Ok(vec![
            Message::new(Role::System, system.trim()),
            Message::new(Role::User, &request.message),
        ])
    }

    /// Forward a chat prompt and return the reply text
    pub async fn forward(&self, request: &ProxyRequest) -> String {
        match self.messages(request) {
            Ok(messages) => self.complete(&messages).await,
            Err(e) => {
                tracing::error!("Failed to build prompt: {}", e);
                FALLBACK_REPLY.to_string()
            }
        }
    }

    /// Render a marketing content brief and return the generated copy
    pub async fn generate_content(&self, brief: &ContentBrief) -> String {
        let user_prompt = match self
            .templates
            .render(&Prompt::ContentBrief.to_string(), brief)
        {
            Ok(p) => p,
            Err(e) => {
                tracing::error!("Failed to render content brief: {}", e);
                return FALLBACK_REPLY.to_string();
            }
        };
        let persona = Agent::Content
            .persona()
            .unwrap_or(self.system_message.as_str())
            .to_string();
        let messages = vec![
            Message::new(Role::System, &persona),
            Message::new(Role::User, &user_prompt),
        ];
        self.complete(&messages).await
    }

    async fn complete(&self, messages: &[Message]) -> String {
        tracing::debug!("Forwarding {} messages to {}", messages.len(), self.vendor_url);
        let result = completion(
            messages,
            &self.vendor_url,
            &self.vendor_key,
            &self.model,
            self.timeout,
        )
        .await;

        match result {
            Ok(resp) => first_choice_text(&resp).unwrap_or_else(|| {
                tracing::error!("Completion had no text: {}", resp);
                EMPTY_REPLY.to_string()
            }),
            Err(e) => {
                tracing::error!("LLM vendor request failed: {}", e);
                FALLBACK_REPLY.to_string()
            }
        }
    }
}

#[async_trait]
impl Assistant for LlmProxy {
    async fn reply(&self, request: &ProxyRequest) -> String {
        self.forward(request).await
    }
}
