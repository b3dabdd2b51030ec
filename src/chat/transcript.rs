//! The live conversation for one session.
//!
//! Resolve the session id first, then build a `Transcript` and call
//! `initialize` before rendering. `send_user_message` initializes on
//! demand so a forgotten call can't leave the history unloaded.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use serde_json::Value;
use tokio::sync::OnceCell;

use super::log::{ChatLog, ChatLogWriter};
use super::models::{Message, SessionId};
use crate::ai::{Assistant, ProxyRequest};

#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// Nothing was sent
    Ignored(IgnoreReason),
    /// The user message and the reply (or fallback) were appended
    Replied { user: Message, reply: Message },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IgnoreReason {
    EmptyInput,
    Busy,
}

/// Clears the busy flag when the send finishes or is dropped
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct Transcript {
    session_id: SessionId,
    log: Arc<dyn ChatLog>,
    writer: ChatLogWriter,
    assistant: Arc<dyn Assistant>,
    agent: Option<String>,
    context: Option<Value>,
    messages: RwLock<Vec<Message>>,
    loaded: OnceCell<()>,
    busy: AtomicBool,
}

impl Transcript {
    pub fn new(
        session_id: SessionId,
        log: Arc<dyn ChatLog>,
        writer: ChatLogWriter,
        assistant: Arc<dyn Assistant>,
    ) -> Self {
        Self {
            session_id,
            log,
            writer,
            assistant,
            agent: None,
            context: None,
            messages: RwLock::new(Vec::new()),
            loaded: OnceCell::new(),
            busy: AtomicBool::new(false),
        }
    }

    /// Attach the agent name and context blob sent with every prompt
    pub fn with_agent(mut self, agent: Option<String>, context: Option<Value>) -> Self {
        self.agent = agent;
        self.context = context;
        self
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Load the stored history once. An empty or unreadable history
    /// seeds the transcript with the greeting, which is never saved.
    pub async fn initialize(&self) {
        self.loaded
            .get_or_init(|| async {
                let history = match self.log.load_history(&self.session_id).await {
                    Ok(history) => history,
                    Err(e) => {
                        tracing::error!(
                            "Failed to load history for session {}: {}",
                            self.session_id,
                            e
                        );
                        vec![]
                    }
                };

                let seed = if history.is_empty() {
                    vec![Message::greeting()]
                } else {
                    history
                };
                tracing::debug!(
                    "Loaded {} messages for session {}",
                    seed.len(),
                    self.session_id
                );
                *self.messages.write().expect("Unable to write transcript") = seed;
            })
            .await;
    }

    /// Send a prompt and append the reply.
    ///
    /// Blank input and calls made while another send is in flight are
    /// ignored. Vendor failures come back as fallback text in the reply
    /// and both messages are queued for persistence without waiting.
    pub async fn send_user_message(&self, text: &str) -> SendOutcome {
        if text.trim().is_empty() {
            return SendOutcome::Ignored(IgnoreReason::EmptyInput);
        }
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("Send ignored, a request is already in flight");
            return SendOutcome::Ignored(IgnoreReason::Busy);
        }
        let _guard = BusyGuard(&self.busy);

        self.initialize().await;

        let user = Message::user(text);
        self.push(user.clone());
        self.writer.append(&self.session_id, &user);

        let request = ProxyRequest {
            message: text.to_string(),
            agent: self.agent.clone(),
            context: self.context.clone(),
        };
        let reply_text = self.assistant.reply(&request).await;

        let reply = Message::ai(&reply_text);
        self.push(reply.clone());
        self.writer.append(&self.session_id, &reply);

        SendOutcome::Replied { user, reply }
    }

    pub fn messages(&self) -> Vec<Message> {
        self.messages
            .read()
            .expect("Unable to read transcript")
            .clone()
    }

    pub fn len(&self) -> usize {
        self.messages.read().expect("Unable to read transcript").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Wait for queued writes to be attempted
    pub async fn flush(&self) {
        self.writer.flush().await;
    }

    fn push(&self, message: Message) {
        self.messages
            .write()
            .expect("Unable to write transcript")
            .push(message);
    }
}
