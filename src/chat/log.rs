//! The chat log repository: an append-only, per-session message store.

use std::sync::Arc;

use anyhow::{Error, Result};
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use super::db::SqliteChatLog;
use super::models::{Message, SessionId};
use super::rest::RestChatLog;
use crate::core::AppConfig;

#[async_trait]
pub trait ChatLog: Send + Sync {
    /// Insert one message for the session. The store assigns the
    /// creation time.
    async fn append(&self, session_id: &SessionId, message: &Message) -> Result<(), Error>;

    /// All messages for the session, oldest first
    async fn load_history(&self, session_id: &SessionId) -> Result<Vec<Message>, Error>;
}

/// Pick the repository backend from the configured URL. `sqlite:`
/// URLs open a local database, anything else is treated as a hosted
/// PostgREST endpoint.
pub async fn connect(config: &AppConfig) -> Result<Arc<dyn ChatLog>, Error> {
    if let Some(path) = config.repo_url.strip_prefix("sqlite:") {
        let log = if path == ":memory:" {
            SqliteChatLog::open_in_memory().await?
        } else {
            SqliteChatLog::open(path).await?
        };
        return Ok(Arc::new(log));
    }

    Ok(Arc::new(RestChatLog::new(
        &config.repo_url,
        &config.repo_key,
        &config.repo_table,
    )))
}

enum Command {
    Append(SessionId, Message),
    Flush(oneshot::Sender<()>),
}

/// Best-effort, non-blocking writes to a `ChatLog`.
///
/// Writes are queued to a single background task so they reach the
/// store in submission order. Failures are logged and dropped.
#[derive(Clone)]
pub struct ChatLogWriter {
    tx: mpsc::UnboundedSender<Command>,
}

impl ChatLogWriter {
    /// Spawn the writer task. Must be called inside a tokio runtime.
    pub fn spawn(log: Arc<dyn ChatLog>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Command>();

        tokio::spawn(async move {
            while let Some(cmd) = rx.recv().await {
                match cmd {
                    Command::Append(session_id, message) => {
                        if let Err(e) = log.append(&session_id, &message).await {
                            tracing::error!(
                                "Failed to save message for session {}: {}",
                                session_id,
                                e
                            );
                        }
                    }
                    Command::Flush(done) => {
                        let _ = done.send(());
                    }
                }
            }
            tracing::debug!("Chat log writer stopped");
        });

        Self { tx }
    }

    /// Queue a message for persistence. The greeting is never written.
    pub fn append(&self, session_id: &SessionId, message: &Message) {
        if message.is_greeting() {
            return;
        }
        if self
            .tx
            .send(Command::Append(session_id.clone(), message.clone()))
            .is_err()
        {
            tracing::error!("Chat log writer is gone, dropping message for {}", session_id);
        }
    }

    /// Wait until every write queued before this call has been tried
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.tx.send(Command::Flush(done_tx)).is_ok() {
            let _ = done_rx.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::models::Sender;
    use anyhow::anyhow;

    struct BrokenLog;

    #[async_trait]
    impl ChatLog for BrokenLog {
        async fn append(&self, _: &SessionId, _: &Message) -> Result<(), Error> {
            Err(anyhow!("connection refused"))
        }

        async fn load_history(&self, _: &SessionId) -> Result<Vec<Message>, Error> {
            Err(anyhow!("connection refused"))
        }
    }

    #[tokio::test]
    async fn test_writer_persists_in_order() {
        let log = Arc::new(SqliteChatLog::open_in_memory().await.unwrap());
        let writer = ChatLogWriter::spawn(log.clone());
        let session_id = SessionId::new("writer-order");

        for i in 0..5 {
            writer.append(&session_id, &Message::user(&format!("message {}", i)));
        }
        writer.flush().await;

        let texts: Vec<String> = log
            .load_history(&session_id)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.text)
            .collect();
        assert_eq!(
            texts,
            (0..5).map(|i| format!("message {}", i)).collect::<Vec<_>>()
        );
    }

    #[tokio::test]
    async fn test_writer_skips_greeting() {
        let log = Arc::new(SqliteChatLog::open_in_memory().await.unwrap());
        let writer = ChatLogWriter::spawn(log.clone());
        let session_id = SessionId::new("writer-greeting");

        writer.append(&session_id, &Message::greeting());
        writer.append(&session_id, &Message::ai("real reply"));
        writer.flush().await;

        let history = log.load_history(&session_id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].sender, Sender::Ai);
        assert_eq!(history[0].text, "real reply");
    }

    #[tokio::test]
    async fn test_writer_swallows_failures() {
        let writer = ChatLogWriter::spawn(Arc::new(BrokenLog));
        let session_id = SessionId::new("writer-broken");

        writer.append(&session_id, &Message::user("lost"));
        writer.append(&session_id, &Message::user("also lost"));
        // The task keeps running after failed writes
        writer.flush().await;
        writer.append(&session_id, &Message::user("still accepted"));
        writer.flush().await;
    }

    #[tokio::test]
    async fn test_connect_sqlite_memory() {
        let mut config = crate::ai::proxy::tests::test_config("http://localhost");
        config.repo_url = "sqlite::memory:".to_string();
        let log = connect(&config).await.unwrap();
        let session_id = SessionId::new("connect");
        log.append(&session_id, &Message::user("hi")).await.unwrap();
        assert_eq!(log.load_history(&session_id).await.unwrap().len(), 1);
    }
}
