use anyhow::{Error, Result};
use async_trait::async_trait;
use tokio_rusqlite::{Connection, params};

use super::log::ChatLog;
use super::models::{Message, MessageId, SessionId, Sender, parse_timestamp};

/// Chat log stored in a local SQLite database. Mirrors the hosted
/// table so the two backends are interchangeable.
pub struct SqliteChatLog {
    db: Connection,
}

impl SqliteChatLog {
    pub async fn open(path: &str) -> Result<Self, Error> {
        let db = Connection::open(path).await?;
        Self::initialize(db).await
    }

    pub async fn open_in_memory() -> Result<Self, Error> {
        let db = Connection::open_in_memory().await?;
        Self::initialize(db).await
    }

    async fn initialize(db: Connection) -> Result<Self, Error> {
        db.call(|conn| {
            conn.execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS chats (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    sender TEXT NOT NULL CHECK (sender IN ('user', 'ai')),
                    text TEXT NOT NULL,
                    chat_session_id TEXT NOT NULL,
                    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
                );
                CREATE INDEX IF NOT EXISTS chats_session_created
                    ON chats (chat_session_id, created_at);
                "#,
            )?;
            Ok(())
        })
        .await?;

        Ok(Self { db })
    }
}

#[async_trait]
impl ChatLog for SqliteChatLog {
    async fn append(&self, session_id: &SessionId, message: &Message) -> Result<(), Error> {
        let s_id = session_id.to_string();
        let sender = message.sender.as_str();
        let text = message.text.clone();
        self.db
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "INSERT INTO chats (sender, text, chat_session_id) VALUES (?1, ?2, ?3)",
                )?;
                stmt.execute(params![sender, text, s_id])?;
                Ok(())
            })
            .await?;

        Ok(())
    }

    async fn load_history(&self, session_id: &SessionId) -> Result<Vec<Message>, Error> {
        let s_id = session_id.to_string();
        let history = self
            .db
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, sender, text, created_at FROM chats
                     WHERE chat_session_id = ?1
                     ORDER BY created_at ASC, id ASC",
                )?;
                let rows = stmt
                    .query_map([s_id], |row| {
                        let id: i64 = row.get(0)?;
                        let sender: String = row.get(1)?;
                        let text: String = row.get(2)?;
                        let created_at: String = row.get(3)?;
                        Ok((id, sender, text, created_at))
                    })?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(rows)
            })
            .await?;

        let mut messages = Vec::with_capacity(history.len());
        for (id, sender, text, created_at) in history {
            let (Some(sender), Some(created_at)) =
                (Sender::parse(&sender), parse_timestamp(&created_at))
            else {
                tracing::error!("Skipping malformed chat row {}", id);
                continue;
            };
            messages.push(Message {
                id: MessageId::Stored(id),
                sender,
                text,
                created_at,
            });
        }

        Ok(messages)
    }
}
