//! The core models for a chat session: who is talking, what was said
//! and when.
use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

pub const GREETING_TEXT: &str = "Hello! I'm the AI Assistant for the AI Sales Agent platform. \
How can I help you today?";

/// Opaque per-profile token scoping a chat transcript
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Sender {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "ai")]
    Ai,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Ai => "ai",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Sender::User),
            "ai" => Some(Sender::Ai),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum MessageId {
    /// The synthetic first message shown for an empty history
    Greeting,
    /// Created in this process, not yet known to the repository
    Local(Uuid),
    /// Key assigned by the repository
    Stored(i64),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub sender: Sender,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(sender: Sender, text: &str) -> Self {
        Self {
            id: MessageId::Local(Uuid::new_v4()),
            sender,
            text: text.to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn user(text: &str) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn ai(text: &str) -> Self {
        Self::new(Sender::Ai, text)
    }

    pub fn greeting() -> Self {
        Self {
            id: MessageId::Greeting,
            sender: Sender::Ai,
            text: GREETING_TEXT.to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn is_greeting(&self) -> bool {
        self.id == MessageId::Greeting
    }
}

/// A row of the chat log table
#[derive(Clone, Debug, Deserialize)]
pub struct ChatRow {
    pub id: i64,
    pub sender: Sender,
    pub text: String,
    pub chat_session_id: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

impl From<ChatRow> for Message {
    fn from(row: ChatRow) -> Self {
        Message {
            id: MessageId::Stored(row.id),
            sender: row.sender,
            text: row.text,
            created_at: row.created_at,
        }
    }
}

/// Parse a timestamp from the chat log. Columns declared without a
/// time zone come back without an offset and are treated as UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_timestamp(&s)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", s)))
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct QuickStats {
    pub active_chats: u32,
    pub avg_response_time: String,
    pub satisfaction: String,
}

impl Default for QuickStats {
    fn default() -> Self {
        Self {
            active_chats: 24,
            avg_response_time: "8s".to_string(),
            satisfaction: "4.9/5".to_string(),
        }
    }
}
