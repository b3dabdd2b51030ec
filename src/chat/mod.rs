pub mod db;
pub mod log;
pub mod models;
pub mod rest;
pub mod session;
pub mod transcript;

pub use db::SqliteChatLog;
pub use log::{ChatLog, ChatLogWriter, connect};
pub use models::{GREETING_TEXT, Message, MessageId, QuickStats, Sender, SessionId};
pub use rest::RestChatLog;
pub use session::SessionStore;
pub use transcript::{IgnoreReason, SendOutcome, Transcript};
