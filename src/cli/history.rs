use anyhow::Result;

use super::chat::print_message;
use crate::chat::{self, SessionId, SessionStore};
use crate::core::AppConfig;
use crate::core::logging::init_tracing;

pub async fn run(session_id: Option<String>) -> Result<()> {
    let config = AppConfig::from_env()?;
    init_tracing("agentdash=warn");

    let session_id = match session_id {
        Some(id) => SessionId::new(&id),
        None => SessionStore::new(config.local_storage_path()).get_or_create_session_id()?,
    };
    let chat_log = chat::connect(&config).await?;
    let history = chat_log.load_history(&session_id).await?;

    if history.is_empty() {
        println!("No messages for session {}", session_id);
    }
    for msg in history.iter() {
        print_message(msg);
    }

    Ok(())
}
