use anyhow::Result;

use crate::chat::SessionStore;
use crate::core::AppConfig;

pub fn run() -> Result<()> {
    let config = AppConfig::from_env()?;
    let session_id = SessionStore::new(config.local_storage_path()).get_or_create_session_id()?;
    println!("{}", session_id);
    Ok(())
}
