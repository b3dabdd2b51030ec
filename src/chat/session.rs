//! Per-profile session identity kept in local storage.
//!
//! Local storage is a flat JSON object on disk. The session token lives
//! under `chat_session_id` and is written at most once per profile.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Error, Result};
use serde_json::{Map, Value};

use super::models::SessionId;

const SESSION_KEY: &str = "chat_session_id";

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Return the stored session token, generating and saving a new
    /// one the first time this profile asks.
    pub fn get_or_create_session_id(&self) -> Result<SessionId, Error> {
        let mut storage = self.read()?;

        if let Some(id) = storage.get(SESSION_KEY).and_then(Value::as_str) {
            if !id.is_empty() {
                return Ok(SessionId::new(id));
            }
        }

        let id = SessionId::generate();
        storage.insert(SESSION_KEY.to_string(), Value::String(id.to_string()));
        self.write(&storage)?;
        tracing::info!("Created chat session {}", id);

        Ok(id)
    }

    fn read(&self) -> Result<Map<String, Value>, Error> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        if contents.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str(&contents)
            .with_context(|| format!("Local storage {} is not a JSON object", self.path.display()))
    }

    fn write(&self, storage: &Map<String, Value>) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(storage)?)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}
