use std::env;

use anyhow::{Result, anyhow};

const DEFAULT_SYSTEM_MESSAGE: &str = "You are the AI assistant for the AI Sales Agent platform. \
Answer clearly and concisely.";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub vendor_url: String,
    pub vendor_key: String,
    pub vendor_model: String,
    pub repo_url: String,
    pub repo_key: String,
    pub repo_table: String,
    pub storage_path: String,
    pub web_ui_path: String,
    pub system_message: String,
    pub request_timeout_secs: u64,
}

impl AppConfig {
    /// Build the config from the process environment. Fails with the
    /// name of the first missing required variable.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup. `from_env` is the
    /// production entry point, this one exists so callers can supply
    /// variables without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| anyhow!("Missing env var {}", key))
        };
        let optional = |key: &str, default: &str| -> String {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let vendor_url = required("AGENTDASH_VENDOR_URL")?;
        let vendor_key = required("AGENTDASH_VENDOR_KEY")?;
        let repo_url = required("AGENTDASH_REPO_URL")?;
        let repo_key = required("AGENTDASH_REPO_KEY")?;

        let request_timeout_secs = optional("AGENTDASH_REQUEST_TIMEOUT_SECS", "300")
            .parse::<u64>()
            .map_err(|e| anyhow!("Invalid AGENTDASH_REQUEST_TIMEOUT_SECS: {}", e))?;

        Ok(Self {
            vendor_url,
            vendor_key,
            vendor_model: optional("AGENTDASH_VENDOR_MODEL", "gpt-4o-mini"),
            repo_url,
            repo_key,
            repo_table: optional("AGENTDASH_REPO_TABLE", "chats"),
            storage_path: optional("AGENTDASH_STORAGE_PATH", "./"),
            web_ui_path: optional("AGENTDASH_WEB_UI_PATH", "./web-ui/dist"),
            system_message: optional("AGENTDASH_SYSTEM_MESSAGE", DEFAULT_SYSTEM_MESSAGE),
            request_timeout_secs,
        })
    }

    /// Path of the local storage file holding the session token
    pub fn local_storage_path(&self) -> String {
        format!("{}/local_storage.json", self.storage_path.trim_end_matches('/'))
    }
}
