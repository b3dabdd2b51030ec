use std::sync::Arc;

use crate::ai::LlmProxy;
use crate::chat::ChatLog;
use crate::core::AppConfig;

pub struct AppState {
    pub proxy: Arc<LlmProxy>,
    pub chat_log: Arc<dyn ChatLog>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(chat_log: Arc<dyn ChatLog>, config: AppConfig) -> Self {
        Self {
            proxy: Arc::new(LlmProxy::new(&config)),
            chat_log,
            config,
        }
    }
}
