//! Public types for the dashboard API
use serde::{Deserialize, Serialize};

pub use crate::chat::QuickStats;

#[derive(Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}
