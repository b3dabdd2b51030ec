pub mod client;
pub mod prompt;
pub mod proxy;

pub use client::ProxyClient;
pub use proxy::{Assistant, EMPTY_REPLY, FALLBACK_REPLY, LlmProxy, ProxyRequest};
