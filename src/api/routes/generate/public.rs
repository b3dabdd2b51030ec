//! Public types for the content generator API
pub use crate::ai::prompt::ContentBrief as GenerateRequest;
pub use crate::api::routes::chat::public::ChatResponse as GenerateResponse;
