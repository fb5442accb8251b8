// src/llm/mod.rs
// LLM gateway trait and shared message types: role-tagged prompt messages in,
// raw generated text out.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod mistral;

pub use mistral::MistralGateway;

/// Message format shared by all gateway implementations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Failure classes a gateway call can surface. The classification core never
/// retries these; they flow straight into the fallback path.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("api error {status}: {body}")]
    Api { status: u16, body: String },
    #[error("request timed out after {0}s")]
    Timeout(u64),
}

/// Boundary to the external model.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Gateway name for logging.
    fn name(&self) -> &'static str;

    /// Send the role-tagged conversation, return the raw reply text.
    async fn invoke(&self, messages: Vec<ChatMessage>) -> Result<String, GatewayError>;
}
