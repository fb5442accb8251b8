// src/llm/mistral.rs

//! Low-level Mistral chat-completions client. No wrappers; just reqwest.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use std::env;
use std::time::Duration;
use tracing::debug;

use super::{ChatMessage, GatewayError, LlmGateway};
use crate::config::CONFIG;

#[derive(Clone)]
pub struct MistralGateway {
    client: Client,
    api_key: String,
    api_base: String,
    model: String,
}

impl MistralGateway {
    pub fn new() -> anyhow::Result<Self> {
        let api_key = env::var("MISTRAL_API_KEY")
            .map_err(|_| anyhow::anyhow!("MISTRAL_API_KEY not set"))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(CONFIG.llm_timeout))
            .build()?;

        Ok(Self {
            client,
            api_key,
            api_base: CONFIG.mistral_base_url.clone(),
            model: CONFIG.model.clone(),
        })
    }
}

#[async_trait]
impl LlmGateway for MistralGateway {
    fn name(&self) -> &'static str {
        "mistral"
    }

    async fn invoke(&self, messages: Vec<ChatMessage>) -> Result<String, GatewayError> {
        let url = format!("{}/chat/completions", self.api_base.trim_end_matches('/'));
        let body = json!({
            "model": self.model,
            "messages": messages,
            "temperature": CONFIG.temperature,
            "max_tokens": CONFIG.max_tokens,
        });

        debug!("Mistral request: model={}, messages={}", self.model, messages.len());

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout(CONFIG.llm_timeout)
                } else {
                    GatewayError::Transport(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Api { status, body });
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let content = response_json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| GatewayError::Transport("no content in model response".to_string()))?;

        Ok(content.to_string())
    }
}
