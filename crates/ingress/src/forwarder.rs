//! Delivery of prompts to the generation service

use async_trait::async_trait;
use serde::Deserialize;

use conversation_relay_config::RelayConfig;
use conversation_relay_core::{ChatRequest, Error, Result};

const SERVICE: &str = "chat";

/// Reply text used when a 200 response carries no `response` field
pub const NO_RESPONSE: &str = "No response";

#[async_trait]
pub trait Forwarder: Send + Sync {
    /// Send `message` and return the generated reply
    async fn forward(&self, message: &str) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    response: Option<String>,
}

/// POSTs `{ "message": ... }` to the chat endpoint
pub struct HttpForwarder {
    client: reqwest::Client,
    url: String,
}

impl HttpForwarder {
    pub fn new(config: &RelayConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("failed to build chat client: {}", e)))?;

        Ok(Self {
            client,
            url: config.chat_url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Forwarder for HttpForwarder {
    async fn forward(&self, message: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.url)
            .json(&ChatRequest::new(message))
            .send()
            .await
            .map_err(|e| Error::transport(format!("chat request failed: {}", e)))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::downstream(SERVICE, status.as_u16(), body));
        }

        let reply: ChatReply = response
            .json()
            .await
            .map_err(|e| Error::Decode(format!("invalid chat response: {}", e)))?;

        Ok(reply.response.unwrap_or_else(|| NO_RESPONSE.to_string()))
    }
}
