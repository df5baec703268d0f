//! HTTP wire types shared by the server and its clients

use serde::{Deserialize, Serialize};

/// `POST /chat` request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

/// `POST /chat` success body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// `POST /tts` request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeechRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// Error body returned by both endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// One prompt/reply pair, fanned out to real-time subscribers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatExchange {
    pub message: String,
    pub response: String,
}
