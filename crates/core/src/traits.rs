//! Backend traits
//!
//! The server holds these behind `Arc<dyn ...>` and shares them across
//! requests, so implementations must be `Send + Sync`.

use async_trait::async_trait;

use crate::Result;

/// Text generation backend (local language model)
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a reply to `prompt`, producing at most `max_tokens` tokens
    async fn generate(&self, prompt: &str, max_tokens: usize) -> Result<String>;

    /// Model identifier, for logs and health output
    fn model_name(&self) -> &str;
}

/// Speech synthesis backend (external TTS provider)
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` into encoded audio bytes
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>>;

    /// MIME type of the bytes returned by `synthesize`
    fn content_type(&self) -> &str {
        "audio/mpeg"
    }
}
