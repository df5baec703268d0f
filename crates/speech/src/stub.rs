//! Non-network synthesizers

use async_trait::async_trait;

use conversation_relay_core::{Error, Result, SpeechSynthesizer};

/// Returns fixed audio bytes, or a fixed provider failure
pub struct StubSynthesizer {
    outcome: std::result::Result<Vec<u8>, (u16, String)>,
}

impl StubSynthesizer {
    pub fn returning(audio: impl Into<Vec<u8>>) -> Self {
        Self {
            outcome: Ok(audio.into()),
        }
    }

    pub fn failing(status: u16, details: impl Into<String>) -> Self {
        Self {
            outcome: Err((status, details.into())),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for StubSynthesizer {
    async fn synthesize(&self, _text: &str) -> Result<Vec<u8>> {
        match &self.outcome {
            Ok(audio) => Ok(audio.clone()),
            Err((status, details)) => Err(Error::downstream("tts", *status, details.clone())),
        }
    }
}

/// Rejects every request; used when the provider is not configured
pub struct DisabledSynthesizer;

#[async_trait]
impl SpeechSynthesizer for DisabledSynthesizer {
    async fn synthesize(&self, _text: &str) -> Result<Vec<u8>> {
        Err(Error::Config("speech synthesis is not configured".into()))
    }
}
