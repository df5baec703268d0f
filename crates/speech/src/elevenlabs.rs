//! ElevenLabs text-to-speech client

use async_trait::async_trait;
use serde::Serialize;

use conversation_relay_config::TtsConfig;
use conversation_relay_core::{Error, Result, SpeechSynthesizer};

const SERVICE: &str = "tts";

/// Voice parameters sent with every request
#[derive(Debug, Clone, Copy, Serialize)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
}

#[derive(Debug, Serialize)]
struct SynthesisRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

pub struct ElevenLabsSynthesizer {
    client: reqwest::Client,
    url: String,
    api_key: String,
    model_id: String,
    voice_settings: VoiceSettings,
}

impl ElevenLabsSynthesizer {
    pub fn new(config: &TtsConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::Config("tts.api_key is not set".into()))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("failed to build TTS client: {}", e)))?;

        Ok(Self {
            client,
            url: format!(
                "{}/text-to-speech/{}",
                config.endpoint.trim_end_matches('/'),
                config.voice_id
            ),
            api_key,
            model_id: config.model_id.clone(),
            voice_settings: VoiceSettings {
                stability: config.stability,
                similarity_boost: config.similarity_boost,
            },
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        let request = SynthesisRequest {
            text,
            model_id: &self.model_id,
            voice_settings: self.voice_settings,
        };

        let response = self
            .client
            .post(&self.url)
            .header("xi-api-key", &self.api_key)
            .header(reqwest::header::ACCEPT, "audio/mpeg")
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::transport(format!("TTS request failed: {}", e)))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "TTS provider rejected request");
            return Err(Error::downstream(SERVICE, status.as_u16(), body));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| Error::transport(format!("failed to read TTS audio: {}", e)))?;

        tracing::debug!(bytes = audio.len(), "TTS audio received");
        Ok(audio.to_vec())
    }
}
