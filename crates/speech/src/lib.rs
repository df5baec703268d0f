//! Text-to-Speech adapter
//!
//! Backends:
//! - `ElevenLabsSynthesizer`: hosted provider, fixed voice parameters
//! - `StubSynthesizer`: fixed bytes, for tests
//! - `DisabledSynthesizer`: stands in when no API key is configured
//!
//! Audio is returned as an in-memory buffer. `AudioArchive` optionally keeps
//! a copy of each clip on disk under a per-request name.

mod archive;
mod elevenlabs;
mod stub;

pub use archive::AudioArchive;
pub use elevenlabs::{ElevenLabsSynthesizer, VoiceSettings};
pub use stub::{DisabledSynthesizer, StubSynthesizer};

use std::sync::Arc;

use conversation_relay_config::TtsConfig;
use conversation_relay_core::{Result, SpeechSynthesizer};

/// Build the synthesizer described by `config`
pub fn create_synthesizer(config: &TtsConfig) -> Result<Arc<dyn SpeechSynthesizer>> {
    if !config.is_enabled() {
        tracing::warn!("No TTS API key configured; /tts will reject requests");
        return Ok(Arc::new(DisabledSynthesizer));
    }

    let synthesizer = ElevenLabsSynthesizer::new(config)?;
    tracing::info!(voice_id = %config.voice_id, "Speech synthesizer ready");
    Ok(Arc::new(synthesizer))
}
