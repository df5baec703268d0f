//! Shared application state

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use conversation_relay_config::Settings;
use conversation_relay_core::{SpeechSynthesizer, TextGenerator};
use conversation_relay_speech::AudioArchive;

use crate::broadcast::ExchangeHub;

#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn TextGenerator>,
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
    pub hub: ExchangeHub,
    pub archive: Option<AudioArchive>,
    /// Token budget passed to every generation
    pub max_tokens: usize,
    pub broadcast_exchanges: bool,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        settings: &Settings,
    ) -> Self {
        Self {
            generator,
            synthesizer,
            hub: ExchangeHub::new(settings.server.broadcast_capacity),
            archive: settings.tts.archive_dir.clone().map(AudioArchive::new),
            max_tokens: settings.llm.max_tokens,
            broadcast_exchanges: settings.server.broadcast_exchanges,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
