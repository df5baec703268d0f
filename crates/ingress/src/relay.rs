//! The poll-and-forward loop

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use conversation_relay_config::RelayConfig;
use conversation_relay_core::{Error, Utterance};

use crate::forwarder::Forwarder;
use crate::source::{MessageSource, Polled};

/// What happened to one payload
#[derive(Debug)]
pub enum Outcome {
    /// Neither speech nor cues; nothing sent
    Skipped,
    /// Payload was not a usable utterance
    Dropped(Error),
    /// Prompt delivered and answered
    Forwarded { message: String, response: String },
    /// Prompt sent but delivery or generation failed
    Failed { message: String, error: Error },
}

impl Outcome {
    fn label(&self) -> &'static str {
        match self {
            Outcome::Skipped => "skipped",
            Outcome::Dropped(_) => "dropped",
            Outcome::Forwarded { .. } => "forwarded",
            Outcome::Failed { .. } => "failed",
        }
    }
}

/// Per-run counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelayStats {
    pub received: u64,
    pub skipped: u64,
    pub dropped: u64,
    pub forwarded: u64,
    pub failed: u64,
    pub poll_errors: u64,
}

impl RelayStats {
    fn record(&mut self, outcome: &Outcome) {
        self.received += 1;
        match outcome {
            Outcome::Skipped => self.skipped += 1,
            Outcome::Dropped(_) => self.dropped += 1,
            Outcome::Forwarded { .. } => self.forwarded += 1,
            Outcome::Failed { .. } => self.failed += 1,
        }
    }
}

pub struct Relay {
    forwarder: Arc<dyn Forwarder>,
    cue_template: String,
    poll_timeout: Duration,
}

impl Relay {
    pub fn new(forwarder: Arc<dyn Forwarder>, config: &RelayConfig) -> Self {
        Self {
            forwarder,
            cue_template: config.cue_template.clone(),
            poll_timeout: config.poll_timeout(),
        }
    }

    /// Poll `source` until `cancel` fires or the source is exhausted.
    ///
    /// An in-flight forward is allowed to finish; the source is closed before
    /// returning either way.
    pub async fn run<S>(&self, source: &mut S, cancel: CancellationToken) -> RelayStats
    where
        S: MessageSource + ?Sized,
    {
        let mut stats = RelayStats::default();

        loop {
            let polled = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!("Stopping consumer");
                    break;
                }
                polled = source.poll(self.poll_timeout) => polled,
            };

            match polled {
                Ok(Polled::Empty) => continue,
                Ok(Polled::Exhausted) => {
                    info!("Message source exhausted");
                    break;
                }
                Ok(Polled::Message(payload)) => {
                    let outcome = self.handle_payload(&payload).await;
                    metrics::counter!("relay_messages_total", "outcome" => outcome.label())
                        .increment(1);
                    stats.record(&outcome);
                }
                Err(e) => {
                    error!(error = %e, "Consumer error");
                    metrics::counter!("relay_poll_errors_total").increment(1);
                    stats.poll_errors += 1;
                }
            }
        }

        source.close().await;
        stats
    }

    /// Decode one payload, pick a prompt and forward it
    pub async fn handle_payload(&self, payload: &[u8]) -> Outcome {
        let utterance = match Utterance::decode(payload) {
            Ok(utterance) => utterance,
            Err(e) => {
                warn!(
                    error = %e,
                    payload = %String::from_utf8_lossy(payload),
                    "Failed to decode JSON message"
                );
                return Outcome::Dropped(e);
            }
        };

        let Some(message) = utterance.prompt(&self.cue_template) else {
            debug!("No input provided, skipping message");
            return Outcome::Skipped;
        };

        info!(message = %message, "Sending to LLM");
        match self.forwarder.forward(&message).await {
            Ok(response) => {
                info!(response = %response, "LLM response");
                Outcome::Forwarded { message, response }
            }
            Err(error) => {
                error!(error = %error, "Error from LLM server");
                Outcome::Failed { message, error }
            }
        }
    }
}
