//! Kafka-backed message source

use std::time::Duration;

use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::Message;

use conversation_relay_config::RelayConfig;
use conversation_relay_core::{Error, Result};

use crate::source::{MessageSource, Polled};

/// Single-topic consumer
pub struct KafkaSource {
    consumer: StreamConsumer,
    topic: String,
}

impl KafkaSource {
    /// Create the consumer and subscribe to `config.topic`
    pub fn connect(config: &RelayConfig) -> Result<Self> {
        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .set("group.id", &config.group_id)
            .set("auto.offset.reset", &config.auto_offset_reset)
            .create()
            .map_err(|e| Error::transport(format!("failed to create Kafka consumer: {}", e)))?;

        consumer
            .subscribe(&[config.topic.as_str()])
            .map_err(|e| Error::transport(format!("failed to subscribe to {}: {}", config.topic, e)))?;

        tracing::info!(
            brokers = %config.brokers,
            group_id = %config.group_id,
            topic = %config.topic,
            "Kafka consumer subscribed"
        );

        Ok(Self {
            consumer,
            topic: config.topic.clone(),
        })
    }
}

#[async_trait]
impl MessageSource for KafkaSource {
    async fn poll(&mut self, timeout: Duration) -> Result<Polled> {
        match tokio::time::timeout(timeout, self.consumer.recv()).await {
            Err(_) => Ok(Polled::Empty),
            Ok(Err(e)) => Err(Error::transport(e.to_string())),
            Ok(Ok(message)) => Ok(match message.payload() {
                Some(payload) => Polled::Message(payload.to_vec()),
                None => Polled::Empty,
            }),
        }
    }

    async fn close(&mut self) {
        self.consumer.unsubscribe();
        tracing::info!(topic = %self.topic, "Kafka consumer unsubscribed");
    }
}
