//! Real-time fan-out of chat exchanges
//!
//! Best-effort: publishing with nobody listening is not an error, and a slow
//! subscriber skips what it missed.

use serde::Serialize;
use tokio::sync::broadcast;

use conversation_relay_core::ChatExchange;

/// Server-initiated events pushed over `/ws`
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum RealtimeEvent {
    NewMessage(ChatExchange),
}

#[derive(Debug, Clone)]
pub struct ExchangeHub {
    tx: broadcast::Sender<ChatExchange>,
}

impl ExchangeHub {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChatExchange> {
        self.tx.subscribe()
    }

    /// Returns how many subscribers will see the exchange
    pub fn publish(&self, exchange: ChatExchange) -> usize {
        self.tx.send(exchange).unwrap_or(0)
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}
