//! Ingress relay
//!
//! Polls utterances from a queue, turns each into a chat prompt and forwards
//! it to the generation service. One message at a time, no retries.

pub mod forwarder;
#[cfg(feature = "kafka")]
pub mod kafka;
pub mod relay;
pub mod source;

pub use forwarder::{Forwarder, HttpForwarder};
#[cfg(feature = "kafka")]
pub use kafka::KafkaSource;
pub use relay::{Outcome, Relay, RelayStats};
pub use source::{ChannelSource, LineSource, MessageSource, Polled};
