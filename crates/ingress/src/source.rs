//! Message sources
//!
//! A source hands the relay raw payloads. Waiting is bounded per poll so the
//! loop can notice shutdown between polls.

use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::sync::mpsc;

use conversation_relay_core::{Error, Result};

/// Result of one poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Polled {
    /// Nothing arrived within the wait
    Empty,
    /// A raw payload
    Message(Vec<u8>),
    /// The source will never produce again
    Exhausted,
}

#[async_trait]
pub trait MessageSource: Send {
    /// Wait up to `timeout` for the next payload
    async fn poll(&mut self, timeout: Duration) -> Result<Polled>;

    /// Release the subscription
    async fn close(&mut self) {}
}

/// Newline-delimited JSON from any async reader (stdin in the binary)
pub struct LineSource<R> {
    lines: Lines<R>,
    done: bool,
}

impl<R: AsyncBufRead + Unpin + Send> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            done: false,
        }
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> MessageSource for LineSource<R> {
    async fn poll(&mut self, timeout: Duration) -> Result<Polled> {
        if self.done {
            return Ok(Polled::Exhausted);
        }

        match tokio::time::timeout(timeout, self.lines.next_line()).await {
            Err(_) => Ok(Polled::Empty),
            Ok(Ok(Some(line))) if line.trim().is_empty() => Ok(Polled::Empty),
            Ok(Ok(Some(line))) => Ok(Polled::Message(line.into_bytes())),
            Ok(Ok(None)) => {
                self.done = true;
                Ok(Polled::Exhausted)
            }
            Ok(Err(e)) => {
                self.done = true;
                Err(Error::transport(format!("failed to read input: {}", e)))
            }
        }
    }

    async fn close(&mut self) {
        self.done = true;
    }
}

/// Lines handed over by a producer outside the runtime
///
/// The producer dropping its sender ends the source.
pub struct ChannelSource {
    rx: mpsc::Receiver<String>,
    done: bool,
}

impl ChannelSource {
    pub fn new(rx: mpsc::Receiver<String>) -> Self {
        Self { rx, done: false }
    }

    /// Read stdin on a dedicated OS thread.
    ///
    /// A blocked read on that thread does not hold the runtime open at
    /// shutdown, unlike `tokio::io::stdin`.
    pub fn stdin() -> std::io::Result<Self> {
        let (tx, rx) = mpsc::channel(64);
        std::thread::Builder::new()
            .name("stdin-reader".into())
            .spawn(move || {
                use std::io::BufRead;

                for line in std::io::stdin().lock().lines() {
                    match line {
                        Ok(line) => {
                            if tx.blocking_send(line).is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "Failed to read stdin");
                            break;
                        }
                    }
                }
            })?;
        Ok(Self::new(rx))
    }
}

#[async_trait]
impl MessageSource for ChannelSource {
    async fn poll(&mut self, timeout: Duration) -> Result<Polled> {
        if self.done {
            return Ok(Polled::Exhausted);
        }

        match tokio::time::timeout(timeout, self.rx.recv()).await {
            Err(_) => Ok(Polled::Empty),
            Ok(Some(line)) if line.trim().is_empty() => Ok(Polled::Empty),
            Ok(Some(line)) => Ok(Polled::Message(line.into_bytes())),
            Ok(None) => {
                self.done = true;
                Ok(Polled::Exhausted)
            }
        }
    }

    async fn close(&mut self) {
        self.done = true;
        self.rx.close();
    }
}
