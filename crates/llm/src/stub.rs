//! Canned generator

use async_trait::async_trait;

use conversation_relay_core::{Error, Result, TextGenerator};

/// Replies with a fixed string, or fails with a fixed downstream error
pub struct StubGenerator {
    outcome: std::result::Result<String, (u16, String)>,
}

impl StubGenerator {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            outcome: Ok(reply.into()),
        }
    }

    pub fn failing(status: u16, details: impl Into<String>) -> Self {
        Self {
            outcome: Err((status, details.into())),
        }
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, _prompt: &str, _max_tokens: usize) -> Result<String> {
        match &self.outcome {
            Ok(reply) => Ok(reply.clone()),
            Err((status, details)) => Err(Error::downstream("llm", *status, details.clone())),
        }
    }

    fn model_name(&self) -> &str {
        "stub"
    }
}
