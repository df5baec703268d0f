//! Text generation backends
//!
//! - `OllamaGenerator`: a model served locally over Ollama's HTTP API
//! - `StubGenerator`: canned replies for tests and offline runs

mod ollama;
mod stub;

pub use ollama::OllamaGenerator;
pub use stub::StubGenerator;

use std::sync::Arc;

use conversation_relay_config::LlmConfig;
use conversation_relay_core::{Result, TextGenerator};

/// Build the generator described by `config`
pub fn create_generator(config: &LlmConfig) -> Result<Arc<dyn TextGenerator>> {
    let generator = OllamaGenerator::new(config)?;
    tracing::info!(
        endpoint = %config.endpoint,
        model = %config.model,
        "Text generator ready"
    );
    Ok(Arc::new(generator))
}
