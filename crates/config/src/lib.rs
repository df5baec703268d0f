//! Configuration for the conversation relay
//!
//! Settings are layered, later layers winning:
//! 1. Built-in defaults (see [`constants`])
//! 2. Optional TOML file (`config/default.toml`, or `CONVERSATION_RELAY_CONFIG`)
//! 3. Environment variables, `RELAY__SECTION__KEY`
//!
//! Secrets such as the TTS API key are expected to come from the environment.

pub mod constants;
pub mod settings;
pub mod telemetry;

pub use settings::{
    ConfigError, LlmConfig, LoggingConfig, RelayConfig, ServerConfig, Settings, TtsConfig,
};
pub use telemetry::init_tracing;
