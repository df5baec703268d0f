//! Layered settings
//!
//! Every section implements `Default`, so a missing file or a partial file
//! still yields a complete `Settings`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use conversation_relay_core::{CUE_PLACEHOLDER, DEFAULT_CUE_TEMPLATE};

use crate::constants;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for conversation_relay_core::Error {
    fn from(err: ConfigError) -> Self {
        conversation_relay_core::Error::Config(err.to_string())
    }
}

/// Root settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub tts: TtsConfig,
    pub relay: RelayConfig,
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Push every chat exchange to `/ws` subscribers
    pub broadcast_exchanges: bool,
    pub broadcast_capacity: usize,
    /// Install the Prometheus recorder and serve `/metrics`
    pub enable_metrics: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: constants::server::HOST.to_string(),
            port: constants::server::PORT,
            broadcast_exchanges: true,
            broadcast_capacity: constants::server::BROADCAST_CAPACITY,
            enable_metrics: true,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Local model settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub endpoint: String,
    pub model: String,
    pub max_tokens: usize,
    /// No timeout when unset
    pub timeout_ms: Option<u64>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: constants::endpoints::OLLAMA_DEFAULT.to_string(),
            model: constants::llm::MODEL.to_string(),
            max_tokens: constants::llm::MAX_TOKENS,
            timeout_ms: None,
        }
    }
}

impl LlmConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

/// External speech provider settings
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TtsConfig {
    pub endpoint: String,
    /// Provider API key; `/tts` is disabled without one
    pub api_key: Option<String>,
    pub voice_id: String,
    pub model_id: String,
    pub stability: f32,
    pub similarity_boost: f32,
    /// When set, each clip is also written here under a unique name
    pub archive_dir: Option<PathBuf>,
    pub timeout_ms: Option<u64>,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            endpoint: constants::endpoints::ELEVENLABS_DEFAULT.to_string(),
            api_key: None,
            voice_id: constants::tts::VOICE_ID.to_string(),
            model_id: constants::tts::MODEL_ID.to_string(),
            stability: constants::tts::STABILITY,
            similarity_boost: constants::tts::SIMILARITY_BOOST,
            archive_dir: None,
            timeout_ms: None,
        }
    }
}

// Keeps the API key out of logs.
impl std::fmt::Debug for TtsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtsConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("voice_id", &self.voice_id)
            .field("model_id", &self.model_id)
            .field("stability", &self.stability)
            .field("similarity_boost", &self.similarity_boost)
            .field("archive_dir", &self.archive_dir)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

impl TtsConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

/// Queue consumer and forwarding settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    pub brokers: String,
    pub group_id: String,
    pub topic: String,
    /// `earliest` or `latest`
    pub auto_offset_reset: String,
    pub poll_timeout_ms: u64,
    pub chat_url: String,
    /// Prompt for cue-only utterances; must contain `{cue}`
    pub cue_template: String,
    pub request_timeout_ms: Option<u64>,
    /// Serve Prometheus metrics from the relay on this port
    pub metrics_port: Option<u16>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            brokers: constants::endpoints::KAFKA_BROKERS_DEFAULT.to_string(),
            group_id: constants::relay::GROUP_ID.to_string(),
            topic: constants::relay::TOPIC.to_string(),
            auto_offset_reset: constants::relay::AUTO_OFFSET_RESET.to_string(),
            poll_timeout_ms: constants::relay::POLL_TIMEOUT_MS,
            chat_url: constants::endpoints::CHAT_DEFAULT.to_string(),
            cue_template: DEFAULT_CUE_TEMPLATE.to_string(),
            request_timeout_ms: None,
            metrics_port: None,
        }
    }
}

impl RelayConfig {
    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive; `RUST_LOG` takes precedence
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: constants::logging::LEVEL.to_string(),
            json: false,
        }
    }
}

impl Settings {
    /// Load from the default file location and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        let (path, required) = match std::env::var(constants::CONFIG_PATH_ENV) {
            Ok(path) => (PathBuf::from(path), true),
            Err(_) => (PathBuf::from(constants::DEFAULT_CONFIG_PATH), false),
        };
        Self::load_with(Some((path.as_path(), required)), default_environment())
    }

    /// Load from an explicit file (required) and the process environment
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load_with(Some((path.as_ref(), true)), default_environment())
    }

    /// Load from an optional file and a caller-supplied environment source
    pub fn load_with(file: Option<(&Path, bool)>, env: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some((path, required)) = file {
            builder = builder.add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(required),
            );
        }

        let settings: Settings = builder.add_source(env).build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings that would only fail later at runtime
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be non-zero".into()));
        }
        if self.server.broadcast_capacity == 0 {
            return Err(ConfigError::Invalid(
                "server.broadcast_capacity must be positive".into(),
            ));
        }
        if self.llm.max_tokens == 0 {
            return Err(ConfigError::Invalid("llm.max_tokens must be positive".into()));
        }
        if self.relay.topic.trim().is_empty() {
            return Err(ConfigError::Invalid("relay.topic must not be empty".into()));
        }
        if self.relay.poll_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "relay.poll_timeout_ms must be positive".into(),
            ));
        }
        if !matches!(self.relay.auto_offset_reset.as_str(), "earliest" | "latest") {
            return Err(ConfigError::Invalid(format!(
                "relay.auto_offset_reset must be 'earliest' or 'latest', got '{}'",
                self.relay.auto_offset_reset
            )));
        }
        if !self.relay.cue_template.contains(CUE_PLACEHOLDER) {
            return Err(ConfigError::Invalid(format!(
                "relay.cue_template must contain {}",
                CUE_PLACEHOLDER
            )));
        }
        if !(0.0..=1.0).contains(&self.tts.stability)
            || !(0.0..=1.0).contains(&self.tts.similarity_boost)
        {
            return Err(ConfigError::Invalid(
                "tts.stability and tts.similarity_boost must be within 0.0..=1.0".into(),
            ));
        }
        Ok(())
    }
}

fn default_environment() -> Environment {
    Environment::with_prefix(constants::ENV_PREFIX)
        .prefix_separator(constants::ENV_SEPARATOR)
        .separator(constants::ENV_SEPARATOR)
        .try_parsing(true)
}
