//! Default values for every configurable knob
//!
//! Anything that used to be a literal at a call site lives here instead.

/// Service endpoints (defaults for local development)
pub mod endpoints {
    /// Ollama server hosting the local model
    pub const OLLAMA_DEFAULT: &str = "http://localhost:11434";

    /// ElevenLabs REST API
    pub const ELEVENLABS_DEFAULT: &str = "https://api.elevenlabs.io/v1";

    /// Chat endpoint the relay forwards to
    pub const CHAT_DEFAULT: &str = "http://127.0.0.1:5000/chat";

    /// Kafka bootstrap servers
    pub const KAFKA_BROKERS_DEFAULT: &str = "localhost:9092";
}

/// HTTP server
pub mod server {
    pub const HOST: &str = "0.0.0.0";
    pub const PORT: u16 = 5000;

    /// Buffered events per real-time subscriber before it starts lagging
    pub const BROADCAST_CAPACITY: usize = 100;
}

/// Text generation
pub mod llm {
    pub const MODEL: &str = "llama3.2";

    /// Token budget per reply
    pub const MAX_TOKENS: usize = 200;
}

/// Speech synthesis
pub mod tts {
    /// "Rachel", one of the provider's stock voices
    pub const VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";
    pub const MODEL_ID: &str = "eleven_monolingual_v1";
    pub const STABILITY: f32 = 0.5;
    pub const SIMILARITY_BOOST: f32 = 0.75;
}

/// Queue consumer
pub mod relay {
    pub const GROUP_ID: &str = "llm_consumer_group";
    pub const TOPIC: &str = "start_conversation";
    pub const AUTO_OFFSET_RESET: &str = "latest";

    /// Bounded wait per poll (ms)
    pub const POLL_TIMEOUT_MS: u64 = 1_000;
}

/// Logging
pub mod logging {
    pub const LEVEL: &str = "info";
}

/// Environment variable naming the config file
pub const CONFIG_PATH_ENV: &str = "CONVERSATION_RELAY_CONFIG";

/// Config file used when `CONFIG_PATH_ENV` is unset (optional)
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Prefix for environment overrides (`RELAY__TTS__API_KEY`)
pub const ENV_PREFIX: &str = "RELAY";
pub const ENV_SEPARATOR: &str = "__";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tts_voice_settings_in_range() {
        assert!((0.0..=1.0).contains(&tts::STABILITY));
        assert!((0.0..=1.0).contains(&tts::SIMILARITY_BOOST));
    }

    #[test]
    fn test_chat_default_matches_server_port() {
        assert!(endpoints::CHAT_DEFAULT.contains(&server::PORT.to_string()));
    }
}
