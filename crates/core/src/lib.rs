//! Conversation Relay Core
//!
//! Shared vocabulary for the relay, the generation service and the speech
//! adapter:
//! - Wire types for the queue payload and the HTTP endpoints
//! - Backend traits (`TextGenerator`, `SpeechSynthesizer`)
//! - A single typed error enumeration

pub mod error;
pub mod traits;
pub mod types;
pub mod utterance;

pub use error::{Error, Result};
pub use traits::{SpeechSynthesizer, TextGenerator};
pub use types::{ChatExchange, ChatRequest, ChatResponse, ErrorBody, SpeechRequest};
pub use utterance::{Utterance, CUE_PLACEHOLDER, DEFAULT_CUE_TEMPLATE};
