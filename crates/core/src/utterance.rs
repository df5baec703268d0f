//! Incoming utterances from the conversation topic
//!
//! An utterance carries what a person said and any non-verbal cues observed
//! alongside it. Only one of the two ever becomes a prompt.

use serde::Deserialize;

use crate::{Error, Result};

/// Placeholder replaced by the first cue in a cue template
pub const CUE_PLACEHOLDER: &str = "{cue}";

/// Prompt used when a person shows up without saying anything
pub const DEFAULT_CUE_TEMPLATE: &str =
    "Respond with a single short greeting to a person who approaches you with a {cue}.";

/// One unit of spoken or non-verbal input
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Utterance {
    /// Transcribed speech, possibly blank
    #[serde(default, deserialize_with = "null_as_default")]
    pub spoken_text: String,
    /// Non-verbal signal labels, in observation order
    #[serde(default, deserialize_with = "null_as_default")]
    pub cues: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

impl Utterance {
    pub fn new(spoken_text: impl Into<String>, cues: Vec<String>) -> Self {
        Self {
            spoken_text: spoken_text.into(),
            cues,
        }
    }

    /// Decode a raw queue payload. Only a JSON object is accepted.
    pub fn decode(payload: &[u8]) -> Result<Self> {
        match serde_json::from_slice(payload)? {
            value @ serde_json::Value::Object(_) => Ok(serde_json::from_value(value)?),
            other => Err(Error::Decode(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// True when neither speech nor cues are present
    pub fn is_empty(&self) -> bool {
        self.spoken_text.trim().is_empty() && self.cues.is_empty()
    }

    /// Pick the message to send to the generation service.
    ///
    /// Speech wins over cues. Only the first cue is used.
    pub fn prompt(&self, cue_template: &str) -> Option<String> {
        let spoken = self.spoken_text.trim();
        if !spoken.is_empty() {
            return Some(spoken.to_string());
        }

        self.cues
            .first()
            .map(|cue| cue_template.replace(CUE_PLACEHOLDER, cue))
    }
}
