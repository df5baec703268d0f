//! `POST /tts`

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info};

use conversation_relay_core::SpeechRequest;

use crate::error::ApiError;
use crate::state::AppState;

/// Synthesize speech and return the audio bytes directly
pub async fn synthesize(
    State(state): State<AppState>,
    payload: Result<Json<SpeechRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    metrics::counter!("tts_requests_total").increment(1);

    let Json(request) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let text = request.text.unwrap_or_default();
    if text.is_empty() {
        return Err(ApiError::bad_request("No text provided"));
    }

    info!(chars = text.chars().count(), "TTS request");
    let audio = state.synthesizer.synthesize(&text).await.map_err(|e| {
        metrics::counter!("tts_failures_total").increment(1);
        error!(error = %e, "Speech synthesis failed");
        ApiError::synthesis(e)
    })?;

    if let Some(archive) = &state.archive {
        archive.store(&audio).await.map_err(|e| {
            metrics::counter!("tts_failures_total").increment(1);
            error!(error = %e, "Failed to archive audio");
            ApiError::synthesis(e)
        })?;
    }

    let content_type = state.synthesizer.content_type().to_string();
    Ok(([(header::CONTENT_TYPE, content_type)], audio).into_response())
}
