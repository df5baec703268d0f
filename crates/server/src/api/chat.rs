//! `POST /chat`

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::{debug, error, info};

use conversation_relay_core::{ChatExchange, ChatRequest, ChatResponse};

use crate::error::ApiError;
use crate::state::AppState;

/// Generate a reply with the local model.
///
/// On success the exchange is also pushed to `/ws` subscribers when
/// broadcasting is enabled.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    metrics::counter!("chat_requests_total").increment(1);

    let Json(request) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let message = request.message.unwrap_or_default();
    if message.is_empty() {
        return Err(ApiError::bad_request("No message provided"));
    }

    info!(message = %message, "User");
    let response = state
        .generator
        .generate(&message, state.max_tokens)
        .await
        .map_err(|e| {
            metrics::counter!("chat_failures_total").increment(1);
            error!(error = %e, "Generation failed");
            ApiError::generation(e)
        })?;
    info!(model = state.generator.model_name(), response = %response, "Model reply");

    if state.broadcast_exchanges {
        let delivered = state.hub.publish(ChatExchange {
            message,
            response: response.clone(),
        });
        debug!(subscribers = delivered, "Broadcast new_message");
    }

    Ok(Json(ChatResponse { response }))
}
