//! HTTP routes

mod chat;
mod health;
mod realtime;
mod tts;

pub use chat::chat;
pub use health::{health, metrics};
pub use realtime::ws_handler;
pub use tts::synthesize;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/tts", post(synthesize))
        .route("/ws", get(ws_handler))
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
