//! `GET /ws`: push channel for chat exchanges

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use uuid::Uuid;

use crate::broadcast::{ExchangeHub, RealtimeEvent};
use crate::state::AppState;

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    let hub = state.hub.clone();
    ws.on_upgrade(move |socket| handle_socket(socket, hub))
}

async fn handle_socket(socket: WebSocket, hub: ExchangeHub) {
    let client_id = Uuid::new_v4();
    info!(%client_id, "Client connected");

    let (mut sender, mut receiver) = socket.split();
    let mut events = hub.subscribe();

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(exchange) => {
                    let frame = match serde_json::to_string(&RealtimeEvent::NewMessage(exchange)) {
                        Ok(frame) => frame,
                        Err(e) => {
                            warn!(%client_id, "Failed to encode event: {}", e);
                            continue;
                        }
                    };
                    if sender.send(Message::Text(frame)).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(%client_id, skipped, "Subscriber lagging, events dropped");
                }
                Err(RecvError::Closed) => break,
            },
            incoming = receiver.next() => match incoming {
                // client frames carry nothing we act on
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }

    info!(%client_id, "Client disconnected");
}
