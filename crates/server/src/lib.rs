//! Generation service and speech synthesis adapter
//!
//! Routes:
//! - `POST /chat`: prompt in, model reply out
//! - `POST /tts`: text in, `audio/mpeg` out
//! - `GET /ws`: real-time feed of chat exchanges
//! - `GET /health`, `GET /metrics`

pub mod api;
pub mod broadcast;
pub mod error;
pub mod state;

pub use api::build_router;
pub use broadcast::{ExchangeHub, RealtimeEvent};
pub use error::ApiError;
pub use state::AppState;
