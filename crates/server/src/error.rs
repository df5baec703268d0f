//! API error handling
//!
//! Every failure leaves the server as `{ "error": ..., "details"?: ... }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use conversation_relay_core::{Error, ErrorBody};

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: msg.into(),
            details: None,
        }
    }

    pub fn internal(msg: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: msg.into(),
            details: Some(details.into()),
        }
    }

    /// Failure while producing a chat reply
    pub fn generation(err: Error) -> Self {
        match err {
            Error::Validation(msg) => Self::bad_request(msg),
            other => Self::internal("Failed to generate response", other.details()),
        }
    }

    /// Failure while producing or storing audio
    pub fn synthesis(err: Error) -> Self {
        match err {
            Error::Validation(msg) => Self::bad_request(msg),
            Error::Config(_) => Self::internal("Speech synthesis is not configured", err.details()),
            Error::Io(_) => Self::internal("An unexpected error occurred", err.details()),
            other => Self::internal("Failed to synthesize speech", other.details()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.error,
            details: self.details,
        };
        (self.status, Json(body)).into_response()
    }
}
