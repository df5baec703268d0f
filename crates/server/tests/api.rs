//! Route-level tests against the router with stub backends

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use conversation_relay_config::Settings;
use conversation_relay_core::{ChatExchange, SpeechSynthesizer, TextGenerator};
use conversation_relay_llm::StubGenerator;
use conversation_relay_server::{build_router, AppState};
use conversation_relay_speech::{DisabledSynthesizer, StubSynthesizer};

const MP3: &[u8] = b"\xFF\xFB\x90\x64\x00\x00";

fn state(generator: impl TextGenerator + 'static, synthesizer: impl SpeechSynthesizer + 'static) -> AppState {
    AppState::new(Arc::new(generator), Arc::new(synthesizer), &Settings::default())
}

fn app(generator: impl TextGenerator + 'static, synthesizer: impl SpeechSynthesizer + 'static) -> Router {
    build_router(state(generator, synthesizer))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_chat_returns_model_reply() {
    let response = app(StubGenerator::replying("hello"), StubSynthesizer::returning(MP3))
        .oneshot(post_json("/chat", json!({ "message": "hi" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "response": "hello" }));
}

#[tokio::test]
async fn test_chat_rejects_empty_message() {
    let app = app(StubGenerator::replying("hello"), StubSynthesizer::returning(MP3));

    for body in [json!({ "message": "" }), json!({}), json!({ "message": null })] {
        let response = app.clone().oneshot(post_json("/chat", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await, json!({ "error": "No message provided" }));
    }
}

#[tokio::test]
async fn test_chat_rejects_malformed_json() {
    let request = Request::post("/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"message\": "))
        .unwrap();
    let response = app(StubGenerator::replying("hello"), StubSynthesizer::returning(MP3))
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(response).await["error"].is_string());
}

#[tokio::test]
async fn test_chat_model_failure_is_500_with_details() {
    let response = app(
        StubGenerator::failing(500, "CUDA out of memory"),
        StubSynthesizer::returning(MP3),
    )
    .oneshot(post_json("/chat", json!({ "message": "hi" })))
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "Failed to generate response", "details": "CUDA out of memory" })
    );
}

#[tokio::test]
async fn test_chat_broadcasts_exchange() {
    let state = state(StubGenerator::replying("hello"), StubSynthesizer::returning(MP3));
    let mut events = state.hub.subscribe();

    let response = build_router(state)
        .oneshot(post_json("/chat", json!({ "message": "hi" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(
        events.try_recv().unwrap(),
        ChatExchange {
            message: "hi".into(),
            response: "hello".into()
        }
    );
}

#[tokio::test]
async fn test_chat_without_broadcast() {
    let mut state = state(StubGenerator::replying("hello"), StubSynthesizer::returning(MP3));
    state.broadcast_exchanges = false;
    let mut events = state.hub.subscribe();

    build_router(state)
        .oneshot(post_json("/chat", json!({ "message": "hi" })))
        .await
        .unwrap();

    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn test_tts_returns_audio_bytes() {
    let response = app(StubGenerator::replying("hello"), StubSynthesizer::returning(MP3))
        .oneshot(post_json("/tts", json!({ "text": "hello there" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "audio/mpeg");
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], MP3);
}

#[tokio::test]
async fn test_tts_accepts_multibyte_text() {
    let response = app(StubGenerator::replying("hello"), StubSynthesizer::returning(MP3))
        .oneshot(post_json("/tts", json!({ "text": "¡hola, señor! 你好" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], MP3);
}

#[tokio::test]
async fn test_tts_rejects_empty_text() {
    let response = app(StubGenerator::replying("hello"), StubSynthesizer::returning(MP3))
        .oneshot(post_json("/tts", json!({ "text": "" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await, json!({ "error": "No text provided" }));
}

#[tokio::test]
async fn test_tts_provider_failure_carries_raw_text() {
    let provider_text = r#"{"detail":{"status":"quota_exceeded","message":"out of credits"}}"#;
    let response = app(
        StubGenerator::replying("hello"),
        StubSynthesizer::failing(500, provider_text),
    )
    .oneshot(post_json("/tts", json!({ "text": "hello" })))
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Failed to synthesize speech");
    assert_eq!(body["details"], provider_text);
}

#[tokio::test]
async fn test_tts_disabled_without_key() {
    let response = app(StubGenerator::replying("hello"), DisabledSynthesizer)
        .oneshot(post_json("/tts", json!({ "text": "hello" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await["error"],
        "Speech synthesis is not configured"
    );
}

#[tokio::test]
async fn test_tts_archives_each_clip() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = Settings::default();
    settings.tts.archive_dir = Some(dir.path().to_path_buf());
    let state = AppState::new(
        Arc::new(StubGenerator::replying("hello")),
        Arc::new(StubSynthesizer::returning(MP3)),
        &settings,
    );
    let app = build_router(state);

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(post_json("/tts", json!({ "text": "hello" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(files.len(), 2);
}

#[tokio::test]
async fn test_tts_archive_failure_is_unexpected_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"x").unwrap();

    let mut settings = Settings::default();
    settings.tts.archive_dir = Some(blocker);
    let state = AppState::new(
        Arc::new(StubGenerator::replying("hello")),
        Arc::new(StubSynthesizer::returning(MP3)),
        &settings,
    );

    let response = build_router(state)
        .oneshot(post_json("/tts", json!({ "text": "hello" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(response).await["error"], "An unexpected error occurred");
}

#[tokio::test]
async fn test_health_reports_model() {
    let response = app(StubGenerator::replying("hello"), StubSynthesizer::returning(MP3))
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["model"], "stub");
    assert_eq!(body["broadcast_subscribers"], 0);
}

#[tokio::test]
async fn test_metrics_disabled_by_default_state() {
    let response = app(StubGenerator::replying("hello"), StubSynthesizer::returning(MP3))
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
