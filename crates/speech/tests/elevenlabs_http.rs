//! ElevenLabsSynthesizer against a throwaway HTTP server standing in for the provider

use axum::{
    extract::Path,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::Value;

use conversation_relay_config::TtsConfig;
use conversation_relay_core::{Error, SpeechSynthesizer};
use conversation_relay_speech::ElevenLabsSynthesizer;

const MP3_HEADER: &[u8] = b"\xFF\xFB\x90\x64\x00";

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn config(endpoint: String) -> TtsConfig {
    TtsConfig {
        endpoint,
        api_key: Some("test-key".into()),
        voice_id: "voice-1".into(),
        ..TtsConfig::default()
    }
}

#[tokio::test]
async fn test_synthesize_returns_provider_bytes() {
    let app = Router::new().route(
        "/text-to-speech/:voice_id",
        post(
            |Path(voice_id): Path<String>, headers: HeaderMap, Json(body): Json<Value>| async move {
                let authorized = headers
                    .get("xi-api-key")
                    .and_then(|v| v.to_str().ok())
                    == Some("test-key");
                if !authorized || voice_id != "voice-1" || body["text"] != "hello" {
                    return (StatusCode::BAD_REQUEST, Vec::new());
                }
                (StatusCode::OK, MP3_HEADER.to_vec())
            },
        ),
    );
    let synthesizer = ElevenLabsSynthesizer::new(&config(spawn(app).await)).unwrap();

    let audio = synthesizer.synthesize("hello").await.unwrap();
    assert_eq!(audio, MP3_HEADER);
    assert_eq!(synthesizer.content_type(), "audio/mpeg");
}

#[tokio::test]
async fn test_provider_error_text_is_preserved() {
    let body = r#"{"detail":{"status":"quota_exceeded"}}"#;
    let app = Router::new().route(
        "/text-to-speech/:voice_id",
        post(move || async move { (StatusCode::UNAUTHORIZED, body) }),
    );
    let synthesizer = ElevenLabsSynthesizer::new(&config(spawn(app).await)).unwrap();

    let err = synthesizer.synthesize("hello").await.unwrap_err();
    match err {
        Error::Downstream { status, details, .. } => {
            assert_eq!(status, 401);
            assert_eq!(details, body);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
