//! OllamaGenerator against a throwaway HTTP server standing in for Ollama

use axum::{http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};

use conversation_relay_config::LlmConfig;
use conversation_relay_core::{Error, TextGenerator};
use conversation_relay_llm::OllamaGenerator;

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn config(endpoint: String) -> LlmConfig {
    LlmConfig {
        endpoint,
        model: "test-model".into(),
        ..LlmConfig::default()
    }
}

#[tokio::test]
async fn test_generate_returns_model_text() {
    let app = Router::new().route(
        "/api/generate",
        post(|Json(body): Json<Value>| async move {
            // echo the budget back so the test can see it was sent
            let budget = body["options"]["num_predict"].as_u64().unwrap_or(0);
            Json(json!({
                "model": body["model"],
                "response": format!("{} tokens for '{}'", budget, body["prompt"].as_str().unwrap_or("")),
                "done": true
            }))
        }),
    );
    let generator = OllamaGenerator::new(&config(spawn(app).await)).unwrap();

    let reply = generator.generate("hi", 200).await.unwrap();
    assert_eq!(reply, "200 tokens for 'hi'");
}

#[tokio::test]
async fn test_generate_surfaces_server_error_text() {
    let app = Router::new().route(
        "/api/generate",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model not loaded") }),
    );
    let generator = OllamaGenerator::new(&config(spawn(app).await)).unwrap();

    let err = generator.generate("hi", 200).await.unwrap_err();
    match err {
        Error::Downstream { status, details, .. } => {
            assert_eq!(status, 500);
            assert_eq!(details, "model not loaded");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    // bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let generator = OllamaGenerator::new(&config(format!("http://{}", addr))).unwrap();
    let err = generator.generate("hi", 200).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}
