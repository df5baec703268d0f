//! `conversation-server`: generation service and speech adapter

use anyhow::Context;
use metrics_exporter_prometheus::PrometheusBuilder;

use conversation_relay_config::{init_tracing, Settings};
use conversation_relay_llm::create_generator;
use conversation_relay_server::{build_router, AppState};
use conversation_relay_speech::create_synthesizer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load()?;
    init_tracing(&settings.logging);
    tracing::debug!(?settings, "Loaded settings");

    let generator = create_generator(&settings.llm)?;
    let synthesizer = create_synthesizer(&settings.tts)?;

    let mut state = AppState::new(generator, synthesizer, &settings);
    if settings.server.enable_metrics {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("failed to install metrics recorder")?;
        state = state.with_metrics(handle);
    }
    if let Some(dir) = &settings.tts.archive_dir {
        tracing::info!(dir = %dir.display(), "Archiving synthesized audio");
    }

    let app = build_router(state);

    let addr = settings.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(
        %addr,
        broadcast = settings.server.broadcast_exchanges,
        "Server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
