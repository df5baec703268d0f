//! `conversation-relay`: feeds utterances from the queue to `/chat`

use std::net::SocketAddr;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use conversation_relay_config::{init_tracing, Settings};
use conversation_relay_ingress::{HttpForwarder, Relay};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load()?;
    init_tracing(&settings.logging);

    if let Some(port) = settings.relay.metrics_port {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        metrics_exporter_prometheus::PrometheusBuilder::new()
            .with_http_listener(addr)
            .install()?;
        tracing::info!(%addr, "Metrics exporter listening");
    }

    let forwarder = HttpForwarder::new(&settings.relay)?;
    tracing::info!(chat_url = %forwarder.url(), "Forwarding to chat endpoint");
    let relay = Relay::new(Arc::new(forwarder), &settings.relay);

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            shutdown_signal().await;
            cancel.cancel();
        }
    });

    #[cfg(feature = "kafka")]
    let mut source = conversation_relay_ingress::KafkaSource::connect(&settings.relay)?;

    #[cfg(not(feature = "kafka"))]
    let mut source = {
        tracing::info!("Built without Kafka support; reading utterances from stdin");
        conversation_relay_ingress::ChannelSource::stdin()?
    };

    tracing::info!("Starting consumer");
    let stats = relay.run(&mut source, cancel).await;
    tracing::info!(?stats, "Consumer stopped");

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
}
