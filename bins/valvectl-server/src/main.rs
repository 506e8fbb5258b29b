mod storage;

use std::net::SocketAddr;

use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use valvectl_core::provision;
use valvectl_core::{ConfigStore, WifiCredentials};
use valvectl_web::{create_router, ServerState};

use crate::storage::FileStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,valvectl_web=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Valve control server starting...");

    // Configuration
    let bind_addr: SocketAddr = std::env::var("VALVECTL_BIND")
        .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
        .parse()?;
    let config_path =
        std::env::var("VALVECTL_CONFIG").unwrap_or_else(|_| "valvectl.json".to_string());

    let file_store = FileStore::new(&config_path);
    let config = match provision::boot_store(&file_store) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("could not load {config_path}: {err}; using factory defaults");
            ConfigStore::factory(WifiCredentials::default())
        }
    };
    tracing::info!(
        "{} of {} valve slots assigned, host '{}'",
        config.valves().iter().filter(|v| v.is_assigned()).count(),
        config.valve_count(),
        config.credentials().host
    );

    let state = ServerState::shared(config, Some(Box::new(file_store)));
    let app = create_router(state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("Valve control server ready!");
    tracing::info!("   Control page: http://{bind_addr}/");
    tracing::info!("   WiFi setup:   http://{bind_addr}/setup");
    tracing::info!("   Valve table:  http://{bind_addr}/api/valves");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Received Ctrl+C, shutting down...");
}
