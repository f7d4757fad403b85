//! Startup orchestration.
//!
//! # Responsibilities
//! - Open the store and apply migrations
//! - Start background pieces (metrics exporter, signal listener)
//! - Bind the listener and serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: a store or bind error is fatal
//! - A metrics exporter that cannot start is logged, not fatal
//! - Listener binds last (traffic only when the store is ready)

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::schema::DEFAULT_SECRET_KEY;
use crate::config::AppConfig;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;
use crate::restaurant::StoreError;
use crate::store::SqliteStore;

/// Errors that stop the site from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Listener error: {0}")]
    Io(#[from] std::io::Error),
}

/// Start every subsystem and serve until a stop signal arrives.
pub async fn run(config: AppConfig) -> Result<(), StartupError> {
    if config.security.secret_key == DEFAULT_SECRET_KEY {
        tracing::warn!("Debug mode: message cookies are signed with the placeholder secret");
    }

    let store = Arc::new(SqliteStore::connect(&config.database).await?);

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics exporter");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    let server = HttpServer::new(config, store.clone());
    server.run(listener, shutdown.subscribe()).await?;

    store.close().await;
    tracing::info!("Shutdown complete");
    Ok(())
}
