//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, limits, request ID, security headers)
//! - Bind server to listener
//! - Stop accepting on the shutdown signal and drain in-flight requests

use std::sync::Arc;
use std::time::Duration;

use axum::extract::FromRef;
use axum::response::Response;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::http::request::{make_request_span, MakeRequestUuidV4, X_REQUEST_ID};
use crate::http::response::Reply;
use crate::messages::{MessageSigner, PendingMessages};
use crate::restaurant::{Catalog, Ledger};
use crate::routing;
use crate::security::with_security_headers;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn Catalog>,
    pub ledger: Arc<dyn Ledger>,
    pub signer: MessageSigner,
    pub site_name: Arc<str>,
}

impl AppState {
    /// State backed by a single store serving both reads and writes.
    pub fn new<S>(store: Arc<S>, config: &AppConfig) -> Self
    where
        S: Catalog + Ledger + 'static,
    {
        Self {
            catalog: store.clone(),
            ledger: store,
            signer: MessageSigner::new(&config.security.secret_key),
            site_name: Arc::from(config.site.name.as_str()),
        }
    }

    /// Finish a request: render or redirect, handling the message cookie.
    pub fn respond(&self, pending: PendingMessages, reply: Reply) -> Response {
        reply.into_response(&self.site_name, &self.signer, pending)
    }
}

impl FromRef<AppState> for MessageSigner {
    fn from_ref(state: &AppState) -> Self {
        state.signer.clone()
    }
}

/// HTTP server for the restaurant site.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a new HTTP server serving `store`.
    pub fn new<S>(config: AppConfig, store: Arc<S>) -> Self
    where
        S: Catalog + Ledger + 'static,
    {
        let state = AppState::new(store, &config);
        Self::with_state(config, state)
    }

    /// Create a server around prepared state.
    pub fn with_state(config: AppConfig, state: AppState) -> Self {
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        let mut router = routing::routes().with_state(state).layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuidV4))
                .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
                .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
                .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
                .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
        );

        if config.security.enable_headers {
            router = with_security_headers(router);
        }
        router
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            site = %self.config.site.name,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
