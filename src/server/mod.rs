//! Sentiment API server
//!
//! Serves the active data provider over HTTP with CORS, request tracing and
//! graceful shutdown.

pub mod envelope;
pub mod handlers;

use crate::provider::DataProvider;
use axum::Router;
use axum::http::{Method, header};
use axum::routing::get;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Sentiment API server
pub struct SentimentServer {
    provider: Arc<DataProvider>,
}

impl SentimentServer {
    pub fn new(provider: DataProvider) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }

    /// Build the router with all routes
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

        Router::new()
            .route("/api/sentiment", get(handlers::get_sentiment))
            .route("/sentiment", get(handlers::get_sentiment))
            .route("/health", get(handlers::health_check))
            .with_state(self.provider.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Bind to `addr` and serve until Ctrl+C.
    pub async fn run(self, addr: SocketAddr) -> std::io::Result<()> {
        let listener = TcpListener::bind(addr).await?;
        log::info!("Sentiment API listening on http://{}", listener.local_addr()?);
        log::info!("Provider: {}", self.provider);

        self.serve(listener, shutdown_signal()).await?;

        log::info!("Sentiment API shut down");
        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
    }
}

/// Shutdown signal handler for graceful shutdown
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => log::info!("Received Ctrl+C, shutting down..."),
        Err(e) => log::error!("Failed to install Ctrl+C handler: {}", e),
    }
}
