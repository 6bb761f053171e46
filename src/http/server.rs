//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with both handlers
//! - Wire up middleware (tracing, timeout, request ID, metrics)
//! - Bind server to listener
//! - Serve with graceful shutdown

use std::time::Duration;

use axum::{routing::post, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ReceiverConfig;
use crate::http::handlers;
use crate::http::request::{RequestIdMaker, X_REQUEST_ID};
use crate::observability::metrics;

/// HTTP server for the webhook receiver.
pub struct HttpServer {
    router: Router,
    config: ReceiverConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ReceiverConfig) -> Self {
        let router = Self::build_router(&config);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Layer order (outermost first): set request ID, trace, propagate
    /// request ID, timeout, metrics.
    fn build_router(config: &ReceiverConfig) -> Router {
        Router::new()
            .route("/", post(handlers::root))
            .route("/event_handler", post(handlers::event_handler))
            .layer(axum::middleware::from_fn(metrics::track_request))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, RequestIdMaker))
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown signal fires. Returns after in-flight requests drain.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ReceiverConfig {
        &self.config
    }
}
