//! # HTTP Server
//!
//! Combines the experiment routes with health and metrics endpoints and
//! serves them until interrupted.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::experiment::ExperimentStore;
use crate::observability::MetricsRegistry;
use crate::rest_api::{experiment_routes, RestError};

use super::config::HttpServerConfig;
use super::observability_routes::observability_routes;

/// HTTP server for the experiment API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
    metrics: Arc<MetricsRegistry>,
}

impl HttpServer {
    /// Create a server over `store`
    pub fn new(config: HttpServerConfig, store: Arc<dyn ExperimentStore>) -> Self {
        let metrics = Arc::new(MetricsRegistry::new());
        let router = Self::build_router(&config, store, metrics.clone());
        Self {
            config,
            router,
            metrics,
        }
    }

    fn build_router(
        config: &HttpServerConfig,
        store: Arc<dyn ExperimentStore>,
        metrics: Arc<MetricsRegistry>,
    ) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(observability_routes(metrics.clone()))
            .merge(experiment_routes(&config.api_prefix, store, metrics))
            .fallback(unmatched_path)
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Shared request counters
    pub fn metrics(&self) -> Arc<MetricsRegistry> {
        self.metrics.clone()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until Ctrl-C
    pub async fn start(self) -> Result<(), std::io::Error> {
        let listener = TcpListener::bind(self.config.socket_addr()).await?;
        let addr = listener.local_addr()?;

        tracing::info!(
            %addr,
            prefix = %self.config.api_prefix,
            "experiment API listening"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("experiment API stopped");
        Ok(())
    }
}

async fn unmatched_path() -> RestError {
    RestError::NotFound
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
