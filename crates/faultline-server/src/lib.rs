//! axum adapter for Faultline
//!
//! Handlers return [`ApiResponse`] on success and [`ApiError`] on failure.
//! [`Server`] wires the fault boundary, routing fallbacks and panic capture
//! around the application's routes so every failure leaves as an error
//! envelope.

#![allow(clippy::must_use_candidate)]

mod boundary;
mod catalog;
mod error;
mod extract;
mod health;
mod response;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use faultline_config::Config;
use faultline_core::Classifier;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

pub use boundary::fault_boundary;
pub use catalog::DescriptorView;
pub use error::ApiError;
pub use extract::{Form, Json, Parts, Path, Query, required_header};
pub use response::ApiResponse;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration and the application's routes
    ///
    /// Application routes must not install their own fallback.
    pub fn new(config: &Config, routes: Router) -> Self {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let mut app = Router::new();

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        // Error-code catalog
        app = app.merge(catalog::router(config.server.pagination));

        app = app
            .merge(routes)
            .fallback(boundary::no_route)
            .method_not_allowed_fallback(boundary::method_not_allowed);

        // Apply middleware layers (innermost first)

        // Panics become parked failures, so this must sit inside the boundary
        app = app.layer(CatchPanicLayer::custom(boundary::panic_response));

        app = app.layer(axum::middleware::from_fn_with_state(
            Arc::new(Classifier::new()),
            boundary::fault_boundary,
        ));

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        Self {
            router: app,
            listen_address,
        }
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
