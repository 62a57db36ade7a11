//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router: mock middleware in front of a 404 fallback
//! - Wire up middleware (tracing, timeout, request ID)
//! - Apply resolver changes from config reloads
//! - Serve until the shutdown signal

use std::sync::Arc;
use std::time::Duration;
use axum::{http::Uri, middleware, response::Response, Router};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::MockConfig;
use crate::http::middleware::{mock_middleware, MockSite, SharedSite};
use crate::http::request::UuidRequestId;
use crate::http::response::not_found;
use crate::lifecycle::shutdown::wait_for_shutdown;

/// HTTP server for file-backed mock responses.
pub struct HttpServer {
    config: MockConfig,
    site: SharedSite,
}

impl HttpServer {
    /// Create a server whose site is built from `config`.
    pub fn new(config: MockConfig) -> Self {
        let site = MockSite::from_config(&config);
        Self::with_site(config, site)
    }

    /// Create a server around an already built site, e.g. one whose resolver
    /// carries a custom logger. Reloads replace it with a config-built site.
    pub fn with_site(config: MockConfig, site: MockSite) -> Self {
        Self {
            config,
            site: site.shared(),
        }
    }

    /// The currently active site.
    pub fn site(&self) -> Arc<MockSite> {
        self.site.load_full()
    }

    /// The router with all middleware applied, for serving or embedding.
    pub fn router(&self) -> Router {
        Self::build_router(&self.config, self.site.clone())
    }

    #[allow(deprecated)]
    fn build_router(config: &MockConfig, site: SharedSite) -> Router {
        Router::new()
            .fallback(fallback_handler)
            .layer(middleware::from_fn_with_state(site, mock_middleware))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server on `listener` until `shutdown` fires.
    ///
    /// Each config received on `config_updates` replaces the site; the
    /// listener and middleware settings stay as they were at startup.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<MockConfig>,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        let site = self.site();
        tracing::info!(
            address = %addr,
            root = %site.resolver().root().display(),
            mount_prefix = %site.mount_prefix(),
            "Mock server starting"
        );

        let reload_site = self.site.clone();
        let reloads = tokio::spawn(async move {
            while let Some(new_config) = config_updates.recv().await {
                let site = MockSite::from_config(&new_config);
                tracing::info!(
                    root = %site.resolver().root().display(),
                    mount_prefix = %site.mount_prefix(),
                    "Mock site reloaded"
                );
                reload_site.store(Arc::new(site));
            }
        });

        let app = self.router();
        axum::serve(listener, app)
            .with_graceful_shutdown(wait_for_shutdown(shutdown))
            .await?;

        reloads.abort();
        tracing::info!("Mock server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &MockConfig {
        &self.config
    }
}

/// Last handler in the chain: nothing served this request.
async fn fallback_handler(uri: Uri) -> Response {
    not_found(uri.path())
}
