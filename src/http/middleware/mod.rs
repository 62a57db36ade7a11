//! Mock response middleware.
//!
//! # Responsibilities
//! - Map a `GET`/`HEAD` request under the mount prefix onto the mock tree
//! - Answer with the parsed JSON when a file matches
//! - Fall through to the next handler on every kind of miss
//!
//! # Design Decisions
//! - The site (resolver + mount prefix) sits behind `ArcSwap` so a config
//!   reload replaces it without locking in-flight requests
//! - Misses are not errors here: `LookupError`, `NoMatch`, read and parse
//!   failures all hand the request on unchanged

use std::sync::Arc;
use std::time::Instant;
use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::State,
    http::{Method, Request},
    middleware::Next,
    response::Response,
};

use crate::config::MockConfig;
use crate::http::request::{query_params, request_id};
use crate::http::response::mock_response;
use crate::observability::logging::{NoopLogger, TracingLogger};
use crate::observability::metrics;
use crate::resolver::Resolver;

/// What the middleware serves: a resolver and the URL prefix it is mounted at.
#[derive(Debug, Clone)]
pub struct MockSite {
    resolver: Resolver,
    mount_prefix: String,
}

/// Shared, swappable site handed to the middleware as state.
pub type SharedSite = Arc<ArcSwap<MockSite>>;

impl MockSite {
    pub fn new(resolver: Resolver, mount_prefix: impl Into<String>) -> Self {
        Self {
            resolver,
            mount_prefix: mount_prefix.into(),
        }
    }

    /// Build a site from configuration, logging lookups through `tracing`
    /// when `observability.log_lookups` is set.
    pub fn from_config(config: &MockConfig) -> Self {
        let resolver = Resolver::new(config.resolver.root.clone());
        let resolver = if config.observability.log_lookups {
            resolver.with_logger(TracingLogger)
        } else {
            resolver.with_logger(NoopLogger)
        };
        Self::new(resolver, config.resolver.mount_prefix.clone())
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn mount_prefix(&self) -> &str {
        &self.mount_prefix
    }

    /// `path` relative to the mount prefix, or `None` if it lies outside.
    pub fn local_path<'a>(&self, path: &'a str) -> Option<&'a str> {
        let prefix = self.mount_prefix.trim_end_matches('/');
        if prefix.is_empty() {
            return Some(path);
        }
        let rest = path.strip_prefix(prefix)?;
        (rest.is_empty() || rest.starts_with('/')).then_some(rest)
    }

    pub fn shared(self) -> SharedSite {
        Arc::new(ArcSwap::from_pointee(self))
    }
}

/// Serve a mock file if one matches, otherwise run the next handler.
pub async fn mock_middleware(
    State(site): State<SharedSite>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if request.method() != Method::GET && request.method() != Method::HEAD {
        return next.run(request).await;
    }

    let site = site.load_full();
    let Some(path) = site.local_path(request.uri().path()).map(str::to_owned) else {
        return next.run(request).await;
    };
    let query = query_params(&request);

    let start = Instant::now();
    match site.resolver().load(&path, &query).await {
        Ok(mock) => {
            metrics::record_lookup("served", start);
            tracing::debug!(
                request_id = %request_id(&request),
                path = %path,
                file = %mock.path.display(),
                "Mock matched"
            );
            mock_response(mock.body)
        }
        Err(e) => {
            metrics::record_lookup(e.outcome(), start);
            tracing::debug!(
                request_id = %request_id(&request),
                path = %path,
                reason = %e,
                "No mock, passing request on"
            );
            next.run(request).await
        }
    }
}
