//! HTTP adapter subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, trace / request ID / timeout layers)
//!     → middleware (mount prefix, query, Resolver::load)
//!         hit  → response.rs (200 + JSON)
//!         miss → next handler (404 fallback, or the embedder's routes)
//! ```

pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use middleware::{mock_middleware, MockSite, SharedSite};
pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::HttpServer;
