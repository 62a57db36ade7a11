//! File-backed JSON mock responses for frontend development.
//!
//! A request path such as `/users/42/orders?status=open` is mapped onto a
//! directory tree: `users/42/` must exist under the root, and the file is
//! chosen among `orders.json`, `orders?status=open.json`, and so on by how
//! well its encoded query matches the request.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resolver;

pub use config::MockConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use observability::logging::{LogEvent, MockLogger, NoopLogger, TracingLogger};
pub use resolver::{LookupError, MockError, MockResponse, QueryParams, Resolution, Resolver};
