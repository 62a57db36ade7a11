//! Request-to-file resolution.
//!
//! # Data Flow
//! ```text
//! Request (path, query)
//!     → walker.rs (segments → terminal directory + leaf)
//!     → matcher.rs (list candidates, score, pick best)
//!     → Return: Found(path) | NoMatch | LookupError
//!
//! Resolver::load (adapter-facing):
//!     resolve → read file → parse JSON → MockResponse | MockError
//! ```
//!
//! # Design Decisions
//! - Root and logger are fixed at construction; a `Resolver` is cheap to clone
//! - No caching: every lookup reflects the tree as it is on disk
//! - Structural failures (`LookupError`) stay distinct from `NoMatch`

pub mod candidate;
pub mod error;
pub mod matcher;
pub mod query;
pub mod walker;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use serde_json::Value;
use tokio::fs;

use crate::observability::logging::{LogEvent, MockLogger, NoopLogger};

pub use candidate::Candidate;
pub use error::{LookupError, MockError};
pub use matcher::Resolution;
pub use query::{parse_query, QueryParams};
pub use walker::Terminal;

/// A parsed mock response ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct MockResponse {
    /// File the response was read from.
    pub path: PathBuf,
    /// Parsed file contents.
    pub body: Value,
}

/// Resolves request paths to JSON files beneath a root directory.
#[derive(Clone)]
pub struct Resolver {
    root: PathBuf,
    logger: Arc<dyn MockLogger>,
}

impl Resolver {
    /// Create a resolver for `root` that logs nothing.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            logger: Arc::new(NoopLogger),
        }
    }

    /// Replace the lookup logger.
    pub fn with_logger(mut self, logger: impl MockLogger + 'static) -> Self {
        self.logger = Arc::new(logger);
        self
    }

    /// Share an existing logger.
    pub fn with_shared_logger(mut self, logger: Arc<dyn MockLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// The configured root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find the file answering `request_path` with `query`.
    pub async fn resolve(
        &self,
        request_path: &str,
        query: &QueryParams,
    ) -> Result<Resolution, LookupError> {
        let terminal = walker::walk(&self.root, request_path).await?;
        matcher::select(&terminal.dir, &terminal.leaf, query)
            .await
            .map_err(|source| LookupError::Io {
                path: terminal.dir,
                source,
            })
    }

    /// Resolve, read and parse the response for a request.
    ///
    /// Reports to the logger when nothing is found, when the chosen file is
    /// not JSON, and when a response is served.
    pub async fn load(
        &self,
        request_path: &str,
        query: &QueryParams,
    ) -> Result<MockResponse, MockError> {
        let path = match self.resolve(request_path, query).await {
            Ok(Resolution::Found(path)) => path,
            Ok(Resolution::NoMatch) => {
                self.log_not_found(request_path);
                return Err(MockError::NoMatch);
            }
            Err(err) => {
                self.log_not_found(request_path);
                return Err(err.into());
            }
        };

        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(source) => {
                self.logger.log(&LogEvent::NotFound { attempted: &path });
                return Err(MockError::Read { path, source });
            }
        };

        let body = match serde_json::from_slice::<Value>(&bytes) {
            Ok(body) => body,
            Err(source) => {
                self.logger.log(&LogEvent::ParseFailed {
                    path: &path,
                    error: &source,
                });
                return Err(MockError::Parse { path, source });
            }
        };

        self.logger.log(&LogEvent::Served { path: &path });
        Ok(MockResponse { path, body })
    }

    fn log_not_found(&self, request_path: &str) {
        let relative = request_path.strip_prefix('/').unwrap_or(request_path);
        let attempted = self.root.join(relative);
        self.logger.log(&LogEvent::NotFound {
            attempted: &attempted,
        });
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}
