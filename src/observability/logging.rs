//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber (plain or JSON)
//! - Define the lookup logger collaborator injected into `Resolver`
//!
//! # Design Decisions
//! - Events borrow their paths; loggers format only what they need
//! - Any `Fn(&LogEvent)` closure is a logger, so tests can capture events

use std::fmt;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::schema::ObservabilityConfig;

/// Points in a lookup that are reported to the logger.
#[derive(Debug, Clone, Copy)]
pub enum LogEvent<'a> {
    /// No file answers the request (bad path, no candidate, or unreadable file).
    NotFound { attempted: &'a Path },
    /// A file was chosen but its contents are not JSON.
    ParseFailed {
        path: &'a Path,
        error: &'a serde_json::Error,
    },
    /// A file was chosen and parsed.
    Served { path: &'a Path },
}

impl fmt::Display for LogEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogEvent::NotFound { attempted } => {
                write!(f, "no mock file found for {}", attempted.display())
            }
            LogEvent::ParseFailed { path, error } => {
                write!(f, "failed to parse {}: {}", path.display(), error)
            }
            LogEvent::Served { path } => write!(f, "serving {}", path.display()),
        }
    }
}

/// Receives lookup events. Must not influence resolution.
pub trait MockLogger: Send + Sync {
    fn log(&self, event: &LogEvent<'_>);
}

impl<F> MockLogger for F
where
    F: Fn(&LogEvent<'_>) + Send + Sync,
{
    fn log(&self, event: &LogEvent<'_>) {
        self(event)
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl MockLogger for NoopLogger {
    fn log(&self, _event: &LogEvent<'_>) {}
}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl MockLogger for TracingLogger {
    fn log(&self, event: &LogEvent<'_>) {
        match event {
            LogEvent::NotFound { attempted } => {
                tracing::info!(path = %attempted.display(), "No mock file found");
            }
            LogEvent::ParseFailed { path, error } => {
                tracing::warn!(path = %path.display(), error = %error, "Mock file is not valid JSON");
            }
            LogEvent::Served { path } => {
                tracing::info!(path = %path.display(), "Serving mock file");
            }
        }
    }
}

/// Install the global tracing subscriber.
pub fn init_tracing(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "json_mock={level},tower_http={level}",
            level = config.log_level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
