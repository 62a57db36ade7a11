//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Resolver lookups:
//!     → logging.rs (MockLogger events: not found, parse failed, served)
//! HTTP adapter:
//!     → metrics.rs (lookup outcome counters, latency histogram)
//! Process:
//!     → logging.rs (tracing subscriber setup)
//! ```
//!
//! # Design Decisions
//! - Lookup logging goes through an injected `MockLogger`, never a global
//! - `RUST_LOG` overrides the configured level
//! - Metrics are no-ops until an exporter is installed

pub mod logging;
pub mod metrics;
